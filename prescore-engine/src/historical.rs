//! Historical calibration scorer.
//!
//! Scores the creator's own track record for a (platform, format_type)
//! key — "does this channel/format combination tend to perform" — from
//! past actual outcomes, not from the current content's detectors.
//! Sample sufficiency is expressed as a Beta posterior over the band
//! hit rate, so confidence tightens as the calibration loop accumulates
//! evidence.

use prescore_core::config::{CalibrationConfig, ScoringConfig, SourceConfig};
use prescore_core::traits::CalibrationStore;
use prescore_core::types::{Confidence, FormatType, HistoricalScore};

use crate::calibration::stats;

/// Credible-interval width above which the track record is too noisy
/// for high confidence.
const MAX_CI_WIDTH: f64 = 0.45;

/// Rolling MAE (score points) above which calibration quality caps
/// confidence at medium.
const MAX_MAE_FOR_HIGH: f64 = 25.0;

pub fn score(
    store: &dyn CalibrationStore,
    platform: &str,
    format_type: FormatType,
    sources: &SourceConfig,
    calibration: &CalibrationConfig,
    scoring: &ScoringConfig,
) -> Option<HistoricalScore> {
    let records = store.records_for(platform, format_type);
    if records.is_empty() {
        return None;
    }

    let window = stats::windowed(&records, calibration.window);
    let format_sample_size = records.len();
    let insufficient_data = format_sample_size < sources.min_history_sample;

    let score = stats::recency_weighted_actual(window, calibration.recency_half_life)
        .clamp(0.0, 100.0);

    let confidence = if insufficient_data {
        tracing::debug!(
            platform,
            format = %format_type,
            records = format_sample_size,
            minimum = sources.min_history_sample,
            "historical sample below minimum; degrading confidence"
        );
        Confidence::Low
    } else {
        confidence_from_track_record(window, calibration, scoring)
    };

    Some(HistoricalScore {
        score,
        confidence,
        format_sample_size,
        insufficient_data,
    })
}

/// Beta posterior over band hits (uniform prior): narrow credible
/// interval and acceptable MAE earn high confidence.
fn confidence_from_track_record(
    window: &[prescore_core::types::CalibrationRecord],
    calibration: &CalibrationConfig,
    scoring: &ScoringConfig,
) -> Confidence {
    let n = window.len() as f64;
    let hits = (stats::hit_rate(window, scoring) * n).round();
    let alpha = 1.0 + hits;
    let beta = 1.0 + (n - hits).max(0.0);
    let (low, high) = stats::credible_interval(alpha, beta, 0.95);
    let ci_width = high - low;

    let mae = stats::mean_abs_error(window);
    if ci_width <= MAX_CI_WIDTH && mae <= MAX_MAE_FOR_HIGH {
        Confidence::High
    } else {
        Confidence::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::store::SharedCalibrationStore;
    use prescore_core::types::CalibrationRecord;

    fn seed(store: &SharedCalibrationStore, n: usize, predicted: f64, actual: f64) {
        for i in 0..n {
            store.append(CalibrationRecord {
                predicted_score: predicted,
                actual_score: actual,
                calibration_delta: actual - predicted,
                platform: "youtube".to_string(),
                format_type: FormatType::ShortForm,
                posted_at: i as i64,
            });
        }
    }

    fn run(store: &SharedCalibrationStore) -> Option<HistoricalScore> {
        score(
            store,
            "youtube",
            FormatType::ShortForm,
            &SourceConfig::default(),
            &CalibrationConfig::default(),
            &ScoringConfig::default(),
        )
    }

    #[test]
    fn test_no_history_returns_none() {
        let store = SharedCalibrationStore::new();
        assert!(run(&store).is_none());
    }

    #[test]
    fn test_small_sample_flagged_insufficient() {
        let store = SharedCalibrationStore::new();
        seed(&store, 3, 60.0, 60.0);
        let h = run(&store).unwrap();
        assert!(h.insufficient_data);
        assert_eq!(h.confidence, Confidence::Low);
        assert_eq!(h.format_sample_size, 3);
        // Score is still computed.
        assert!((h.score - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_well_calibrated_history_high_confidence() {
        let store = SharedCalibrationStore::new();
        seed(&store, 30, 62.0, 60.0);
        let h = run(&store).unwrap();
        assert!(!h.insufficient_data);
        assert_eq!(h.confidence, Confidence::High);
        assert!((h.score - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_noisy_history_caps_at_medium() {
        let store = SharedCalibrationStore::new();
        // Predictions consistently 40 points off.
        seed(&store, 30, 80.0, 40.0);
        let h = run(&store).unwrap();
        assert_eq!(h.confidence, Confidence::Medium);
    }

    #[test]
    fn test_score_tracks_recent_outcomes() {
        let store = SharedCalibrationStore::new();
        seed(&store, 10, 50.0, 30.0);
        seed(&store, 10, 50.0, 80.0);
        let h = run(&store).unwrap();
        // Recency weighting pulls toward the newer 80s.
        assert!(h.score > 55.0);
    }
}
