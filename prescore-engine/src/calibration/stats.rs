//! Rolling calibration statistics over (platform, format) record
//! windows: MAE, band hit rate, and trend.

use prescore_core::config::{CalibrationConfig, ScoringConfig};
use prescore_core::types::{CalibrationRecord, CalibrationSummary, LikelihoodBand, Trend};
use statrs::distribution::{Beta, ContinuousCDF};

/// The most recent `window` records (records are stored oldest first).
pub fn windowed(records: &[CalibrationRecord], window: usize) -> &[CalibrationRecord] {
    let start = records.len().saturating_sub(window);
    &records[start..]
}

/// Mean absolute calibration delta. Zero for an empty slice.
pub fn mean_abs_error(records: &[CalibrationRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let sum: f64 = records.iter().map(|r| r.calibration_delta.abs()).sum();
    sum / records.len() as f64
}

/// Fraction of records whose predicted likelihood band matched the
/// actual outcome's band (same cut points both sides).
pub fn hit_rate(records: &[CalibrationRecord], scoring: &ScoringConfig) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let hits = records
        .iter()
        .filter(|r| {
            let predicted =
                LikelihoodBand::from_score(r.predicted_score, scoring.band_low_cut, scoring.band_high_cut);
            let actual =
                LikelihoodBand::from_score(r.actual_score, scoring.band_low_cut, scoring.band_high_cut);
            predicted == actual
        })
        .count();
    hits as f64 / records.len() as f64
}

/// Compare MAE of the most recent half of the window against the
/// earlier half. Fewer than four records cannot split meaningfully and
/// reads as stable.
pub fn trend(records: &[CalibrationRecord], tolerance_points: f64) -> Trend {
    if records.len() < 4 {
        return Trend::Stable;
    }
    let mid = records.len() / 2;
    let earlier = mean_abs_error(&records[..mid]);
    let recent = mean_abs_error(&records[mid..]);
    if recent + tolerance_points < earlier {
        Trend::Improving
    } else if recent > earlier + tolerance_points {
        Trend::Worsening
    } else {
        Trend::Stable
    }
}

/// Full rolling summary over the window.
pub fn summary(
    records: &[CalibrationRecord],
    calibration: &CalibrationConfig,
    scoring: &ScoringConfig,
) -> CalibrationSummary {
    let window = windowed(records, calibration.window);
    CalibrationSummary {
        mean_abs_error: mean_abs_error(window),
        hit_rate: hit_rate(window, scoring),
        trend: trend(window, calibration.trend_tolerance_points),
        window_len: window.len(),
    }
}

/// Recency-weighted mean of actual scores, newest weighted highest
/// (exponential half-life in records).
pub fn recency_weighted_actual(records: &[CalibrationRecord], half_life: f64) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;
    let newest = records.len() - 1;
    for (i, record) in records.iter().enumerate() {
        let age = (newest - i) as f64;
        let weight = 0.5_f64.powf(age / half_life);
        weighted_sum += record.actual_score * weight;
        weight_sum += weight;
    }
    weighted_sum / weight_sum
}

/// 95%-style credible interval for a Beta posterior, via inverse CDF.
/// Guards against invalid parameters by returning the full interval.
pub fn credible_interval(alpha: f64, beta_param: f64, level: f64) -> (f64, f64) {
    if alpha <= 0.0 || beta_param <= 0.0 || !alpha.is_finite() || !beta_param.is_finite() {
        return (0.0, 1.0);
    }
    let tail = (1.0 - level) / 2.0;
    match Beta::new(alpha, beta_param) {
        Ok(dist) => {
            let low = dist.inverse_cdf(tail);
            let high = dist.inverse_cdf(1.0 - tail);
            (low.clamp(0.0, 1.0), high.clamp(0.0, 1.0))
        }
        Err(_) => (0.0, 1.0),
    }
}
