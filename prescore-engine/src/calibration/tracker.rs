//! Outcome calibration tracker: ingests real post-publish metrics,
//! appends calibration records, and serves rolling statistics.

use prescore_core::config::{CalibrationConfig, ScoringConfig};
use prescore_core::errors::ValidationError;
use prescore_core::traits::CalibrationStore;
use prescore_core::types::{
    CalibrationOutcome, CalibrationRecord, CalibrationSummary, FormatType, OutcomePayload,
    PlatformMetrics,
};

use super::stats;

/// Closes the prediction loop. Holds a reference to the shared store;
/// the original `PredictionResult` is never mutated — reconciliation
/// produces a separate `CalibrationRecord`.
pub struct OutcomeTracker<'a> {
    store: &'a dyn CalibrationStore,
    calibration: CalibrationConfig,
    scoring: ScoringConfig,
}

impl<'a> OutcomeTracker<'a> {
    pub fn new(
        store: &'a dyn CalibrationStore,
        calibration: CalibrationConfig,
        scoring: ScoringConfig,
    ) -> Self {
        Self {
            store,
            calibration,
            scoring,
        }
    }

    /// Ingest one resolved outcome. Validation failures are fatal to
    /// this call only and leave rolling state untouched.
    pub fn ingest(&self, payload: &OutcomePayload) -> Result<CalibrationOutcome, ValidationError> {
        validate(payload)?;

        let actual_score = actual_score(
            &payload.actual_metrics,
            payload.retention_points.as_deref(),
            &self.calibration,
        );
        let calibration_delta = actual_score - payload.predicted_score;

        tracing::info!(
            platform = %payload.platform,
            format = %payload.format_type,
            predicted = payload.predicted_score,
            actual = actual_score,
            delta = calibration_delta,
            "ingesting outcome"
        );

        self.store.append(CalibrationRecord {
            predicted_score: payload.predicted_score,
            actual_score,
            calibration_delta,
            platform: payload.platform.clone(),
            format_type: payload.format_type,
            posted_at: payload.posted_at,
        });

        let records = self
            .store
            .records_for(&payload.platform, payload.format_type);
        let confidence_update = stats::summary(&records, &self.calibration, &self.scoring);

        Ok(CalibrationOutcome {
            outcome_id: CalibrationOutcome::make_id(
                &payload.platform,
                payload.format_type,
                payload.posted_at,
            ),
            calibration_delta,
            actual_score,
            predicted_score: payload.predicted_score,
            confidence_update,
        })
    }

    /// Rolling summary for a key, or None when no records exist yet.
    pub fn summary(&self, platform: &str, format_type: FormatType) -> Option<CalibrationSummary> {
        let records = self.store.records_for(platform, format_type);
        if records.is_empty() {
            return None;
        }
        Some(stats::summary(&records, &self.calibration, &self.scoring))
    }
}

/// Derive a 0-100 actual score from post-publish metrics, using the
/// same conventions the historical scorer consumes: an engagement
/// component against the target rate, blended with a retention
/// component when a retention curve is available.
pub fn actual_score(
    metrics: &PlatformMetrics,
    retention_points: Option<&[f64]>,
    config: &CalibrationConfig,
) -> f64 {
    let engagement = (metrics.engagement_rate() / config.target_engagement_rate).min(1.0);

    let retention = retention_points.and_then(|points| {
        let finite: Vec<f64> = points
            .iter()
            .copied()
            .filter(|p| p.is_finite())
            .map(|p| p.clamp(0.0, 1.0))
            .collect();
        if finite.is_empty() {
            return None;
        }
        let mean = finite.iter().sum::<f64>() / finite.len() as f64;
        Some((mean / config.target_retention).min(1.0))
    });

    let score = match retention {
        Some(retention) => 100.0 * (0.6 * engagement + 0.4 * retention),
        None => 100.0 * engagement,
    };
    score.clamp(0.0, 100.0)
}

fn validate(payload: &OutcomePayload) -> Result<(), ValidationError> {
    if !payload.predicted_score.is_finite() {
        return Err(ValidationError::NonFiniteScore {
            field: "predicted_score".to_string(),
            value: payload.predicted_score,
        });
    }
    if !(0.0..=100.0).contains(&payload.predicted_score) {
        return Err(ValidationError::ScoreOutOfRange {
            score: payload.predicted_score,
        });
    }
    if payload.posted_at < 0 {
        return Err(ValidationError::InvalidTimestamp {
            posted_at: payload.posted_at,
        });
    }
    if !payload.actual_metrics.watch_time_seconds.is_finite() {
        return Err(ValidationError::NonFiniteScore {
            field: "actual_metrics.watch_time_seconds".to_string(),
            value: payload.actual_metrics.watch_time_seconds,
        });
    }
    Ok(())
}
