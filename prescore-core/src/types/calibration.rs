//! Calibration records and rolling statistics: how the engine learns
//! from real post-publish outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::content::{FormatType, PlatformMetrics};

/// One resolved outcome. Append-only; never edited, only superseded by
/// newer records within the rolling window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRecord {
    pub predicted_score: f64,
    pub actual_score: f64,
    /// actual_score - predicted_score.
    pub calibration_delta: f64,
    pub platform: String,
    pub format_type: FormatType,
    /// Unix timestamp (seconds).
    pub posted_at: i64,
}

/// Direction of calibration quality over the rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Stable,
    Worsening,
}

impl Trend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Stable => "stable",
            Self::Worsening => "worsening",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rolling calibration statistics for one (platform, format_type) key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSummary {
    /// Mean absolute calibration delta over the window.
    pub mean_abs_error: f64,
    /// Fraction of predictions whose likelihood band matched the actual
    /// outcome's band.
    pub hit_rate: f64,
    pub trend: Trend,
    /// Number of records the summary was computed over.
    pub window_len: usize,
}

/// Outcome ingestion payload supplied by the persistence collaborator
/// once real post-publish metrics are available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomePayload {
    pub platform: String,
    pub format_type: FormatType,
    pub actual_metrics: PlatformMetrics,
    /// Optional audience-retention curve samples in [0, 1].
    pub retention_points: Option<Vec<f64>>,
    /// Unix timestamp (seconds).
    pub posted_at: i64,
    pub predicted_score: f64,
}

/// Result of ingesting one outcome: the closed-loop artifact returned
/// to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationOutcome {
    /// Deterministic id: "{platform}:{format}:{posted_at}".
    pub outcome_id: String,
    pub calibration_delta: f64,
    pub actual_score: f64,
    pub predicted_score: f64,
    /// Rolling summary for this key after the append.
    pub confidence_update: CalibrationSummary,
}

impl CalibrationOutcome {
    pub fn make_id(platform: &str, format_type: FormatType, posted_at: i64) -> String {
        format!("{platform}:{format_type}:{posted_at}")
    }
}
