//! Input validation errors — fatal to the single scoring call that
//! supplied the malformed input, never to rolling calibration state.

use super::error_code::{self, PrescoreErrorCode};

/// Errors raised on structurally invalid mandatory inputs.
///
/// Missing optional inputs (benchmark, history, creator metrics) never
/// surface here — they degrade confidence instead.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid duration: {seconds}s (must be finite and >= 0)")]
    InvalidDuration { seconds: f64 },

    #[error("Transcript segment {index} has invalid bounds: start={start_s}, end={end_s}")]
    InvalidSegmentBounds {
        index: usize,
        start_s: f64,
        end_s: f64,
    },

    #[error("Non-finite score in {field}: {value}")]
    NonFiniteScore { field: String, value: f64 },

    #[error("Predicted score {score} outside [0, 100]")]
    ScoreOutOfRange { score: f64 },

    #[error("Outcome posted_at timestamp is negative: {posted_at}")]
    InvalidTimestamp { posted_at: i64 },
}

impl PrescoreErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        error_code::VALIDATION_ERROR
    }
}
