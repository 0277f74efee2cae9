//! Configuration errors — fatal at load time, never at call time.

use super::error_code::{self, PrescoreErrorCode};

/// Errors raised while loading or validating engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read config at {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Failed to parse config at {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Invalid config value for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Detector weights for {format} sum to {sum}, expected 1.0 ± {tolerance}")]
    WeightSumMismatch {
        format: String,
        sum: f64,
        tolerance: f64,
    },
}

impl PrescoreErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
