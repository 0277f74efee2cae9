//! Machine-readable error codes.
//!
//! Callers embedding the engine map these to their own fault taxonomy;
//! the string constants are stable across releases.

pub const CONFIG_ERROR: &str = "PRESCORE_CONFIG_ERROR";
pub const VALIDATION_ERROR: &str = "PRESCORE_VALIDATION_ERROR";

/// Stable error-code accessor implemented by every Prescore error enum.
pub trait PrescoreErrorCode {
    fn error_code(&self) -> &'static str;
}
