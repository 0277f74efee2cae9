//! Error handling for Prescore.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.
//!
//! Insufficient-signal conditions are deliberately NOT errors: they are
//! first-class outputs (`confidence`, `insufficient_data_reasons`) so the
//! product can render partial results instead of failing.

pub mod config_error;
pub mod error_code;
pub mod validation_error;

pub use config_error::ConfigError;
pub use error_code::PrescoreErrorCode;
pub use validation_error::ValidationError;
