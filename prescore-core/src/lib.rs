//! Core types, traits, errors, and configuration for the Prescore
//! prediction engine.
//!
//! This crate carries no scoring logic. It defines the data model shared
//! between the engine and its collaborators (transcript providers,
//! competitor-data collectors, persistence), the error taxonomy, the
//! validated configuration tables, and the injection points (semantic
//! classifier, calibration store) that keep the engine deterministic and
//! testable.

pub mod config;
pub mod errors;
pub mod traits;
pub mod types;

pub use config::EngineConfig;
pub use errors::{ConfigError, PrescoreErrorCode, ValidationError};
pub use traits::{CalibrationStore, SemanticClassifier, SignalKind};
pub use types::{
    BenchmarkSample, CalibrationRecord, ContentUnit, DetectorKey, DetectorReading,
    DetectorScore, FormatType, PlatformMetrics, PredictionResult, TranscriptSegment,
};
