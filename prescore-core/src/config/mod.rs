//! Versioned, declarative configuration for the prediction engine.
//!
//! All weight/threshold tables (detector weights, targets, bucket cut
//! points, realizability factors, ideal ranges) live here rather than as
//! scattered literals, so they can be A/B tuned without code changes.
//! Validation is eager — at load, never at call time.

pub mod detector_config;
pub mod engine_config;

pub use detector_config::{DetectorTargets, DetectorWeights, FormatTable, IdealRange};
pub use engine_config::{
    CalibrationConfig, EngineConfig, RepurposeConfig, ScoringConfig, SourceConfig,
};
