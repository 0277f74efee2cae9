//! Performance Prediction & Calibration Engine.
//!
//! Scores short-form and long-form video content before publication and
//! learns from real post-publish outcomes. The engine is a pure function
//! of (ContentUnit, BenchmarkSample, calibration history) to
//! `PredictionResult`, except for the rolling calibration aggregates
//! held in the injected [`CalibrationStore`].
//!
//! Pipeline: detector extraction → detector scoring + ranking, blended
//! with the competitor benchmark score and the historical calibration
//! score into one combined prediction with a confidence band. Outcome
//! ingestion later closes the loop asynchronously.
//!
//! [`CalibrationStore`]: prescore_core::CalibrationStore

pub mod aggregate;
pub mod benchmark;
pub mod calibration;
pub mod classify;
pub mod detectors;
pub mod engine;
pub mod historical;
pub mod repurpose;
pub mod scoring;

pub use aggregate::{AggregationState, ScoreAggregator};
pub use calibration::store::SharedCalibrationStore;
pub use calibration::tracker::OutcomeTracker;
pub use classify::KeywordClassifier;
pub use engine::PrescoreEngine;
