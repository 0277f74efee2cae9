//! Injection points that keep the scoring core deterministic and
//! testable independently of any model provider or storage backend.

pub mod calibration_store;
pub mod classifier;

pub use calibration_store::CalibrationStore;
pub use classifier::{NullClassifier, SemanticClassifier, SignalKind};
