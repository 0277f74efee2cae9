//! Outcome calibration: the closed loop from real post-publish metrics
//! back into future confidence.

pub mod stats;
pub mod store;
pub mod tracker;

pub use store::SharedCalibrationStore;
pub use tracker::OutcomeTracker;
