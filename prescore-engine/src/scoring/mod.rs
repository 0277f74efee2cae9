//! Detector scoring and ranking: raw readings to 0-100 scores against
//! per-format targets, then prioritized improvement opportunities.

pub mod detector_scorer;
pub mod ranker;

pub use detector_scorer::{score_all, weighted_score};
pub use ranker::{rank, RankedOutput};
