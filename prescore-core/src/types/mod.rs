//! Shared data model for the prediction engine and its collaborators.

pub mod calibration;
pub mod content;
pub mod prediction;

pub use calibration::{
    CalibrationOutcome, CalibrationRecord, CalibrationSummary, OutcomePayload, Trend,
};
pub use content::{ContentUnit, FormatType, PlatformMetrics, TranscriptSegment};
pub use prediction::{
    Assessment, BenchmarkSample, ClipWindow, CombinedScore, CompetitorScore, Confidence,
    CtaStyle, DeadZone, DetectorKey, DetectorReading, DetectorScore, HistoricalScore,
    LikelihoodBand, NextAction, PlatformScore, PredictionResult, RankedDetector,
    RepurposePlan, Severity,
};
