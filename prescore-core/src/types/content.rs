//! Content inputs: the immutable unit the engine scores.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Content format classification. Changes target thresholds throughout
/// the engine: short-form targets are stricter and faster than long-form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatType {
    ShortForm,
    LongForm,
    /// Format could not be determined by the collaborator. Scored with
    /// long-form targets (the more lenient tables).
    Unknown,
}

impl FormatType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShortForm => "short_form",
            Self::LongForm => "long_form",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One timestamped transcript segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub start_s: f64,
    pub end_s: f64,
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start_s: f64, end_s: f64, text: impl Into<String>) -> Self {
        Self {
            start_s,
            end_s,
            text: text.into(),
        }
    }

    pub fn duration_s(&self) -> f64 {
        (self.end_s - self.start_s).max(0.0)
    }
}

/// Raw platform engagement metrics, either the creator's own recent
/// numbers (input) or post-publish actuals (outcome ingestion).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PlatformMetrics {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub saves: u64,
    pub watch_time_seconds: f64,
}

impl PlatformMetrics {
    /// Engagement rate: (likes + comments + shares + saves) / views.
    /// Returns 0.0 when there are no views.
    pub fn engagement_rate(&self) -> f64 {
        if self.views == 0 {
            return 0.0;
        }
        let interactions = (self.likes + self.comments + self.shares + self.saves) as f64;
        interactions / self.views as f64
    }
}

/// The immutable input to a scoring call: duration, format, and an
/// ordered, timestamped transcript. Never mutated after detector
/// extraction runs on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentUnit {
    pub duration_seconds: f64,
    pub format_type: FormatType,
    pub transcript_segments: Vec<TranscriptSegment>,
    pub platform_metrics: Option<PlatformMetrics>,
}

impl ContentUnit {
    /// Validate mandatory structure. Fatal to the scoring call on failure;
    /// an empty transcript or zero duration is NOT a failure (detectors
    /// degrade to worst-case readings instead).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.duration_seconds.is_finite() || self.duration_seconds < 0.0 {
            return Err(ValidationError::InvalidDuration {
                seconds: self.duration_seconds,
            });
        }
        for (index, seg) in self.transcript_segments.iter().enumerate() {
            let ok = seg.start_s.is_finite()
                && seg.end_s.is_finite()
                && seg.start_s >= 0.0
                && seg.end_s >= seg.start_s;
            if !ok {
                return Err(ValidationError::InvalidSegmentBounds {
                    index,
                    start_s: seg.start_s,
                    end_s: seg.end_s,
                });
            }
        }
        Ok(())
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_seconds / 60.0
    }

    /// True when there is nothing to extract signal from.
    pub fn is_blank(&self) -> bool {
        self.duration_seconds <= 0.0 || self.transcript_segments.is_empty()
    }
}
