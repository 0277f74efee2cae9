//! Prediction artifacts: detector readings, per-source scores, and the
//! externally visible `PredictionResult`.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::content::FormatType;

/// The five structural detectors, in fixed declaration order.
///
/// Declaration order is the deterministic tie-break for ranking, so the
/// order of this enum is part of the engine's contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKey {
    TimeToValue,
    OpenLoops,
    DeadZones,
    PatternInterrupts,
    CtaStyle,
}

impl DetectorKey {
    /// All detectors in declaration (tie-break) order.
    pub const ALL: [DetectorKey; 5] = [
        Self::TimeToValue,
        Self::OpenLoops,
        Self::DeadZones,
        Self::PatternInterrupts,
        Self::CtaStyle,
    ];

    /// Index in declaration order, used as the ranking tie-break.
    pub fn order(&self) -> usize {
        Self::ALL.iter().position(|k| k == self).unwrap_or(usize::MAX)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TimeToValue => "time_to_value",
            Self::OpenLoops => "open_loops",
            Self::DeadZones => "dead_zones",
            Self::PatternInterrupts => "pattern_interrupts",
            Self::CtaStyle => "cta_style",
        }
    }
}

impl fmt::Display for DetectorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed set of call-to-action styles found in the terminal window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CtaStyle {
    DirectAsk,
    SoftSuggestion,
    None,
}

impl CtaStyle {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DirectAsk => "direct_ask",
            Self::SoftSuggestion => "soft_suggestion",
            Self::None => "none",
        }
    }
}

/// A contiguous span with no classified signal segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeadZone {
    pub start_s: f64,
    pub end_s: f64,
    pub duration_s: f64,
}

/// Up to three textual evidence snippets per reading.
pub type Evidence = SmallVec<[String; 3]>;

/// One raw detector measurement, derived deterministically from a
/// `ContentUnit`. No hidden state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectorReading {
    TimeToValue {
        seconds: f64,
    },
    OpenLoops {
        count: u32,
        examples: Evidence,
    },
    DeadZones {
        zones: Vec<DeadZone>,
        total_seconds: f64,
    },
    PatternInterrupts {
        count: u32,
        per_minute: f64,
    },
    CtaStyle {
        style: CtaStyle,
        window_seconds: f64,
    },
}

impl DetectorReading {
    pub fn detector(&self) -> DetectorKey {
        match self {
            Self::TimeToValue { .. } => DetectorKey::TimeToValue,
            Self::OpenLoops { .. } => DetectorKey::OpenLoops,
            Self::DeadZones { .. } => DetectorKey::DeadZones,
            Self::PatternInterrupts { .. } => DetectorKey::PatternInterrupts,
            Self::CtaStyle { .. } => DetectorKey::CtaStyle,
        }
    }
}

/// Qualitative assessment attached to a detector score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    // time_to_value buckets
    Fast,
    Moderate,
    Slow,
    // ideal-range detectors (open loops, pattern interrupts)
    Balanced,
    TooFlat,
    TooChaotic,
    // dead zones
    Tight,
    Leaky,
    // cta style
    Strong,
    Weak,
    Missing,
}

impl Assessment {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Moderate => "moderate",
            Self::Slow => "slow",
            Self::Balanced => "balanced",
            Self::TooFlat => "too_flat",
            Self::TooChaotic => "too_chaotic",
            Self::Tight => "tight",
            Self::Leaky => "leaky",
            Self::Strong => "strong",
            Self::Weak => "weak",
            Self::Missing => "missing",
        }
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One scored detector: raw reading plus the normalized 0-100 score
/// against its per-format target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorScore {
    pub detector: DetectorKey,
    pub reading: DetectorReading,
    /// Normalized score in [0, 100].
    pub score: f64,
    /// Target score for this detector (ranking baseline).
    pub target_score: f64,
    /// Static importance weight. Weights across the five detectors sum
    /// to 1.0 within floating tolerance (validated at config load).
    pub weight: f64,
    pub assessment: Assessment,
}

/// Improvement-priority ordinal for a ranked detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of the detector ranking, ordered by improvement opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDetector {
    pub detector: DetectorKey,
    /// 1-based rank; ties broken by detector declaration order.
    pub rank: u32,
    pub severity: Severity,
    /// max(0, target_score - score).
    pub gap: f64,
    /// gap * weight.
    pub priority_score: f64,
    /// gap * weight * realizability factor (< 1.0).
    pub estimated_lift_points: f64,
}

/// A prescriptive edit surfaced to the creator before publishing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextAction {
    pub detector: DetectorKey,
    pub title: String,
    pub why: String,
    pub execution_steps: Vec<String>,
    pub evidence: Evidence,
}

/// Confidence tier attached to each scoring source and to the combined
/// prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn name(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn is_low(&self) -> bool {
        matches!(self, Self::Low)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coarse discretization of the combined score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LikelihoodBand {
    Low,
    Medium,
    High,
}

impl LikelihoodBand {
    /// Discretize a 0-100 score with the given cut points
    /// (score < low_cut => Low, score > high_cut => High).
    pub fn from_score(score: f64, low_cut: f64, high_cut: f64) -> Self {
        if score < low_cut {
            Self::Low
        } else if score > high_cut {
            Self::High
        } else {
            Self::Medium
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for LikelihoodBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Aggregated competitor statistics for a niche/format. Refreshed by an
/// external collector; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSample {
    pub sample_size: u32,
    pub competitor_count: u32,
    pub avg_views: f64,
    pub avg_like_rate: f64,
    pub avg_comment_rate: f64,
    pub avg_engagement_rate: f64,
    /// 0-100; higher = harder niche.
    pub difficulty_score: f64,
}

/// Competitor benchmark source output. Echoes the benchmark snapshot
/// used so results are auditable after the sample is refreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorScore {
    pub score: f64,
    pub confidence: Confidence,
    pub benchmark: BenchmarkSample,
}

/// Detector-derived (platform) source output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformScore {
    /// Weighted sum of the five detector scores.
    pub score: f64,
    pub confidence: Confidence,
    pub detector_scores: Vec<DetectorScore>,
}

/// Historical calibration source output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalScore {
    pub score: f64,
    pub confidence: Confidence,
    /// Count of calibration records for this (platform, format).
    pub format_sample_size: usize,
    /// True when format_sample_size is below the configured minimum.
    pub insufficient_data: bool,
}

/// The blended prediction with its confidence band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedScore {
    pub score: f64,
    pub confidence: Confidence,
    pub likelihood_band: LikelihoodBand,
    pub insufficient_data: bool,
    pub insufficient_data_reasons: Vec<String>,
}

/// A candidate short-form clip window cut from long-form content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipWindow {
    pub start_s: f64,
    pub end_s: f64,
    pub reason: String,
}

/// Suggested long-form to short-form repurposing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepurposePlan {
    pub clips: Vec<ClipWindow>,
}

/// The engine's externally visible artifact. Created once per scoring
/// request and immutable once returned; persisted by a collaborator for
/// later calibration matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub format_type: FormatType,
    pub duration_seconds: f64,
    /// Absent only when no benchmark sample was supplied.
    pub competitor_metrics: Option<CompetitorScore>,
    pub platform_metrics: PlatformScore,
    pub historical_metrics: Option<HistoricalScore>,
    pub combined_metrics: CombinedScore,
    pub detector_rankings: Vec<RankedDetector>,
    pub next_actions: Vec<NextAction>,
    pub repurpose_plan: Option<RepurposePlan>,
}
