//! Top-level engine configuration: compiled defaults, TOML loading,
//! eager validation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::detector_config::{
    DetectorTargets, DetectorWeights, FormatTable, WEIGHT_SUM_TOLERANCE,
};
use crate::errors::ConfigError;
use crate::types::content::FormatType;

/// Scoring, ranking, and banding knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Fraction of the theoretical gap a fix is expected to realize.
    pub realizability_factor: f64,
    /// Priority-score thresholds for the 4-level severity ordinal.
    pub severity_critical_at: f64,
    pub severity_high_at: f64,
    pub severity_medium_at: f64,
    /// Likelihood-band cut points on the combined score.
    pub band_low_cut: f64,
    pub band_high_cut: f64,
    /// Maximum prescriptive actions emitted per prediction.
    pub max_next_actions: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            realizability_factor: 0.6,
            severity_critical_at: 12.0,
            severity_high_at: 7.0,
            severity_medium_at: 3.0,
            band_low_cut: 40.0,
            band_high_cut: 70.0,
            max_next_actions: 3,
        }
    }
}

/// Blend weights and sample-sufficiency minimums for the three scoring
/// sources.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Blend weights; renormalized at call time over present sources.
    pub platform_weight: f64,
    pub competitor_weight: f64,
    pub historical_weight: f64,
    /// Below this, the competitor source is low-confidence.
    pub min_benchmark_sample: u32,
    /// Below this, the historical source is flagged insufficient.
    pub min_history_sample: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            platform_weight: 0.45,
            competitor_weight: 0.30,
            historical_weight: 0.25,
            min_benchmark_sample: 10,
            min_history_sample: 5,
        }
    }
}

impl SourceConfig {
    pub fn weights_sum(&self) -> f64 {
        self.platform_weight + self.competitor_weight + self.historical_weight
    }
}

/// Rolling calibration window parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Most-recent records considered per (platform, format) key.
    pub window: usize,
    /// MAE difference between window halves below which the trend is
    /// "stable" (score points).
    pub trend_tolerance_points: f64,
    /// Exponential half-life (in records) for recency weighting of the
    /// historical score.
    pub recency_half_life: f64,
    /// Engagement rate that maps to a full engagement component when
    /// deriving an actual score from post-publish metrics.
    pub target_engagement_rate: f64,
    /// Mean retention that maps to a full retention component.
    pub target_retention: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            window: 50,
            trend_tolerance_points: 2.0,
            recency_half_life: 10.0,
            target_engagement_rate: 0.06,
            target_retention: 0.45,
        }
    }
}

/// Long-form to short-form repurposing suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepurposeConfig {
    pub enabled: bool,
    pub min_clip_s: f64,
    pub max_clip_s: f64,
    pub max_clips: usize,
}

impl Default for RepurposeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_clip_s: 15.0,
            max_clip_s: 60.0,
            max_clips: 3,
        }
    }
}

/// Top-level configuration aggregating all tables.
///
/// Loaded once per process; every table is validated eagerly so that a
/// misconfigured deployment fails at startup, never inside a scoring
/// call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub targets: FormatTable<DetectorTargets>,
    pub weights: FormatTable<DetectorWeights>,
    pub scoring: ScoringConfig,
    pub sources: SourceConfig,
    pub calibration: CalibrationConfig,
    pub repurpose: RepurposeConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            targets: FormatTable::default(),
            weights: FormatTable::default(),
            scoring: ScoringConfig::default(),
            sources: SourceConfig::default(),
            calibration: CalibrationConfig::default(),
            repurpose: RepurposeConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Compiled defaults, pre-validated.
    pub fn defaults() -> Self {
        Self::default()
    }

    /// Load from a TOML file. Unknown keys are ignored
    /// (forward-compatible); missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let path_str = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound { path: path_str.clone() }
            } else {
                ConfigError::ReadFailed {
                    path: path_str.clone(),
                    message: e.to_string(),
                }
            }
        })?;
        let overlay: toml::Value =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;
        Self::from_overlay(overlay, &path_str)
    }

    /// Parse from a TOML string (tests, embedded config).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let overlay: toml::Value =
            toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
                path: "<string>".to_string(),
                message: e.to_string(),
            })?;
        Self::from_overlay(overlay, "<string>")
    }

    /// Overlay parsed TOML onto the compiled defaults key by key, so a
    /// partial override of one knob never resets its neighbors to some
    /// other table's defaults (per-format tables included).
    fn from_overlay(overlay: toml::Value, path: &str) -> Result<Self, ConfigError> {
        let mut merged =
            toml::Value::try_from(Self::default()).map_err(|e| ConfigError::ParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        merge_value(&mut merged, overlay);
        let config: EngineConfig = merged.try_into().map_err(|e: toml::de::Error| {
            ConfigError::ParseError {
                path: path.to_string(),
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Targets for a format (Unknown resolves to long-form).
    pub fn targets_for(&self, format_type: FormatType) -> &DetectorTargets {
        self.targets.get(format_type)
    }

    /// Weights for a format (Unknown resolves to long-form).
    pub fn weights_for(&self, format_type: FormatType) -> &DetectorWeights {
        self.weights.get(format_type)
    }

    /// Validate every table. Called by `load`/`from_toml`; call directly
    /// after programmatic construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.targets.short_form.validate("targets.short_form")?;
        self.targets.long_form.validate("targets.long_form")?;
        self.weights.short_form.validate("short_form")?;
        self.weights.long_form.validate("long_form")?;

        let source_sum = self.sources.weights_sum();
        if !source_sum.is_finite() || (source_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSumMismatch {
                format: "sources".to_string(),
                sum: source_sum,
                tolerance: WEIGHT_SUM_TOLERANCE,
            });
        }
        if !(0.0..1.0).contains(&self.scoring.realizability_factor)
            || self.scoring.realizability_factor <= 0.0
        {
            return Err(ConfigError::ValidationFailed {
                field: "scoring.realizability_factor".to_string(),
                message: "must be in (0.0, 1.0)".to_string(),
            });
        }
        let cuts_ok = self.scoring.band_low_cut > 0.0
            && self.scoring.band_low_cut < self.scoring.band_high_cut
            && self.scoring.band_high_cut < 100.0;
        if !cuts_ok {
            return Err(ConfigError::ValidationFailed {
                field: "scoring.band_low_cut".to_string(),
                message: "cut points must satisfy 0 < low < high < 100".to_string(),
            });
        }
        let sev_ok = self.scoring.severity_critical_at > self.scoring.severity_high_at
            && self.scoring.severity_high_at > self.scoring.severity_medium_at
            && self.scoring.severity_medium_at > 0.0;
        if !sev_ok {
            return Err(ConfigError::ValidationFailed {
                field: "scoring.severity_critical_at".to_string(),
                message: "severity thresholds must satisfy critical > high > medium > 0"
                    .to_string(),
            });
        }
        if self.calibration.window < 2 {
            return Err(ConfigError::ValidationFailed {
                field: "calibration.window".to_string(),
                message: "must be >= 2".to_string(),
            });
        }
        if self.calibration.recency_half_life <= 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "calibration.recency_half_life".to_string(),
                message: "must be > 0".to_string(),
            });
        }
        if self.calibration.target_engagement_rate <= 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "calibration.target_engagement_rate".to_string(),
                message: "must be > 0".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.calibration.target_retention)
            || self.calibration.target_retention == 0.0
        {
            return Err(ConfigError::ValidationFailed {
                field: "calibration.target_retention".to_string(),
                message: "must be in (0.0, 1.0]".to_string(),
            });
        }
        if self.repurpose.min_clip_s <= 0.0 || self.repurpose.min_clip_s > self.repurpose.max_clip_s
        {
            return Err(ConfigError::ValidationFailed {
                field: "repurpose.min_clip_s".to_string(),
                message: "must satisfy 0 < min_clip_s <= max_clip_s".to_string(),
            });
        }
        Ok(())
    }
}

/// Recursive table merge: overlay values win, tables merge key-wise.
fn merge_value(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge_value(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
