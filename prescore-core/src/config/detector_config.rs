//! Per-format detector targets and static importance weights.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::types::content::FormatType;
use crate::types::prediction::DetectorKey;

/// Bounds for a bell-shaped (trapezoid) ideal-range mapping.
///
/// Full score inside [ideal_low, ideal_high], linear falloff toward the
/// hard bounds, floor at/beyond them. The exact ideal bands are a
/// tuning decision pending calibration data, which is why they are
/// configuration rather than literals in the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdealRange {
    pub min: f64,
    pub ideal_low: f64,
    pub ideal_high: f64,
    pub max: f64,
}

impl IdealRange {
    pub fn new(min: f64, ideal_low: f64, ideal_high: f64, max: f64) -> Self {
        Self {
            min,
            ideal_low,
            ideal_high,
            max,
        }
    }

    pub fn validate(&self, field: &str) -> Result<(), ConfigError> {
        let ordered = self.min <= self.ideal_low
            && self.ideal_low <= self.ideal_high
            && self.ideal_high <= self.max;
        let finite = self.min.is_finite()
            && self.ideal_low.is_finite()
            && self.ideal_high.is_finite()
            && self.max.is_finite();
        if !ordered || !finite {
            return Err(ConfigError::ValidationFailed {
                field: field.to_string(),
                message: "bounds must be finite and ordered: min <= ideal_low <= ideal_high <= max"
                    .to_string(),
            });
        }
        Ok(())
    }
}

/// Discrete score lookup for CTA styles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CtaScores {
    pub direct_ask: f64,
    pub soft_suggestion: f64,
    pub none: f64,
}

impl Default for CtaScores {
    fn default() -> Self {
        Self {
            direct_ask: 100.0,
            soft_suggestion: 70.0,
            none: 20.0,
        }
    }
}

/// Target values and thresholds for one format type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorTargets {
    /// Seconds by which the core value should land.
    pub time_to_value_target_s: f64,
    /// Assessment bucket thresholds: <= fast_below_s is "fast",
    /// > slow_above_s is "slow", in between is "moderate".
    pub time_to_value_fast_below_s: f64,
    pub time_to_value_slow_above_s: f64,
    /// Ideal open-loop count band.
    pub open_loops: IdealRange,
    /// Ideal pattern-interrupt rate band (per minute).
    pub interrupts_per_minute: IdealRange,
    /// Minimum span for a gap to count as a dead zone.
    pub dead_zone_min_span_s: f64,
    /// Fraction of total duration at which dead-zone score reaches 0.
    pub dead_zone_max_fraction: f64,
    /// Terminal window scanned for a CTA.
    pub cta_window_s: f64,
    pub cta_scores: CtaScores,
    /// Per-detector target scores used as the ranking baseline.
    pub target_scores: TargetScores,
}

/// Per-detector 0-100 target scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetScores {
    pub time_to_value: f64,
    pub open_loops: f64,
    pub dead_zones: f64,
    pub pattern_interrupts: f64,
    pub cta_style: f64,
}

impl Default for TargetScores {
    fn default() -> Self {
        Self {
            time_to_value: 90.0,
            open_loops: 80.0,
            dead_zones: 85.0,
            pattern_interrupts: 75.0,
            cta_style: 80.0,
        }
    }
}

impl TargetScores {
    pub fn get(&self, key: DetectorKey) -> f64 {
        match key {
            DetectorKey::TimeToValue => self.time_to_value,
            DetectorKey::OpenLoops => self.open_loops,
            DetectorKey::DeadZones => self.dead_zones,
            DetectorKey::PatternInterrupts => self.pattern_interrupts,
            DetectorKey::CtaStyle => self.cta_style,
        }
    }
}

impl DetectorTargets {
    /// Defaults for short-form content: value within 5s, 1-3 open loops,
    /// 8-14 interrupts/min, CTA in the last 10s.
    pub fn short_form_defaults() -> Self {
        Self {
            time_to_value_target_s: 5.0,
            time_to_value_fast_below_s: 5.0,
            time_to_value_slow_above_s: 12.0,
            open_loops: IdealRange::new(0.0, 1.0, 3.0, 6.0),
            interrupts_per_minute: IdealRange::new(0.0, 8.0, 14.0, 30.0),
            dead_zone_min_span_s: 4.0,
            dead_zone_max_fraction: 0.5,
            cta_window_s: 10.0,
            cta_scores: CtaScores::default(),
            target_scores: TargetScores::default(),
        }
    }

    /// Defaults for long-form content: value within 30s, 2-5 open loops,
    /// 3-7 interrupts/min, CTA in the last 30s.
    pub fn long_form_defaults() -> Self {
        Self {
            time_to_value_target_s: 30.0,
            time_to_value_fast_below_s: 30.0,
            time_to_value_slow_above_s: 75.0,
            open_loops: IdealRange::new(0.0, 2.0, 5.0, 10.0),
            interrupts_per_minute: IdealRange::new(0.0, 3.0, 7.0, 15.0),
            dead_zone_min_span_s: 4.0,
            dead_zone_max_fraction: 0.5,
            cta_window_s: 30.0,
            cta_scores: CtaScores {
                direct_ask: 90.0,
                soft_suggestion: 80.0,
                none: 30.0,
            },
            target_scores: TargetScores::default(),
        }
    }

    pub fn validate(&self, prefix: &str) -> Result<(), ConfigError> {
        if self.time_to_value_target_s <= 0.0 || !self.time_to_value_target_s.is_finite() {
            return Err(ConfigError::ValidationFailed {
                field: format!("{prefix}.time_to_value_target_s"),
                message: "must be finite and > 0".to_string(),
            });
        }
        if self.time_to_value_fast_below_s > self.time_to_value_slow_above_s {
            return Err(ConfigError::ValidationFailed {
                field: format!("{prefix}.time_to_value_fast_below_s"),
                message: "fast threshold must not exceed slow threshold".to_string(),
            });
        }
        self.open_loops.validate(&format!("{prefix}.open_loops"))?;
        self.interrupts_per_minute
            .validate(&format!("{prefix}.interrupts_per_minute"))?;
        if self.dead_zone_min_span_s < 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: format!("{prefix}.dead_zone_min_span_s"),
                message: "must be >= 0".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.dead_zone_max_fraction)
            || self.dead_zone_max_fraction == 0.0
        {
            return Err(ConfigError::ValidationFailed {
                field: format!("{prefix}.dead_zone_max_fraction"),
                message: "must be in (0.0, 1.0]".to_string(),
            });
        }
        if self.cta_window_s <= 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: format!("{prefix}.cta_window_s"),
                message: "must be > 0".to_string(),
            });
        }
        for (name, v) in [
            ("direct_ask", self.cta_scores.direct_ask),
            ("soft_suggestion", self.cta_scores.soft_suggestion),
            ("none", self.cta_scores.none),
        ] {
            if !(0.0..=100.0).contains(&v) {
                return Err(ConfigError::ValidationFailed {
                    field: format!("{prefix}.cta_scores.{name}"),
                    message: "must be in [0, 100]".to_string(),
                });
            }
        }
        for key in DetectorKey::ALL {
            let v = self.target_scores.get(key);
            if !(0.0..=100.0).contains(&v) {
                return Err(ConfigError::ValidationFailed {
                    field: format!("{prefix}.target_scores.{key}"),
                    message: "must be in [0, 100]".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for DetectorTargets {
    fn default() -> Self {
        Self::long_form_defaults()
    }
}

/// Static importance weights for the five detectors. Must sum to 1.0
/// within 1e-6 — validated at configuration load so misconfiguration
/// fails fast, never mid-call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorWeights {
    pub time_to_value: f64,
    pub open_loops: f64,
    pub dead_zones: f64,
    pub pattern_interrupts: f64,
    pub cta_style: f64,
}

/// Weight-sum tolerance shared by detector and source weight validation.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

impl DetectorWeights {
    pub fn short_form_defaults() -> Self {
        Self {
            time_to_value: 0.30,
            open_loops: 0.20,
            dead_zones: 0.20,
            pattern_interrupts: 0.20,
            cta_style: 0.10,
        }
    }

    pub fn long_form_defaults() -> Self {
        Self {
            time_to_value: 0.25,
            open_loops: 0.20,
            dead_zones: 0.25,
            pattern_interrupts: 0.15,
            cta_style: 0.15,
        }
    }

    pub fn get(&self, key: DetectorKey) -> f64 {
        match key {
            DetectorKey::TimeToValue => self.time_to_value,
            DetectorKey::OpenLoops => self.open_loops,
            DetectorKey::DeadZones => self.dead_zones,
            DetectorKey::PatternInterrupts => self.pattern_interrupts,
            DetectorKey::CtaStyle => self.cta_style,
        }
    }

    pub fn sum(&self) -> f64 {
        self.time_to_value
            + self.open_loops
            + self.dead_zones
            + self.pattern_interrupts
            + self.cta_style
    }

    pub fn validate(&self, format: &str) -> Result<(), ConfigError> {
        let sum = self.sum();
        if !sum.is_finite() || (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSumMismatch {
                format: format.to_string(),
                sum,
                tolerance: WEIGHT_SUM_TOLERANCE,
            });
        }
        Ok(())
    }
}

impl Default for DetectorWeights {
    fn default() -> Self {
        Self::long_form_defaults()
    }
}

/// A per-format table of T with the Unknown format falling back to the
/// long-form (more lenient) entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>, FormatTable<T>: Default"))]
pub struct FormatTable<T> {
    pub short_form: T,
    pub long_form: T,
}

// Each concrete table defaults per format rather than via T: Default,
// so a programmatically constructed table starts from the right values
// for both formats.
impl Default for FormatTable<DetectorTargets> {
    fn default() -> Self {
        Self {
            short_form: DetectorTargets::short_form_defaults(),
            long_form: DetectorTargets::long_form_defaults(),
        }
    }
}

impl Default for FormatTable<DetectorWeights> {
    fn default() -> Self {
        Self {
            short_form: DetectorWeights::short_form_defaults(),
            long_form: DetectorWeights::long_form_defaults(),
        }
    }
}

impl<T> FormatTable<T> {
    pub fn get(&self, format_type: FormatType) -> &T {
        match format_type {
            FormatType::ShortForm => &self.short_form,
            FormatType::LongForm | FormatType::Unknown => &self.long_form,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!(DetectorWeights::short_form_defaults().validate("short_form").is_ok());
        assert!(DetectorWeights::long_form_defaults().validate("long_form").is_ok());
    }

    #[test]
    fn test_bad_weight_sum_rejected() {
        let mut w = DetectorWeights::short_form_defaults();
        w.cta_style += 0.05;
        assert!(matches!(
            w.validate("short_form"),
            Err(ConfigError::WeightSumMismatch { .. })
        ));
    }

    #[test]
    fn test_ideal_range_ordering_enforced() {
        let r = IdealRange::new(0.0, 5.0, 3.0, 10.0);
        assert!(r.validate("x").is_err());
        let r = IdealRange::new(0.0, 1.0, 3.0, 6.0);
        assert!(r.validate("x").is_ok());
    }

    #[test]
    fn test_unknown_format_uses_long_form_table() {
        let table = FormatTable {
            short_form: 1u8,
            long_form: 2u8,
        };
        assert_eq!(*table.get(FormatType::Unknown), 2);
        assert_eq!(*table.get(FormatType::ShortForm), 1);
    }

    #[test]
    fn test_targets_defaults_validate() {
        assert!(DetectorTargets::short_form_defaults().validate("short").is_ok());
        assert!(DetectorTargets::long_form_defaults().validate("long").is_ok());
    }
}
