//! Normalizes raw detector readings to 0-100 scores.
//!
//! Monotonic decay for time_to_value and dead_zones; bell-shaped
//! (trapezoid) ideal-range mapping for open_loops and
//! pattern_interrupts; discrete lookup for cta_style. Every score
//! clamps to [0, 100].

use prescore_core::config::{DetectorTargets, DetectorWeights, IdealRange};
use prescore_core::types::{Assessment, CtaStyle, DetectorReading, DetectorScore};

/// Score outside the hard bounds of an ideal range.
const RANGE_FLOOR: f64 = 20.0;

/// Dead-zone score above which pacing counts as tight.
const TIGHT_THRESHOLD: f64 = 70.0;

/// Score all five readings. Order of the output follows the input,
/// which extraction produces in detector declaration order.
pub fn score_all(
    readings: &[DetectorReading; 5],
    duration_seconds: f64,
    targets: &DetectorTargets,
    weights: &DetectorWeights,
) -> Vec<DetectorScore> {
    readings
        .iter()
        .map(|reading| score_reading(reading, duration_seconds, targets, weights))
        .collect()
}

/// Weighted sum of detector scores. Weights sum to 1.0 (validated at
/// config load), so the result stays in [0, 100].
pub fn weighted_score(scores: &[DetectorScore]) -> f64 {
    scores.iter().map(|s| s.score * s.weight).sum()
}

fn score_reading(
    reading: &DetectorReading,
    duration_seconds: f64,
    targets: &DetectorTargets,
    weights: &DetectorWeights,
) -> DetectorScore {
    let (score, assessment) = match reading {
        DetectorReading::TimeToValue { seconds } => {
            time_to_value(*seconds, duration_seconds, targets)
        }
        DetectorReading::OpenLoops { count, .. } => {
            ideal_range(*count as f64, &targets.open_loops)
        }
        DetectorReading::PatternInterrupts { per_minute, .. } => {
            ideal_range(*per_minute, &targets.interrupts_per_minute)
        }
        DetectorReading::DeadZones { total_seconds, .. } => {
            dead_zones(*total_seconds, duration_seconds, targets)
        }
        DetectorReading::CtaStyle { style, .. } => cta_style(*style, targets),
    };

    let detector = reading.detector();
    DetectorScore {
        detector,
        reading: reading.clone(),
        score: score.clamp(0.0, 100.0),
        target_score: targets.target_scores.get(detector),
        weight: weights.get(detector),
        assessment,
    }
}

/// 100 at or under target, then hyperbolic decay: score = 100 * t / s.
/// Monotonically non-increasing in seconds. Zero duration means no
/// value was ever delivered, which is worst case.
fn time_to_value(seconds: f64, duration_seconds: f64, targets: &DetectorTargets) -> (f64, Assessment) {
    if duration_seconds <= 0.0 {
        return (0.0, Assessment::Slow);
    }
    let target = targets.time_to_value_target_s;
    let score = if seconds <= target {
        100.0
    } else {
        100.0 * target / seconds
    };
    let assessment = if seconds <= targets.time_to_value_fast_below_s {
        Assessment::Fast
    } else if seconds > targets.time_to_value_slow_above_s {
        Assessment::Slow
    } else {
        Assessment::Moderate
    };
    (score, assessment)
}

/// Trapezoid mapping: full score inside [ideal_low, ideal_high], linear
/// falloff toward the hard bounds, floor at or beyond them. Decreases
/// both below the band (too flat) and above it (too chaotic).
fn ideal_range(value: f64, range: &IdealRange) -> (f64, Assessment) {
    if value < range.ideal_low {
        let score = if value <= range.min || range.ideal_low <= range.min {
            RANGE_FLOOR
        } else {
            let t = (value - range.min) / (range.ideal_low - range.min);
            RANGE_FLOOR + (100.0 - RANGE_FLOOR) * t
        };
        (score, Assessment::TooFlat)
    } else if value > range.ideal_high {
        let score = if value >= range.max || range.max <= range.ideal_high {
            RANGE_FLOOR
        } else {
            let t = (range.max - value) / (range.max - range.ideal_high);
            RANGE_FLOOR + (100.0 - RANGE_FLOOR) * t
        };
        (score, Assessment::TooChaotic)
    } else {
        (100.0, Assessment::Balanced)
    }
}

/// Monotonic decrease with dead-zone share of duration. Zero duration
/// is worst case.
fn dead_zones(
    total_seconds: f64,
    duration_seconds: f64,
    targets: &DetectorTargets,
) -> (f64, Assessment) {
    let fraction = if duration_seconds > 0.0 {
        (total_seconds / duration_seconds).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let score = 100.0 * (1.0 - fraction / targets.dead_zone_max_fraction);
    let assessment = if score >= TIGHT_THRESHOLD {
        Assessment::Tight
    } else {
        Assessment::Leaky
    };
    (score, assessment)
}

fn cta_style(style: CtaStyle, targets: &DetectorTargets) -> (f64, Assessment) {
    match style {
        CtaStyle::DirectAsk => (targets.cta_scores.direct_ask, Assessment::Strong),
        CtaStyle::SoftSuggestion => (targets.cta_scores.soft_suggestion, Assessment::Weak),
        CtaStyle::None => (targets.cta_scores.none, Assessment::Missing),
    }
}
