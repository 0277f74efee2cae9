//! Detector ranker: orders detectors by improvement opportunity and
//! emits prescriptive next actions.

use prescore_core::config::ScoringConfig;
use prescore_core::types::prediction::Evidence;
use prescore_core::types::{
    Assessment, CtaStyle, DetectorKey, DetectorReading, DetectorScore, NextAction,
    RankedDetector, Severity,
};

/// Ranking plus the top prescriptive actions.
#[derive(Debug, Clone)]
pub struct RankedOutput {
    pub rankings: Vec<RankedDetector>,
    pub next_actions: Vec<NextAction>,
}

/// Rank detectors by `gap * weight` descending. Ties break by detector
/// declaration order so rank assignment is stable across runs.
pub fn rank(scores: &[DetectorScore], config: &ScoringConfig) -> RankedOutput {
    let mut ordered: Vec<&DetectorScore> = scores.iter().collect();
    ordered.sort_by(|a, b| {
        let pa = priority(a);
        let pb = priority(b);
        pb.total_cmp(&pa)
            .then_with(|| a.detector.order().cmp(&b.detector.order()))
    });

    let rankings: Vec<RankedDetector> = ordered
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let gap = gap(s);
            let priority_score = gap * s.weight;
            RankedDetector {
                detector: s.detector,
                rank: i as u32 + 1,
                severity: severity(priority_score, config),
                gap,
                priority_score,
                estimated_lift_points: priority_score * config.realizability_factor,
            }
        })
        .collect();

    let next_actions: Vec<NextAction> = ordered
        .iter()
        .filter(|s| gap(s) > 0.0)
        .take(config.max_next_actions)
        .map(|s| build_action(s))
        .collect();

    RankedOutput {
        rankings,
        next_actions,
    }
}

fn gap(s: &DetectorScore) -> f64 {
    (s.target_score - s.score).max(0.0)
}

fn priority(s: &DetectorScore) -> f64 {
    gap(s) * s.weight
}

fn severity(priority_score: f64, config: &ScoringConfig) -> Severity {
    if priority_score >= config.severity_critical_at {
        Severity::Critical
    } else if priority_score >= config.severity_high_at {
        Severity::High
    } else if priority_score >= config.severity_medium_at {
        Severity::Medium
    } else {
        Severity::Low
    }
}

fn build_action(s: &DetectorScore) -> NextAction {
    let (title, why, execution_steps) = action_text(s);
    NextAction {
        detector: s.detector,
        title,
        why,
        execution_steps,
        evidence: evidence(&s.reading),
    }
}

fn action_text(s: &DetectorScore) -> (String, String, Vec<String>) {
    match (&s.reading, s.assessment) {
        (DetectorReading::TimeToValue { seconds }, _) => (
            "Deliver the payoff sooner".to_string(),
            format!(
                "Viewers decide in the first seconds; the core value currently lands at {seconds:.1}s."
            ),
            vec![
                "Move the main claim or result into the opening".to_string(),
                "Cut or compress the setup before the first value segment".to_string(),
                "Tease the outcome in the first line".to_string(),
            ],
        ),
        (DetectorReading::OpenLoops { count, .. }, Assessment::TooChaotic) => (
            "Resolve some open loops".to_string(),
            format!("{count} unresolved curiosity gaps is more than viewers will track."),
            vec![
                "Pay off the strongest loop mid-video".to_string(),
                "Cut loops that never resolve".to_string(),
            ],
        ),
        (DetectorReading::OpenLoops { count, .. }, _) => (
            "Seed a curiosity gap".to_string(),
            format!("Only {count} open loop(s); nothing pulls viewers toward the end."),
            vec![
                "Pose a question early that resolves near the end".to_string(),
                "Reference a later reveal while delivering early value".to_string(),
            ],
        ),
        (
            DetectorReading::DeadZones {
                zones,
                total_seconds,
            },
            _,
        ) => (
            "Tighten the dead zones".to_string(),
            format!(
                "{total_seconds:.1}s across {} span(s) carry no hook, value, proof, or CTA.",
                zones.len()
            ),
            vec![
                "Trim or cut each flagged span".to_string(),
                "Insert proof or a pacing change where cutting is impossible".to_string(),
            ],
        ),
        (DetectorReading::PatternInterrupts { per_minute, .. }, Assessment::TooChaotic) => (
            "Calm the pacing".to_string(),
            format!("{per_minute:.1} interrupts/min reads as chaotic rather than dynamic."),
            vec!["Remove interrupts that do not mark a genuine turn".to_string()],
        ),
        (DetectorReading::PatternInterrupts { per_minute, .. }, _) => (
            "Vary the pacing".to_string(),
            format!("{per_minute:.1} interrupts/min is too flat to hold attention."),
            vec![
                "Add a visual or tonal shift at each section boundary".to_string(),
                "Break long explanations with a quick demonstration".to_string(),
            ],
        ),
        (
            DetectorReading::CtaStyle {
                style,
                window_seconds,
            },
            _,
        ) => (
            "End with a direct ask".to_string(),
            match style {
                CtaStyle::None => {
                    format!("No call-to-action inside the final {window_seconds:.0}s.")
                }
                _ => format!(
                    "The closing CTA is a {} rather than a direct ask.",
                    style.name()
                ),
            },
            vec![
                "Close with one specific, imperative ask".to_string(),
                "Tie the ask to the value just delivered".to_string(),
            ],
        ),
    }
}

/// Supporting evidence strings pulled from the underlying reading.
fn evidence(reading: &DetectorReading) -> Evidence {
    let mut out = Evidence::new();
    match reading {
        DetectorReading::TimeToValue { seconds } => {
            out.push(format!("first value segment at {seconds:.1}s"));
        }
        DetectorReading::OpenLoops { count, examples } => {
            if examples.is_empty() {
                out.push(format!("{count} open loop(s) detected"));
            }
            for e in examples.iter().take(3) {
                out.push(format!("\"{e}\""));
            }
        }
        DetectorReading::DeadZones { zones, .. } => {
            for z in zones.iter().take(3) {
                out.push(format!(
                    "{:.1}s-{:.1}s ({:.1}s dead)",
                    z.start_s, z.end_s, z.duration_s
                ));
            }
        }
        DetectorReading::PatternInterrupts { count, per_minute } => {
            out.push(format!("{count} interrupts ({per_minute:.1}/min)"));
        }
        DetectorReading::CtaStyle {
            style,
            window_seconds,
        } => {
            out.push(format!(
                "terminal {window_seconds:.0}s window: {}",
                style.name()
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use prescore_core::config::ScoringConfig;

    fn ds(detector: DetectorKey, score: f64, target: f64, weight: f64) -> DetectorScore {
        DetectorScore {
            detector,
            reading: DetectorReading::TimeToValue { seconds: 0.0 },
            score,
            target_score: target,
            weight,
            assessment: Assessment::Moderate,
        }
    }

    #[test]
    fn test_rank_orders_by_priority() {
        let config = ScoringConfig::default();
        let scores = vec![
            ds(DetectorKey::TimeToValue, 80.0, 90.0, 0.30), // gap 10, prio 3.0
            ds(DetectorKey::DeadZones, 30.0, 85.0, 0.20),   // gap 55, prio 11.0
            ds(DetectorKey::CtaStyle, 20.0, 80.0, 0.10),    // gap 60, prio 6.0
        ];
        let out = rank(&scores, &config);
        assert_eq!(out.rankings[0].detector, DetectorKey::DeadZones);
        assert_eq!(out.rankings[0].rank, 1);
        assert_eq!(out.rankings[1].detector, DetectorKey::CtaStyle);
        assert_eq!(out.rankings[2].detector, DetectorKey::TimeToValue);
    }

    #[test]
    fn test_ties_break_by_declaration_order() {
        let config = ScoringConfig::default();
        // Identical gap and weight: CtaStyle vs OpenLoops.
        let scores = vec![
            ds(DetectorKey::CtaStyle, 50.0, 80.0, 0.20),
            ds(DetectorKey::OpenLoops, 50.0, 80.0, 0.20),
        ];
        let a = rank(&scores, &config);
        let reversed: Vec<DetectorScore> = scores.iter().rev().cloned().collect();
        let b = rank(&reversed, &config);
        // OpenLoops declares before CtaStyle, so it wins the tie in
        // both orderings.
        assert_eq!(a.rankings[0].detector, DetectorKey::OpenLoops);
        assert_eq!(b.rankings[0].detector, DetectorKey::OpenLoops);
    }

    #[test]
    fn test_no_gap_means_no_actions() {
        let config = ScoringConfig::default();
        let scores = vec![ds(DetectorKey::TimeToValue, 95.0, 90.0, 0.30)];
        let out = rank(&scores, &config);
        assert!(out.next_actions.is_empty());
        assert_eq!(out.rankings[0].gap, 0.0);
        assert_eq!(out.rankings[0].severity, Severity::Low);
    }

    #[test]
    fn test_lift_is_discounted_gap() {
        let config = ScoringConfig::default();
        let scores = vec![ds(DetectorKey::DeadZones, 35.0, 85.0, 0.20)];
        let out = rank(&scores, &config);
        let r = &out.rankings[0];
        assert!((r.priority_score - 10.0).abs() < 1e-9);
        assert!((r.estimated_lift_points - 6.0).abs() < 1e-9);
        assert!(r.estimated_lift_points < r.gap);
    }

    #[test]
    fn test_severity_thresholds() {
        let config = ScoringConfig::default();
        assert_eq!(severity(12.0, &config), Severity::Critical);
        assert_eq!(severity(7.0, &config), Severity::High);
        assert_eq!(severity(3.0, &config), Severity::Medium);
        assert_eq!(severity(2.9, &config), Severity::Low);
    }

    #[test]
    fn test_actions_capped_at_three() {
        let config = ScoringConfig::default();
        let scores: Vec<DetectorScore> = DetectorKey::ALL
            .iter()
            .map(|&k| ds(k, 10.0, 90.0, 0.20))
            .collect();
        let out = rank(&scores, &config);
        assert_eq!(out.next_actions.len(), 3);
        assert_eq!(out.rankings.len(), 5);
    }
}
