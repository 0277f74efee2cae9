//! Competitor benchmark scorer.
//!
//! Compares the creator's engagement to a sampled competitor population
//! for the same format. Small samples degrade confidence but never
//! block: a score is always returned. The benchmark snapshot used is
//! echoed into the output for auditability.

use prescore_core::config::SourceConfig;
use prescore_core::types::{BenchmarkSample, CompetitorScore, Confidence, PlatformMetrics};

/// Engagement ratio that maps to the score midpoint.
const MIDPOINT: f64 = 50.0;

/// Score floor/cap: a benchmark comparison alone should never claim
/// certainty at either extreme.
const FLOOR: f64 = 5.0;
const CAP: f64 = 95.0;

/// Score relative standing against the benchmark population.
///
/// With creator metrics: the creator's engagement rate is normalized
/// against the population average (ratio 1.0 lands at the midpoint).
/// Without them: a difficulty-adjusted midpoint, capped at medium
/// confidence.
pub fn score(
    benchmark: &BenchmarkSample,
    creator_metrics: Option<&PlatformMetrics>,
    config: &SourceConfig,
) -> CompetitorScore {
    let (raw, base_confidence) = match creator_metrics {
        Some(metrics) if benchmark.avg_engagement_rate > 0.0 => {
            let ratio = metrics.engagement_rate() / benchmark.avg_engagement_rate;
            (MIDPOINT * ratio, Confidence::High)
        }
        // No creator metrics, or a degenerate population average:
        // estimate standing from niche difficulty alone.
        _ => {
            let raw = MIDPOINT - (benchmark.difficulty_score - 50.0) * 0.2;
            (raw, Confidence::Medium)
        }
    };

    let confidence = if benchmark.sample_size < config.min_benchmark_sample {
        tracing::debug!(
            sample_size = benchmark.sample_size,
            minimum = config.min_benchmark_sample,
            "benchmark sample below minimum; degrading competitor confidence"
        );
        Confidence::Low
    } else {
        base_confidence
    };

    CompetitorScore {
        score: raw.clamp(FLOOR, CAP),
        confidence,
        benchmark: benchmark.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(sample_size: u32) -> BenchmarkSample {
        BenchmarkSample {
            sample_size,
            competitor_count: 8,
            avg_views: 12_000.0,
            avg_like_rate: 0.04,
            avg_comment_rate: 0.01,
            avg_engagement_rate: 0.05,
            difficulty_score: 50.0,
        }
    }

    fn metrics(rate_scale: u64) -> PlatformMetrics {
        PlatformMetrics {
            views: 1000,
            likes: rate_scale,
            comments: 0,
            shares: 0,
            saves: 0,
            watch_time_seconds: 0.0,
        }
    }

    #[test]
    fn test_at_population_average_scores_midpoint() {
        // engagement_rate = 50/1000 = 0.05 == avg.
        let s = score(&sample(20), Some(&metrics(50)), &SourceConfig::default());
        assert!((s.score - 50.0).abs() < 1e-9);
        assert_eq!(s.confidence, Confidence::High);
    }

    #[test]
    fn test_above_average_scores_higher() {
        let above = score(&sample(20), Some(&metrics(100)), &SourceConfig::default());
        let below = score(&sample(20), Some(&metrics(20)), &SourceConfig::default());
        assert!(above.score > 50.0);
        assert!(below.score < 50.0);
    }

    #[test]
    fn test_small_sample_degrades_confidence_not_score() {
        let s = score(&sample(2), Some(&metrics(50)), &SourceConfig::default());
        assert_eq!(s.confidence, Confidence::Low);
        assert!((s.score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_creator_metrics_caps_at_medium() {
        let s = score(&sample(20), None, &SourceConfig::default());
        assert_eq!(s.confidence, Confidence::Medium);
        assert!((s.score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_difficulty_shifts_fallback_score() {
        let mut hard = sample(20);
        hard.difficulty_score = 90.0;
        let s = score(&hard, None, &SourceConfig::default());
        assert!(s.score < 50.0);
    }

    #[test]
    fn test_score_floored_and_capped() {
        let huge = score(&sample(20), Some(&metrics(900)), &SourceConfig::default());
        assert_eq!(huge.score, 95.0);
        let mut dead = sample(20);
        dead.difficulty_score = 100.0;
        let zero = score(&dead, Some(&metrics(0)), &SourceConfig::default());
        assert_eq!(zero.score, 5.0);
    }

    #[test]
    fn test_benchmark_snapshot_echoed() {
        let b = sample(20);
        let s = score(&b, None, &SourceConfig::default());
        assert_eq!(s.benchmark, b);
    }
}
