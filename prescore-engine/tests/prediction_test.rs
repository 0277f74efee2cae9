//! End-to-end prediction scenarios through the public engine surface.

use prescore_core::config::EngineConfig;
use prescore_core::types::{
    Assessment, BenchmarkSample, Confidence, ContentUnit, DetectorKey, FormatType,
    PlatformMetrics, TranscriptSegment,
};
use prescore_engine::PrescoreEngine;

fn engine() -> PrescoreEngine {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    PrescoreEngine::new(EngineConfig::default()).unwrap()
}

/// 45s short-form with a strong structure: early hook, value at 3s,
/// proof, open loop, and a direct-ask CTA at the end.
fn strong_short() -> ContentUnit {
    ContentUnit {
        duration_seconds: 45.0,
        format_type: FormatType::ShortForm,
        transcript_segments: vec![
            TranscriptSegment::new(0.0, 3.0, "what if i told you the algorithm is wrong"),
            TranscriptSegment::new(3.0, 12.0, "here's how to fix it in one afternoon"),
            TranscriptSegment::new(12.0, 20.0, "for example, i tested this on three channels"),
            TranscriptSegment::new(20.0, 28.0, "more on that later, but watch this first"),
            TranscriptSegment::new(28.0, 40.0, "the key is consistency, works like this"),
            TranscriptSegment::new(40.0, 45.0, "subscribe and comment below with your results"),
        ],
        platform_metrics: Some(PlatformMetrics {
            views: 1000,
            likes: 40,
            comments: 5,
            shares: 3,
            saves: 2,
            watch_time_seconds: 30_000.0,
        }),
    }
}

fn benchmark(sample_size: u32) -> BenchmarkSample {
    BenchmarkSample {
        sample_size,
        competitor_count: 12,
        avg_views: 15_000.0,
        avg_like_rate: 0.04,
        avg_comment_rate: 0.008,
        avg_engagement_rate: 0.05,
        difficulty_score: 55.0,
    }
}

#[test]
fn test_fast_time_to_value_scenario() {
    let result = engine().score(&strong_short(), "youtube", None).unwrap();
    let ttv = result
        .platform_metrics
        .detector_scores
        .iter()
        .find(|s| s.detector == DetectorKey::TimeToValue)
        .unwrap();
    // Value lands at 3s against a 5s target.
    assert!(ttv.score >= 90.0);
    assert_eq!(ttv.assessment, Assessment::Fast);
}

#[test]
fn test_small_benchmark_degrades_combined_confidence() {
    let result = engine()
        .score(&strong_short(), "youtube", Some(&benchmark(2)))
        .unwrap();
    let competitor = result.competitor_metrics.as_ref().unwrap();
    assert_eq!(competitor.confidence, Confidence::Low);
    // Combined confidence downgraded to at most medium.
    assert_ne!(result.combined_metrics.confidence, Confidence::High);
    assert!(result
        .combined_metrics
        .insufficient_data_reasons
        .iter()
        .any(|r| r.contains("sample_size=2")));
}

#[test]
fn test_healthy_benchmark_echoed_for_audit() {
    let b = benchmark(25);
    let result = engine()
        .score(&strong_short(), "youtube", Some(&b))
        .unwrap();
    assert_eq!(result.competitor_metrics.unwrap().benchmark, b);
}

#[test]
fn test_rankings_cover_all_detectors_deterministically() {
    let e = engine();
    let a = e.score(&strong_short(), "youtube", Some(&benchmark(25))).unwrap();
    let b = e.score(&strong_short(), "youtube", Some(&benchmark(25))).unwrap();
    assert_eq!(a, b);

    let ranks: Vec<u32> = a.detector_rankings.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    for r in &a.detector_rankings {
        assert!(r.estimated_lift_points <= r.priority_score);
    }
}

#[test]
fn test_next_actions_carry_evidence() {
    // Weak structure: late value, no CTA, long dead stretch.
    let weak = ContentUnit {
        duration_seconds: 60.0,
        format_type: FormatType::ShortForm,
        transcript_segments: vec![
            TranscriptSegment::new(0.0, 40.0, "so anyway, some unrelated rambling"),
            TranscriptSegment::new(40.0, 50.0, "here's how to actually do it"),
        ],
        platform_metrics: None,
    };
    let result = engine().score(&weak, "youtube", None).unwrap();
    assert!(!result.next_actions.is_empty());
    for action in &result.next_actions {
        assert!(!action.title.is_empty());
        assert!(!action.why.is_empty());
        assert!(!action.execution_steps.is_empty());
        assert!(!action.evidence.is_empty());
    }
}

#[test]
fn test_long_form_gets_repurpose_plan() {
    let long = ContentUnit {
        duration_seconds: 600.0,
        format_type: FormatType::LongForm,
        transcript_segments: vec![
            TranscriptSegment::new(0.0, 20.0, "intro talk"),
            TranscriptSegment::new(120.0, 128.0, "nobody talks about this mistake"),
            TranscriptSegment::new(128.0, 150.0, "here's how you avoid it entirely"),
            TranscriptSegment::new(150.0, 165.0, "for example, the data shows a clear drop"),
        ],
        platform_metrics: None,
    };
    let result = engine().score(&long, "youtube", None).unwrap();
    let plan = result.repurpose_plan.expect("long-form with hooks gets a plan");
    assert!(!plan.clips.is_empty());
    assert!(plan.clips[0].start_s >= 120.0);
}

#[test]
fn test_short_form_never_gets_repurpose_plan() {
    let result = engine().score(&strong_short(), "youtube", None).unwrap();
    assert!(result.repurpose_plan.is_none());
}

#[test]
fn test_prediction_serializes_as_performance_prediction_payload() {
    let result = engine()
        .score(&strong_short(), "youtube", Some(&benchmark(25)))
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert!(json.get("combined_metrics").is_some());
    assert!(json.get("detector_rankings").is_some());
    assert_eq!(json["format_type"], "short_form");
    // Round-trip through the wire format.
    let restored: prescore_core::types::PredictionResult =
        serde_json::from_value(json).unwrap();
    assert_eq!(restored, result);
}

#[test]
fn test_unknown_format_scores_with_long_form_targets() {
    let mut unit = strong_short();
    unit.format_type = FormatType::Unknown;
    let result = engine().score(&unit, "youtube", None).unwrap();
    let ttv = result
        .platform_metrics
        .detector_scores
        .iter()
        .find(|s| s.detector == DetectorKey::TimeToValue)
        .unwrap();
    // 3s is fast against the 30s long-form target too.
    assert_eq!(ttv.assessment, Assessment::Fast);
}
