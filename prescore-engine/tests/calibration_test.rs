//! The full calibration loop: predictions, ingested outcomes, and the
//! historical source learning from them.

use prescore_core::config::EngineConfig;
use prescore_core::traits::CalibrationStore;
use prescore_core::types::{
    CalibrationRecord, Confidence, ContentUnit, FormatType, OutcomePayload, PlatformMetrics,
    TranscriptSegment, Trend,
};
use prescore_engine::PrescoreEngine;

fn engine() -> PrescoreEngine {
    PrescoreEngine::new(EngineConfig::default()).unwrap()
}

fn unit() -> ContentUnit {
    ContentUnit {
        duration_seconds: 45.0,
        format_type: FormatType::ShortForm,
        transcript_segments: vec![
            TranscriptSegment::new(0.0, 3.0, "here's how to get this done fast"),
            TranscriptSegment::new(3.0, 40.0, "for example, i tested it twice"),
            TranscriptSegment::new(40.0, 45.0, "subscribe for more"),
        ],
        platform_metrics: None,
    }
}

/// likes/views sets the engagement rate, which sets the actual score:
/// 24 likes on 1000 views is rate 0.024, 0.4 of target, score 40.
fn outcome(predicted: f64, likes: u64, posted_at: i64) -> OutcomePayload {
    OutcomePayload {
        platform: "youtube".to_string(),
        format_type: FormatType::ShortForm,
        actual_metrics: PlatformMetrics {
            views: 1000,
            likes,
            comments: 0,
            shares: 0,
            saves: 0,
            watch_time_seconds: 0.0,
        },
        retention_points: None,
        posted_at,
        predicted_score: predicted,
    }
}

#[test]
fn test_first_prediction_has_no_historical_source() {
    let result = engine().score(&unit(), "youtube", None).unwrap();
    assert!(result.historical_metrics.is_none());
    assert!(result
        .combined_metrics
        .insufficient_data_reasons
        .iter()
        .any(|r| r.contains("no calibration history")));
}

#[test]
fn test_single_outcome_surfaces_but_does_not_blend() {
    let e = engine();
    let before = e.score(&unit(), "youtube", None).unwrap();

    let o = e.ingest_outcome(&outcome(70.0, 24, 100)).unwrap();
    assert!((o.actual_score - 40.0).abs() < 1e-9);
    assert!((o.calibration_delta - -30.0).abs() < 1e-9);

    let after = e.score(&unit(), "youtube", None).unwrap();
    let historical = after.historical_metrics.as_ref().unwrap();
    assert_eq!(historical.format_sample_size, 1);
    assert!(historical.insufficient_data);
    assert_eq!(historical.confidence, Confidence::Low);
    assert!(after
        .combined_metrics
        .insufficient_data_reasons
        .iter()
        .any(|r| r.contains("records=1 below minimum=5")));
    // Insufficient history is excluded from the blend, so the combined
    // score is unchanged from the no-history prediction.
    assert_eq!(
        after.combined_metrics.score,
        before.combined_metrics.score
    );
}

#[test]
fn test_accumulated_outcomes_feed_the_historical_source() {
    let e = engine();
    // Three badly calibrated outcomes, then three exact ones.
    for i in 0..3 {
        e.ingest_outcome(&outcome(80.0, 24, i)).unwrap(); // |delta| 40
    }
    for i in 3..6 {
        e.ingest_outcome(&outcome(50.0, 30, i)).unwrap(); // |delta| 0
    }

    let result = e.score(&unit(), "youtube", None).unwrap();
    let historical = result.historical_metrics.as_ref().unwrap();
    assert_eq!(historical.format_sample_size, 6);
    assert!(!historical.insufficient_data);
    // Actual scores were 40 and 50; recency weighting stays between.
    assert!(historical.score > 40.0 && historical.score < 50.0);
    assert!(!result
        .combined_metrics
        .insufficient_data_reasons
        .iter()
        .any(|r| r.contains("records=")));

    let summary = e
        .calibration_summary("youtube", FormatType::ShortForm)
        .unwrap();
    assert_eq!(summary.window_len, 6);
    // (3 * 40 + 3 * 0) / 6.
    assert!((summary.mean_abs_error - 20.0).abs() < 1e-9);
    // Predicted 80 fell in the high band but actual 40 landed medium;
    // the three exact predictions hit.
    assert!((summary.hit_rate - 0.5).abs() < 1e-9);
    assert_eq!(summary.trend, Trend::Improving);
}

#[test]
fn test_summary_none_for_unseen_key() {
    let e = engine();
    e.ingest_outcome(&outcome(50.0, 30, 1)).unwrap();
    assert!(e
        .calibration_summary("tiktok", FormatType::ShortForm)
        .is_none());
    assert!(e
        .calibration_summary("youtube", FormatType::LongForm)
        .is_none());
}

#[test]
fn test_platform_histories_are_isolated() {
    let e = engine();
    for i in 0..6 {
        let mut o = outcome(50.0, 30, i);
        o.platform = "tiktok".to_string();
        e.ingest_outcome(&o).unwrap();
    }
    // youtube never saw an outcome.
    let result = e.score(&unit(), "youtube", None).unwrap();
    assert!(result.historical_metrics.is_none());
    let result = e.score(&unit(), "tiktok", None).unwrap();
    assert_eq!(
        result.historical_metrics.unwrap().format_sample_size,
        6
    );
}

#[test]
fn test_warm_up_seeds_history_at_startup() {
    let e = engine();
    let records: Vec<CalibrationRecord> = (0..10)
        .map(|i| CalibrationRecord {
            predicted_score: 60.0,
            actual_score: 58.0,
            calibration_delta: -2.0,
            platform: "youtube".to_string(),
            format_type: FormatType::ShortForm,
            posted_at: i,
        })
        .collect();
    e.store().warm_up(records);

    let result = e.score(&unit(), "youtube", None).unwrap();
    let historical = result.historical_metrics.unwrap();
    assert_eq!(historical.format_sample_size, 10);
    assert!(!historical.insufficient_data);
    // Tight, well-calibrated history earns high confidence.
    assert_eq!(historical.confidence, Confidence::High);
    assert!((historical.score - 58.0).abs() < 1e-9);
}

#[test]
fn test_outcome_ids_key_on_platform_format_and_time() {
    let e = engine();
    let a = e.ingest_outcome(&outcome(50.0, 30, 100)).unwrap();
    let b = e.ingest_outcome(&outcome(50.0, 30, 200)).unwrap();
    assert_ne!(a.outcome_id, b.outcome_id);
    assert_eq!(a.outcome_id, "youtube:short_form:100");
}
