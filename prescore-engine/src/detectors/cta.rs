//! CTA style: categorical classification of the call-to-action found in
//! the terminal window (last N seconds, N per format).

use std::sync::OnceLock;

use aho_corasick::AhoCorasick;
use prescore_core::config::DetectorTargets;
use prescore_core::traits::SignalKind;
use prescore_core::types::{ContentUnit, CtaStyle, DetectorReading};

use super::LabelledSegment;

/// Imperative cues that mark a direct ask rather than a soft suggestion.
fn direct_ask_matcher() -> &'static AhoCorasick {
    static MATCHER: OnceLock<AhoCorasick> = OnceLock::new();
    MATCHER.get_or_init(|| {
        AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build([
                "subscribe",
                "follow",
                "comment",
                "like this",
                "share this",
                "save this",
                "hit the bell",
                "click the link",
            ])
            .expect("static phrase set always compiles")
    })
}

/// Style of the last CTA segment overlapping the terminal window.
/// `None` when the window contains no CTA (default when absent).
pub fn extract(
    unit: &ContentUnit,
    labelled: &[LabelledSegment<'_>],
    targets: &DetectorTargets,
) -> DetectorReading {
    let window_seconds = targets.cta_window_s;
    let window_start = (unit.duration_seconds - window_seconds).max(0.0);

    let style = labelled
        .iter()
        .rev()
        .find(|l| l.kind == SignalKind::Cta && l.segment.end_s >= window_start)
        .map(|l| {
            if direct_ask_matcher().is_match(&l.segment.text) {
                CtaStyle::DirectAsk
            } else {
                CtaStyle::SoftSuggestion
            }
        })
        .unwrap_or(CtaStyle::None);

    DetectorReading::CtaStyle {
        style,
        window_seconds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prescore_core::types::{FormatType, TranscriptSegment};

    fn unit(duration: f64, segments: Vec<TranscriptSegment>) -> ContentUnit {
        ContentUnit {
            duration_seconds: duration,
            format_type: FormatType::ShortForm,
            transcript_segments: segments,
            platform_metrics: None,
        }
    }

    fn label<'a>(u: &'a ContentUnit, kinds: &[SignalKind]) -> Vec<LabelledSegment<'a>> {
        u.transcript_segments
            .iter()
            .zip(kinds)
            .map(|(segment, &kind)| LabelledSegment { segment, kind })
            .collect()
    }

    #[test]
    fn test_direct_ask_in_window() {
        let u = unit(
            45.0,
            vec![
                TranscriptSegment::new(0.0, 40.0, "content"),
                TranscriptSegment::new(40.0, 45.0, "subscribe for part two"),
            ],
        );
        let l = label(&u, &[SignalKind::Value, SignalKind::Cta]);
        let targets = DetectorTargets::short_form_defaults();
        match extract(&u, &l, &targets) {
            DetectorReading::CtaStyle { style, .. } => assert_eq!(style, CtaStyle::DirectAsk),
            other => panic!("unexpected reading: {other:?}"),
        }
    }

    #[test]
    fn test_soft_suggestion() {
        let u = unit(
            45.0,
            vec![TranscriptSegment::new(42.0, 45.0, "check out the full guide")],
        );
        let l = label(&u, &[SignalKind::Cta]);
        let targets = DetectorTargets::short_form_defaults();
        match extract(&u, &l, &targets) {
            DetectorReading::CtaStyle { style, .. } => {
                assert_eq!(style, CtaStyle::SoftSuggestion)
            }
            other => panic!("unexpected reading: {other:?}"),
        }
    }

    #[test]
    fn test_cta_outside_window_ignored() {
        let u = unit(
            60.0,
            vec![TranscriptSegment::new(5.0, 8.0, "subscribe now")],
        );
        let l = label(&u, &[SignalKind::Cta]);
        // Short-form window is the last 10s; CTA at 5-8s is outside.
        let targets = DetectorTargets::short_form_defaults();
        match extract(&u, &l, &targets) {
            DetectorReading::CtaStyle { style, .. } => assert_eq!(style, CtaStyle::None),
            other => panic!("unexpected reading: {other:?}"),
        }
    }

    #[test]
    fn test_no_cta_defaults_to_none() {
        let u = unit(30.0, vec![]);
        let targets = DetectorTargets::short_form_defaults();
        match extract(&u, &[], &targets) {
            DetectorReading::CtaStyle {
                style,
                window_seconds,
            } => {
                assert_eq!(style, CtaStyle::None);
                assert_eq!(window_seconds, 10.0);
            }
            other => panic!("unexpected reading: {other:?}"),
        }
    }
}
