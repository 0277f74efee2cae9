//! Detector extractors — five structural signals per content unit.
//!
//! Extraction is a pure function of transcript + duration: the injected
//! classifier is consulted exactly once per segment and the labelled
//! segments are shared across all five extractors, so repeated runs on
//! the same unit are bit-identical. No network or model calls happen at
//! this layer.
//!
//! Edge case: a zero-duration or empty-transcript unit produces
//! defined readings rather than an error, so downstream scoring always
//! has input to work with.

pub mod cta;
pub mod dead_zones;
pub mod open_loops;
pub mod pattern_interrupts;
pub mod time_to_value;

use prescore_core::config::DetectorTargets;
use prescore_core::traits::{SemanticClassifier, SignalKind};
use prescore_core::types::{ContentUnit, DetectorReading, TranscriptSegment};

/// One transcript segment with its classified signal kind.
#[derive(Debug, Clone, Copy)]
pub struct LabelledSegment<'a> {
    pub segment: &'a TranscriptSegment,
    pub kind: SignalKind,
}

/// Classify every segment once, preserving transcript order.
pub fn label_segments<'a>(
    unit: &'a ContentUnit,
    classifier: &dyn SemanticClassifier,
) -> Vec<LabelledSegment<'a>> {
    unit.transcript_segments
        .iter()
        .map(|segment| LabelledSegment {
            segment,
            kind: classifier.classify(segment),
        })
        .collect()
}

/// Extract all five detector readings, in detector declaration order.
pub fn extract_all(
    unit: &ContentUnit,
    classifier: &dyn SemanticClassifier,
    targets: &DetectorTargets,
) -> [DetectorReading; 5] {
    let labelled = label_segments(unit, classifier);
    extract_from_labelled(unit, &labelled, targets)
}

/// Extract from already-labelled segments (shared with the repurpose
/// planner so each segment is classified exactly once per call).
pub fn extract_from_labelled(
    unit: &ContentUnit,
    labelled: &[LabelledSegment<'_>],
    targets: &DetectorTargets,
) -> [DetectorReading; 5] {
    tracing::debug!(
        segments = labelled.len(),
        duration_s = unit.duration_seconds,
        "extracting detector readings"
    );
    [
        time_to_value::extract(unit, labelled),
        open_loops::extract(labelled),
        dead_zones::extract(unit, labelled, targets),
        pattern_interrupts::extract(unit, labelled),
        cta::extract(unit, labelled, targets),
    ]
}

/// Truncate a transcript snippet for evidence display.
pub(crate) fn snippet(text: &str) -> String {
    const MAX: usize = 120;
    if text.len() <= MAX {
        return text.to_string();
    }
    let mut cut = MAX;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…", &text[..cut])
}
