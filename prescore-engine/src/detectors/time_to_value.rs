//! Time-to-value: elapsed seconds from start until the first segment
//! delivering the core promised value.

use prescore_core::traits::SignalKind;
use prescore_core::types::{ContentUnit, DetectorReading};

use super::LabelledSegment;

/// First `Value` segment start, or full duration when no value segment
/// exists (worst case).
pub fn extract(unit: &ContentUnit, labelled: &[LabelledSegment<'_>]) -> DetectorReading {
    let seconds = labelled
        .iter()
        .find(|l| l.kind == SignalKind::Value)
        .map(|l| l.segment.start_s.max(0.0))
        .unwrap_or(unit.duration_seconds);
    DetectorReading::TimeToValue { seconds }
}
