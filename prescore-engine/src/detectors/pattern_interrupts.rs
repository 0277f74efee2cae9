//! Pattern interrupts: visual/audio/pacing interrupt cues, normalized
//! to a per-minute rate.

use prescore_core::traits::SignalKind;
use prescore_core::types::{ContentUnit, DetectorReading};

use super::LabelledSegment;

pub fn extract(unit: &ContentUnit, labelled: &[LabelledSegment<'_>]) -> DetectorReading {
    let count = labelled
        .iter()
        .filter(|l| l.kind == SignalKind::Interrupt)
        .count() as u32;
    let minutes = unit.duration_minutes();
    let per_minute = if minutes > 0.0 {
        count as f64 / minutes
    } else {
        0.0
    };
    DetectorReading::PatternInterrupts { count, per_minute }
}
