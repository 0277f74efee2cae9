//! Dead zones: contiguous spans with no structural signal segment
//! (hook, value, proof, or CTA) exceeding the minimum-span threshold.

use prescore_core::config::DetectorTargets;
use prescore_core::types::{ContentUnit, DeadZone, DetectorReading};

use super::LabelledSegment;

pub fn extract(
    unit: &ContentUnit,
    labelled: &[LabelledSegment<'_>],
    targets: &DetectorTargets,
) -> DetectorReading {
    let duration = unit.duration_seconds;
    if duration <= 0.0 {
        return DetectorReading::DeadZones {
            zones: Vec::new(),
            total_seconds: 0.0,
        };
    }

    // Merge the covered intervals of signal segments. Transcript order
    // guarantees ascending start times within valid input; sort anyway
    // so extraction never depends on collaborator ordering.
    let mut covered: Vec<(f64, f64)> = labelled
        .iter()
        .filter(|l| l.kind.is_structural_signal())
        .map(|l| (l.segment.start_s.max(0.0), l.segment.end_s.min(duration)))
        .filter(|(start, end)| end > start)
        .collect();
    covered.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(covered.len());
    for (start, end) in covered {
        match merged.last_mut() {
            Some((_, last_end)) if start <= *last_end => {
                *last_end = last_end.max(end);
            }
            _ => merged.push((start, end)),
        }
    }

    // Gaps between merged signal intervals, clipped to [0, duration].
    let min_span = targets.dead_zone_min_span_s;
    let mut zones = Vec::new();
    let mut total_seconds = 0.0;
    let mut cursor = 0.0;
    for (start, end) in merged.iter().copied().chain([(duration, duration)]) {
        let gap = start - cursor;
        if gap > min_span {
            zones.push(DeadZone {
                start_s: cursor,
                end_s: start,
                duration_s: gap,
            });
            total_seconds += gap;
        }
        cursor = cursor.max(end);
    }

    DetectorReading::DeadZones {
        zones,
        total_seconds,
    }
}
