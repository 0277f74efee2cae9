//! Repurposing planner: candidate short-form clip windows cut from
//! long-form content, anchored on classified hook and value segments.

use prescore_core::config::RepurposeConfig;
use prescore_core::traits::SignalKind;
use prescore_core::types::{ClipWindow, ContentUnit, FormatType, RepurposePlan};

use crate::detectors::LabelledSegment;

/// Suggest up to `max_clips` windows for long-form units. Each window
/// opens at a hook and extends through the signal that follows it,
/// clamped to the configured clip length. Returns None for short-form
/// or when no hook anchors exist.
pub fn plan(
    unit: &ContentUnit,
    labelled: &[LabelledSegment<'_>],
    config: &RepurposeConfig,
) -> Option<RepurposePlan> {
    if !config.enabled || unit.format_type != FormatType::LongForm {
        return None;
    }

    let mut clips: Vec<(usize, ClipWindow)> = Vec::new();
    for (i, anchor) in labelled.iter().enumerate() {
        if anchor.kind != SignalKind::Hook {
            continue;
        }
        let start = anchor.segment.start_s;
        let hard_end = (start + config.max_clip_s).min(unit.duration_seconds);

        // Extend through trailing signal segments inside the window.
        let mut end = anchor.segment.end_s.min(hard_end);
        let mut signal_count = 1usize;
        for follow in &labelled[i + 1..] {
            if follow.segment.start_s >= hard_end {
                break;
            }
            if follow.kind.is_structural_signal() {
                end = follow.segment.end_s.min(hard_end);
                signal_count += 1;
            }
        }

        if end - start < config.min_clip_s {
            continue;
        }
        clips.push((
            signal_count,
            ClipWindow {
                start_s: start,
                end_s: end,
                reason: format!(
                    "hook at {start:.0}s with {signal_count} signal segment(s) in window"
                ),
            },
        ));
    }

    if clips.is_empty() {
        return None;
    }
    // Densest windows first; position breaks ties deterministically.
    clips.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| a.1.start_s.total_cmp(&b.1.start_s))
    });
    clips.truncate(config.max_clips);
    clips.sort_by(|a, b| a.1.start_s.total_cmp(&b.1.start_s));

    Some(RepurposePlan {
        clips: clips.into_iter().map(|(_, c)| c).collect(),
    })
}
