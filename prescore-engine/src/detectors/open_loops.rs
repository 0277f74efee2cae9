//! Open loops: segments posing unresolved questions or curiosity gaps.

use prescore_core::traits::SignalKind;
use prescore_core::types::prediction::Evidence;
use prescore_core::types::DetectorReading;

use super::{snippet, LabelledSegment};

/// Maximum textual examples kept as evidence.
const MAX_EXAMPLES: usize = 3;

pub fn extract(labelled: &[LabelledSegment<'_>]) -> DetectorReading {
    let mut count = 0u32;
    let mut examples = Evidence::new();
    for l in labelled {
        if l.kind != SignalKind::OpenLoop {
            continue;
        }
        count += 1;
        if examples.len() < MAX_EXAMPLES {
            examples.push(snippet(&l.segment.text));
        }
    }
    DetectorReading::OpenLoops { count, examples }
}
