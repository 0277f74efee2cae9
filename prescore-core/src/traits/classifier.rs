//! Semantic classifier boundary.
//!
//! The original product classifies segments with model calls. The engine
//! never does: semantic judgment is injected behind this trait so the
//! deterministic scoring core stays testable without a provider. The
//! built-in keyword classifier lives in `prescore-engine`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::content::TranscriptSegment;

/// Semantic role of one transcript segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Attention-grabbing opener.
    Hook,
    /// Delivers the core promised value.
    Value,
    /// Evidence or demonstration backing a claim.
    Proof,
    /// Call to action.
    Cta,
    /// Visual/audio/pacing interrupt cue.
    Interrupt,
    /// Poses an unresolved question or curiosity gap.
    OpenLoop,
    /// No recognized signal.
    None,
}

impl SignalKind {
    /// True for the kinds that count as "signal" when measuring dead
    /// zones (hook, value, proof, CTA).
    pub fn is_structural_signal(&self) -> bool {
        matches!(self, Self::Hook | Self::Value | Self::Proof | Self::Cta)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Hook => "hook",
            Self::Value => "value",
            Self::Proof => "proof",
            Self::Cta => "cta",
            Self::Interrupt => "interrupt",
            Self::OpenLoop => "open_loop",
            Self::None => "none",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classifies transcript segments into signal kinds.
///
/// Implementations must be deterministic for the idempotence guarantee
/// to hold: scoring the same ContentUnit twice must yield bit-identical
/// results. Model-backed implementations should classify ahead of time
/// and replay cached labels.
pub trait SemanticClassifier: Send + Sync {
    fn classify(&self, segment: &TranscriptSegment) -> SignalKind;
}

/// Classifier that finds no signal anywhere. Useful as a worst-case
/// baseline in tests.
pub struct NullClassifier;

impl SemanticClassifier for NullClassifier {
    fn classify(&self, _segment: &TranscriptSegment) -> SignalKind {
        SignalKind::None
    }
}
