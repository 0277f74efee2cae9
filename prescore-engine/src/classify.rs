//! Built-in keyword classifier.
//!
//! Deterministic fallback for the [`SemanticClassifier`] boundary:
//! case-insensitive phrase matching per signal kind. Model-backed
//! classifiers supplied by collaborators replace this at injection time;
//! the phrase sets here are intentionally conservative so the fallback
//! under-reports rather than hallucinates signal.

use aho_corasick::{AhoCorasick, MatchKind};
use prescore_core::traits::{SemanticClassifier, SignalKind};
use prescore_core::types::TranscriptSegment;

/// Kinds in match priority order. A segment matching several phrase
/// sets takes the first kind in this order (most specific first).
const PRIORITY: [SignalKind; 6] = [
    SignalKind::Cta,
    SignalKind::OpenLoop,
    SignalKind::Interrupt,
    SignalKind::Hook,
    SignalKind::Proof,
    SignalKind::Value,
];

fn phrases(kind: SignalKind) -> &'static [&'static str] {
    match kind {
        SignalKind::Cta => &[
            "subscribe",
            "follow for",
            "follow me",
            "comment below",
            "like this video",
            "link in bio",
            "link below",
            "share this",
            "save this",
            "let me know in the comments",
            "hit the bell",
        ],
        SignalKind::OpenLoop => &[
            "more on that later",
            "stick around",
            "at the end",
            "i'll explain later",
            "i'll show you later",
            "coming up",
            "you'll see why",
            "keep watching",
            "before i reveal",
            "wait for it",
        ],
        SignalKind::Interrupt => &[
            "but wait",
            "hold on",
            "plot twist",
            "here's the thing",
            "suddenly",
            "look at this",
            "watch this",
            "pause right there",
        ],
        SignalKind::Hook => &[
            "you won't believe",
            "stop scrolling",
            "here's why",
            "what if i told you",
            "the secret",
            "nobody talks about",
            "this changed everything",
            "the biggest mistake",
        ],
        SignalKind::Proof => &[
            "for example",
            "i tested",
            "the results",
            "case study",
            "the data shows",
            "in my experience",
            "here's the proof",
        ],
        SignalKind::Value => &[
            "here's how",
            "step one",
            "first step",
            "the first thing",
            "you need to",
            "the key is",
            "let me show you",
            "this is how",
            "works like this",
        ],
        SignalKind::None => &[],
    }
}

/// Phrase-set classifier over lowercased segment text.
pub struct KeywordClassifier {
    matchers: Vec<(SignalKind, AhoCorasick)>,
}

impl KeywordClassifier {
    pub fn new() -> Self {
        let matchers = PRIORITY
            .iter()
            .map(|&kind| {
                let automaton = AhoCorasick::builder()
                    .ascii_case_insensitive(true)
                    .match_kind(MatchKind::LeftmostFirst)
                    .build(phrases(kind))
                    .expect("static phrase sets always compile");
                (kind, automaton)
            })
            .collect();
        Self { matchers }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticClassifier for KeywordClassifier {
    fn classify(&self, segment: &TranscriptSegment) -> SignalKind {
        for (kind, automaton) in &self.matchers {
            if automaton.is_match(&segment.text) {
                return *kind;
            }
        }
        SignalKind::None
    }
}
