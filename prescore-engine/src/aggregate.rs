//! Combined score aggregator.
//!
//! Blends the platform (detector), competitor, and historical scores
//! into one prediction with a confidence band. Weights are renormalized
//! over the sources actually present: an absent or insufficient source
//! has its weight redistributed proportionally to the others rather
//! than dropped silently, so the blend is never biased toward whichever
//! two sources happen to exist.

use prescore_core::config::{ScoringConfig, SourceConfig};
use prescore_core::types::{
    CombinedScore, CompetitorScore, Confidence, HistoricalScore, LikelihoodBand, PlatformScore,
};

/// Aggregation lifecycle. `Reconciled` is reached only after the
/// outcome tracker matches the prediction to a real outcome; the
/// transition never mutates the original `PredictionResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationState {
    AwaitingInputs,
    /// Computed with one or more sources absent.
    Partial,
    /// All three sources were supplied. Source quality is reported
    /// separately through the combined confidence tier.
    Computed,
    Reconciled,
}

/// Blends per-source scores once the mandatory platform score is
/// available and the optional sources are available or explicitly
/// absent.
pub struct ScoreAggregator {
    sources: SourceConfig,
    scoring: ScoringConfig,
    state: AggregationState,
}

impl ScoreAggregator {
    pub fn new(sources: SourceConfig, scoring: ScoringConfig) -> Self {
        Self {
            sources,
            scoring,
            state: AggregationState::AwaitingInputs,
        }
    }

    pub fn state(&self) -> AggregationState {
        self.state
    }

    /// Combine the available sources. The platform score is mandatory;
    /// pass `None` for sources that are explicitly absent.
    pub fn combine(
        &mut self,
        platform: &PlatformScore,
        competitor: Option<&CompetitorScore>,
        historical: Option<&HistoricalScore>,
    ) -> CombinedScore {
        let mut reasons = Vec::new();

        // A source participates in the blend only when present and, for
        // historical, when its sample is sufficient.
        let competitor_blended = match competitor {
            Some(c) => {
                if c.confidence.is_low() {
                    reasons.push(format!(
                        "competitor benchmark sample_size={} below minimum={}",
                        c.benchmark.sample_size, self.sources.min_benchmark_sample
                    ));
                }
                Some(c.score)
            }
            None => {
                reasons.push("competitor benchmark absent".to_string());
                None
            }
        };
        let historical_blended = match historical {
            Some(h) if !h.insufficient_data => Some(h.score),
            Some(h) => {
                reasons.push(format!(
                    "historical records={} below minimum={}",
                    h.format_sample_size, self.sources.min_history_sample
                ));
                None
            }
            None => {
                reasons.push("no calibration history for this platform/format".to_string());
                None
            }
        };
        if platform.confidence.is_low() {
            reasons.push("transcript empty or zero duration; detector readings worst-case".to_string());
        }

        let score = blend(
            &self.sources,
            platform.score,
            competitor_blended,
            historical_blended,
        );

        let confidence = combined_confidence(platform, competitor, historical);
        let likelihood_band = LikelihoodBand::from_score(
            score,
            self.scoring.band_low_cut,
            self.scoring.band_high_cut,
        );
        let insufficient_data = confidence.is_low();

        // State tracks source presence only; quality lives in the
        // confidence tier.
        self.state = if competitor.is_some() && historical.is_some() {
            AggregationState::Computed
        } else {
            AggregationState::Partial
        };
        if self.state == AggregationState::Partial {
            tracing::debug!(score, confidence = %confidence, ?reasons, "partial aggregation");
        }

        CombinedScore {
            score,
            confidence,
            likelihood_band,
            insufficient_data,
            insufficient_data_reasons: reasons,
        }
    }

    /// Mark this prediction as reconciled against a real outcome.
    pub fn mark_reconciled(&mut self) {
        self.state = AggregationState::Reconciled;
    }
}

/// Renormalize the configured weights over present sources so they sum
/// to 1.0 exactly (the last present source absorbs rounding).
fn blend(
    sources: &SourceConfig,
    platform_score: f64,
    competitor_score: Option<f64>,
    historical_score: Option<f64>,
) -> f64 {
    let mut present: Vec<(f64, f64)> = vec![(platform_score, sources.platform_weight)];
    if let Some(s) = competitor_score {
        present.push((s, sources.competitor_weight));
    }
    if let Some(s) = historical_score {
        present.push((s, sources.historical_weight));
    }

    let total: f64 = present.iter().map(|(_, w)| w).sum();
    let mut combined = 0.0;
    let mut used = 0.0;
    let last = present.len() - 1;
    for (i, (score, weight)) in present.iter().enumerate() {
        let renorm = if i == last {
            1.0 - used
        } else {
            weight / total
        };
        used += renorm;
        combined += score * renorm;
    }
    combined.clamp(0.0, 100.0)
}

/// High when all three sources are present and individually non-low;
/// medium when exactly one is low or absent; low otherwise.
fn combined_confidence(
    platform: &PlatformScore,
    competitor: Option<&CompetitorScore>,
    historical: Option<&HistoricalScore>,
) -> Confidence {
    let mut degraded = 0;
    if platform.confidence.is_low() {
        degraded += 1;
    }
    match competitor {
        Some(c) if !c.confidence.is_low() => {}
        _ => degraded += 1,
    }
    match historical {
        Some(h) if !h.confidence.is_low() && !h.insufficient_data => {}
        _ => degraded += 1,
    }
    match degraded {
        0 => Confidence::High,
        1 => Confidence::Medium,
        _ => Confidence::Low,
    }
}
