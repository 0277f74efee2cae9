//! Engine entry point: wires extraction, scoring, ranking, benchmark
//! and historical sources, and aggregation into one scoring call, plus
//! outcome ingestion for the calibration loop.

use std::sync::Arc;

use prescore_core::config::EngineConfig;
use prescore_core::errors::{ConfigError, ValidationError};
use prescore_core::traits::{CalibrationStore, SemanticClassifier};
use prescore_core::types::{
    BenchmarkSample, CalibrationOutcome, CalibrationSummary, Confidence, ContentUnit,
    FormatType, OutcomePayload, PlatformScore, PredictionResult,
};

use crate::aggregate::ScoreAggregator;
use crate::benchmark;
use crate::calibration::{OutcomeTracker, SharedCalibrationStore};
use crate::classify::KeywordClassifier;
use crate::detectors;
use crate::historical;
use crate::repurpose;
use crate::scoring;

/// The Performance Prediction & Calibration Engine.
///
/// Stateless per call except for the injected calibration store. Safe
/// to invoke concurrently for independent content units.
pub struct PrescoreEngine {
    config: EngineConfig,
    classifier: Arc<dyn SemanticClassifier>,
    store: Arc<dyn CalibrationStore>,
}

impl PrescoreEngine {
    /// Build with the given config (validated eagerly), the built-in
    /// keyword classifier, and a fresh in-memory calibration store.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            classifier: Arc::new(KeywordClassifier::new()),
            store: Arc::new(SharedCalibrationStore::new()),
        })
    }

    /// Replace the semantic classifier (e.g. a model-backed one).
    pub fn with_classifier(mut self, classifier: Arc<dyn SemanticClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Replace the calibration store (e.g. one warmed up from
    /// persistence at startup).
    pub fn with_store(mut self, store: Arc<dyn CalibrationStore>) -> Self {
        self.store = store;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn CalibrationStore> {
        &self.store
    }

    /// Score one content unit against an optional benchmark sample and
    /// the creator's calibration history for `platform`.
    ///
    /// Pure function of its inputs plus current calibration state:
    /// unchanged inputs yield a bit-identical result.
    pub fn score(
        &self,
        unit: &ContentUnit,
        platform: &str,
        benchmark_sample: Option<&BenchmarkSample>,
    ) -> Result<PredictionResult, ValidationError> {
        let span = tracing::info_span!(
            "score",
            platform,
            format = %unit.format_type,
            duration_s = unit.duration_seconds
        );
        let _guard = span.enter();

        unit.validate()?;

        let targets = self.config.targets_for(unit.format_type);
        let weights = self.config.weights_for(unit.format_type);

        // Detector pipeline: extract, score, rank.
        let labelled = detectors::label_segments(unit, self.classifier.as_ref());
        let readings = detectors::extract_from_labelled(unit, &labelled, targets);
        let detector_scores =
            scoring::score_all(&readings, unit.duration_seconds, targets, weights);
        let ranked = scoring::rank(&detector_scores, &self.config.scoring);

        let platform_score = PlatformScore {
            score: scoring::weighted_score(&detector_scores).clamp(0.0, 100.0),
            confidence: if unit.is_blank() {
                Confidence::Low
            } else {
                Confidence::High
            },
            detector_scores,
        };

        // Optional sources.
        let competitor = benchmark_sample.map(|sample| {
            benchmark::score(sample, unit.platform_metrics.as_ref(), &self.config.sources)
        });
        let historical = historical::score(
            self.store.as_ref(),
            platform,
            unit.format_type,
            &self.config.sources,
            &self.config.calibration,
            &self.config.scoring,
        );

        let mut aggregator =
            ScoreAggregator::new(self.config.sources, self.config.scoring);
        let combined =
            aggregator.combine(&platform_score, competitor.as_ref(), historical.as_ref());

        let repurpose_plan = repurpose::plan(unit, &labelled, &self.config.repurpose);

        tracing::info!(
            combined = combined.score,
            confidence = %combined.confidence,
            band = %combined.likelihood_band,
            "prediction computed"
        );

        Ok(PredictionResult {
            format_type: unit.format_type,
            duration_seconds: unit.duration_seconds,
            competitor_metrics: competitor,
            platform_metrics: platform_score,
            historical_metrics: historical,
            combined_metrics: combined,
            detector_rankings: ranked.rankings,
            next_actions: ranked.next_actions,
            repurpose_plan,
        })
    }

    /// Ingest a real post-publish outcome, closing the calibration
    /// loop for future scoring calls on the same (platform, format).
    pub fn ingest_outcome(
        &self,
        payload: &OutcomePayload,
    ) -> Result<CalibrationOutcome, ValidationError> {
        let tracker = OutcomeTracker::new(
            self.store.as_ref(),
            self.config.calibration,
            self.config.scoring,
        );
        tracker.ingest(payload)
    }

    /// Rolling calibration summary for a (platform, format) key.
    pub fn calibration_summary(
        &self,
        platform: &str,
        format_type: FormatType,
    ) -> Option<CalibrationSummary> {
        let tracker = OutcomeTracker::new(
            self.store.as_ref(),
            self.config.calibration,
            self.config.scoring,
        );
        tracker.summary(platform, format_type)
    }
}
