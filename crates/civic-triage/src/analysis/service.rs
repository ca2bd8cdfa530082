//! Service facade composing the triage engines.

use std::borrow::Cow;
use std::sync::Arc;

use thiserror::Error;

use super::classifier::{Classifier, ClassifierError};
use super::domain::{ClassifiedComplaint, ResolutionError};
use super::recommend::RecommendationEngine;
use super::report::{
    BatchAnalysis, ReportSeverity, ScoredComplaint, SituationReport, TrendAnalysis,
    HIGH_PRIORITY_FLOOR,
};
use super::scoring::{PriorityEngine, PriorityOutcome, ScoringConfig};
use super::summary::{NarrativeConfig, SummarySynthesizer};
use super::trend::TrendDetector;

/// Immutable tuning for the whole triage pipeline, fixed at construction.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    pub scoring: ScoringConfig,
    pub narrative: NarrativeConfig,
    /// Absolute rounded percentage change flagged as anomalous.
    pub anomaly_threshold: f64,
}

impl TriageConfig {
    /// Production tables and thresholds.
    pub fn standard() -> Self {
        Self {
            scoring: ScoringConfig::standard(),
            narrative: NarrativeConfig::standard(),
            anomaly_threshold: 50.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum TriageError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Entry point for complaint triage.
///
/// Holds the classifier seam plus one instance of each engine; every method
/// is a pure function of its arguments and the configuration captured at
/// construction, so two services built from the same config always agree.
pub struct TriageService<C> {
    classifier: Arc<C>,
    engine: PriorityEngine,
    synthesizer: SummarySynthesizer,
    detector: TrendDetector,
    recommender: RecommendationEngine,
}

impl<C> TriageService<C>
where
    C: Classifier,
{
    pub fn new(classifier: Arc<C>, config: TriageConfig) -> Self {
        Self {
            classifier,
            engine: PriorityEngine::new(config.scoring),
            synthesizer: SummarySynthesizer::new(config.narrative),
            detector: TrendDetector::new(config.anomaly_threshold),
            recommender: RecommendationEngine::standard(),
        }
    }

    /// Classify a complaint text and score the result.
    pub fn classify(
        &self,
        description: &str,
        localisation: &str,
    ) -> Result<ScoredComplaint, TriageError> {
        let scores = self.classifier.classify(description)?;
        let complaint =
            ClassifiedComplaint::from_scores(description, scores)?.with_localisation(localisation);
        let outcome = self.engine.score(&complaint);
        Ok(ScoredComplaint {
            category: complaint.category,
            category_scores: complaint.category_scores,
            priority: outcome.breakdown.total,
            urgency: outcome.tier,
            breakdown: outcome.breakdown,
        })
    }

    /// Score an already-classified complaint.
    pub fn score(&self, complaint: &ClassifiedComplaint) -> PriorityOutcome {
        self.engine.score(complaint)
    }

    /// Build the situation report for a reporting period.
    ///
    /// A zone filter narrows both the current batch and, when given, the
    /// previous one, so the trend compares like with like. Severity is graded
    /// from per-complaint priority totals recomputed here; scoring is
    /// deterministic, so this always matches what upstream stored.
    pub fn situation_report(
        &self,
        complaints: &[ClassifiedComplaint],
        zone_filter: Option<&str>,
        previous: Option<&[ClassifiedComplaint]>,
        hour: u32,
    ) -> SituationReport {
        let current = zone_scope(complaints, zone_filter);
        let trend = previous.map(|previous| {
            let previous = zone_scope(previous, zone_filter);
            self.detector.detect(&current, &previous)
        });

        let natural_language_summary = self.synthesizer.synthesize(&current, zone_filter, hour);
        let recommendations = self.recommender.recommend(&current, trend.as_ref());

        let high_priority = current
            .iter()
            .filter(|complaint| self.engine.score(complaint).breakdown.total > HIGH_PRIORITY_FLOOR)
            .count();
        let severity_level = ReportSeverity::from_batch(high_priority, current.len());

        SituationReport {
            natural_language_summary,
            anomalies_detected: trend.map(|trend| trend.is_anomaly).unwrap_or(false),
            trend,
            recommendations,
            severity_level,
            complaint_count: current.len(),
        }
    }

    /// Compare two periods and derive advice from the current one.
    pub fn trend_analysis(
        &self,
        current: &[ClassifiedComplaint],
        previous: &[ClassifiedComplaint],
    ) -> TrendAnalysis {
        let trend = self.detector.detect(current, previous);
        let message = trend.message();
        let recommendations = self.recommender.recommend(current, Some(&trend));
        TrendAnalysis {
            trend,
            message,
            recommendations,
        }
    }

    /// Recommendations for a batch without any trend context.
    pub fn recommendations(&self, complaints: &[ClassifiedComplaint]) -> Vec<String> {
        self.recommender.recommend(complaints, None)
    }

    /// Re-classify each complaint individually and summarize the batch.
    ///
    /// Complaints with an empty description skip classification and come
    /// back as `None`; the aggregate summary and recommendations still count
    /// them through their provided category and zone. One classifier failure
    /// fails the whole batch.
    pub fn batch_analysis(
        &self,
        complaints: &[ClassifiedComplaint],
        hour: u32,
    ) -> Result<BatchAnalysis, TriageError> {
        let mut individual = Vec::with_capacity(complaints.len());
        for complaint in complaints {
            if complaint.description.is_empty() {
                individual.push(None);
            } else {
                individual.push(Some(
                    self.classify(&complaint.description, &complaint.localisation)?,
                ));
            }
        }

        Ok(BatchAnalysis {
            individual,
            summary: self.synthesizer.synthesize(complaints, None, hour),
            recommendations: self.recommender.recommend(complaints, None),
        })
    }
}

/// Restrict a batch to one zone by exact match. Complaints without a zone
/// never match a filter.
fn zone_scope<'a>(
    complaints: &'a [ClassifiedComplaint],
    zone_filter: Option<&str>,
) -> Cow<'a, [ClassifiedComplaint]> {
    match zone_filter {
        None => Cow::Borrowed(complaints),
        Some(zone) => Cow::Owned(
            complaints
                .iter()
                .filter(|complaint| complaint.zone.as_deref() == Some(zone))
                .cloned()
                .collect(),
        ),
    }
}
