//! Complaint triage engines and their HTTP surface.
//!
//! The pipeline takes complaints that an external model already classified
//! and turns them into operator-facing material: a priority score with its
//! audit breakdown, a period-over-period trend, a one-sentence French
//! narrative, and an ordered list of recommendations. Every engine is a pure
//! function of its immutable configuration, so identical inputs always
//! produce identical reports.

pub mod classifier;
pub mod domain;
pub(crate) mod recommend;
pub mod report;
pub mod router;
pub(crate) mod scoring;
pub mod service;
pub(crate) mod summary;
pub(crate) mod trend;

#[cfg(test)]
mod tests;

pub use classifier::{Classifier, ClassifierError};
pub use domain::{Category, CategoryScores, ClassifiedComplaint, ResolutionError};
pub use recommend::{RecommendationEngine, UNKNOWN_ZONE};
pub use report::{
    BatchAnalysis, ReportSeverity, ScoredComplaint, SituationReport, TrendAnalysis,
    HIGH_PRIORITY_FLOOR,
};
pub use router::analysis_router;
pub use scoring::{
    CategoryRule, KeywordPointsRule, LocationBonusRule, PriorityBreakdown, PriorityEngine,
    PriorityOutcome, ScoringConfig, UrgencyTier,
};
pub use service::{TriageConfig, TriageError, TriageService};
pub use summary::{NarrativeConfig, SummarySynthesizer, TimePhrase};
pub use trend::{TrendDetector, TrendDirection, TrendResult};
