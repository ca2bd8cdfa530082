use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::analysis::classifier::{Classifier, ClassifierError};
use crate::analysis::domain::{Category, CategoryScores, ClassifiedComplaint};
use crate::analysis::service::{TriageConfig, TriageService};

pub(super) fn complaint(description: &str, category: &str) -> ClassifiedComplaint {
    ClassifiedComplaint::new(description, Category::from(category))
}

pub(super) fn zoned(description: &str, category: &str, zone: &str) -> ClassifiedComplaint {
    complaint(description, category).with_zone(zone)
}

pub(super) fn located(
    description: &str,
    category: &str,
    localisation: &str,
) -> ClassifiedComplaint {
    complaint(description, category).with_localisation(localisation)
}

/// `n` bland complaints of one category, useful when only counts matter.
pub(super) fn batch_of(n: usize, category: &str) -> Vec<ClassifiedComplaint> {
    (0..n)
        .map(|i| complaint(&format!("signalement {i}"), category))
        .collect()
}

pub(super) fn scores(entries: &[(&str, f64)]) -> CategoryScores {
    entries
        .iter()
        .map(|(label, confidence)| (Category::from(*label), *confidence))
        .collect()
}

/// Classifier stub that returns the same confidence mapping for any text.
#[derive(Clone)]
pub(super) struct StaticClassifier {
    scores: CategoryScores,
}

impl StaticClassifier {
    pub(super) fn returning(entries: &[(&str, f64)]) -> Self {
        Self {
            scores: scores(entries),
        }
    }

    pub(super) fn empty() -> Self {
        Self {
            scores: CategoryScores::default(),
        }
    }
}

impl Classifier for StaticClassifier {
    fn classify(&self, _description: &str) -> Result<CategoryScores, ClassifierError> {
        Ok(self.scores.clone())
    }
}

pub(super) struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn classify(&self, _description: &str) -> Result<CategoryScores, ClassifierError> {
        Err(ClassifierError::Unavailable("model offline".to_string()))
    }
}

pub(super) fn service_with(classifier: StaticClassifier) -> TriageService<StaticClassifier> {
    TriageService::new(Arc::new(classifier), TriageConfig::standard())
}

/// Service whose classifier always votes AGRESSION.
pub(super) fn aggression_service() -> TriageService<StaticClassifier> {
    service_with(StaticClassifier::returning(&[
        ("AGRESSION", 0.88),
        ("AUTRES", 0.12),
    ]))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
