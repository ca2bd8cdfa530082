//! Seam to the external classification model.

use thiserror::Error;

use super::domain::CategoryScores;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classification model unavailable: {0}")]
    Unavailable(String),
    #[error("classification failed: {0}")]
    Failed(String),
}

/// Text classification model producing confidence scores per category.
///
/// The model itself is external to the triage engine; anything able to turn
/// a description into [`CategoryScores`] plugs in here. Implementations are
/// expected to be deterministic, the engine adds no randomness of its own.
pub trait Classifier: Send + Sync {
    fn classify(&self, description: &str) -> Result<CategoryScores, ClassifierError>;
}
