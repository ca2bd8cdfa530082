use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Complaint category label as emitted by the external classifier.
///
/// The set is fixed but extensible: labels outside [`Category::CANONICAL`]
/// flow through every engine unscored rather than erroring (configuration
/// gap, not a failure).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Declared category order. This is also the documented tie-break order
    /// for argmax resolution over confidence scores: on equal confidence the
    /// earlier label here wins, and labels outside this list rank after it
    /// in lexicographic order.
    pub const CANONICAL: [&'static str; 8] = [
        "AGRESSION",
        "HARCELEMENT",
        "VOL",
        "DECHETS",
        "POLLUTION",
        "CORRUPTION",
        "VOIRIE",
        "AUTRES",
    ];

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Catch-all category assigned to batch records that arrive unlabeled.
    pub fn autres() -> Self {
        Self("AUTRES".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_canonical(&self) -> bool {
        Self::CANONICAL.contains(&self.0.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

impl Borrow<str> for Category {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Confidence mapping produced by the classification collaborator.
///
/// Confidences are expected in `[0, 1]`; the engine never rescales or
/// validates them beyond the emptiness contract on [`CategoryScores::resolve_category`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryScores(BTreeMap<Category, f64>);

impl CategoryScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: Category, confidence: f64) {
        self.0.insert(category, confidence);
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.get(label).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, f64)> {
        self.0.iter().map(|(category, score)| (category, *score))
    }

    /// Resolve the confidence-maximizing category.
    ///
    /// Candidates are visited in the canonical declaration order first, then
    /// any non-canonical labels in lexicographic order; a later candidate
    /// replaces the running best only on a strictly greater confidence, so
    /// ties resolve to the earliest candidate. An empty mapping is a
    /// caller-contract violation and is rejected, never defaulted.
    pub fn resolve_category(&self) -> Result<Category, ResolutionError> {
        let mut best: Option<(&Category, f64)> = None;
        for candidate in self.ordered_candidates() {
            let confidence = self.0[candidate];
            match best {
                Some((_, leading)) if confidence <= leading => {}
                _ => best = Some((candidate, confidence)),
            }
        }
        best.map(|(category, _)| category.clone())
            .ok_or(ResolutionError::EmptyScores)
    }

    fn ordered_candidates(&self) -> Vec<&Category> {
        let mut candidates = Vec::with_capacity(self.0.len());
        for label in Category::CANONICAL {
            if let Some((category, _)) = self.0.get_key_value(label) {
                candidates.push(category);
            }
        }
        candidates.extend(self.0.keys().filter(|category| !category.is_canonical()));
        candidates
    }
}

impl FromIterator<(Category, f64)> for CategoryScores {
    fn from_iter<I: IntoIterator<Item = (Category, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Caller-contract violation reported by argmax resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("category scores are empty; argmax resolution is undefined")]
    EmptyScores,
}

/// A complaint whose text has already been classified.
///
/// Every engine consumes this shape; all fields are set at construction and
/// never mutated. When `category_scores` is non-empty, `category` is its
/// argmax under the documented tie-break; [`ClassifiedComplaint::from_scores`]
/// guarantees the invariant, and the resolved `category` field stays
/// authoritative for records deserialized from the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedComplaint {
    /// May be empty for records whose text never reached the classifier;
    /// aggregate engines only read `category` and `zone`.
    #[serde(default)]
    pub description: String,
    #[serde(default = "Category::autres")]
    pub category: Category,
    #[serde(default)]
    pub category_scores: CategoryScores,
    #[serde(default = "default_localisation")]
    pub localisation: String,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ClassifiedComplaint {
    pub fn new(description: impl Into<String>, category: Category) -> Self {
        Self {
            description: description.into(),
            category,
            category_scores: CategoryScores::default(),
            localisation: default_localisation(),
            zone: None,
            timestamp: None,
        }
    }

    /// Build a complaint from a raw confidence mapping, resolving the
    /// category by argmax.
    pub fn from_scores(
        description: impl Into<String>,
        category_scores: CategoryScores,
    ) -> Result<Self, ResolutionError> {
        let category = category_scores.resolve_category()?;
        Ok(Self {
            description: description.into(),
            category,
            category_scores,
            localisation: default_localisation(),
            zone: None,
            timestamp: None,
        })
    }

    pub fn with_localisation(mut self, localisation: impl Into<String>) -> Self {
        self.localisation = localisation.into();
        self
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }
}

pub(crate) fn default_localisation() -> String {
    "Inconnue".to_string()
}
