//! Priority scoring for classified complaints.
//!
//! The engine is a pure function of its [`ScoringConfig`]: the same complaint
//! always yields the same outcome. Scores are additive and every contribution
//! is reported in the [`PriorityBreakdown`] so operators can audit why a
//! complaint landed in a tier.

pub mod config;
mod rules;

use serde::{Deserialize, Serialize};

pub use config::{CategoryRule, KeywordPointsRule, LocationBonusRule, ScoringConfig};

use self::rules::{any_match, category_contribution, distinct_matches};
use super::domain::ClassifiedComplaint;

/// Additive score contributions for one complaint.
///
/// `total` is always the sum of the four components; the only constructor
/// enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    pub base: u32,
    pub urgent_keywords: u32,
    pub location_bonus: u32,
    pub category_specific: u32,
    pub total: u32,
}

impl PriorityBreakdown {
    fn compose(
        base: u32,
        urgent_keywords: u32,
        location_bonus: u32,
        category_specific: u32,
    ) -> Self {
        Self {
            base,
            urgent_keywords,
            location_bonus,
            category_specific,
            total: base + urgent_keywords + location_bonus + category_specific,
        }
    }
}

/// Discrete urgency bucket derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    Low,
    Medium,
    High,
    Critical,
}

impl UrgencyTier {
    /// Tier boundaries are strict: a total of exactly 20 is still `High`,
    /// exactly 15 still `Medium`, exactly 8 still `Low`.
    pub fn from_total(total: u32) -> Self {
        if total > 20 {
            Self::Critical
        } else if total > 15 {
            Self::High
        } else if total > 8 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Result of scoring one complaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityOutcome {
    pub breakdown: PriorityBreakdown,
    pub tier: UrgencyTier,
}

/// Rule-driven priority scorer.
#[derive(Debug, Clone)]
pub struct PriorityEngine {
    config: ScoringConfig,
}

impl PriorityEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Engine backed by the production rule set.
    pub fn standard() -> Self {
        Self::new(ScoringConfig::standard())
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a classified complaint.
    ///
    /// Matching is case-insensitive: description and location are lower-cased
    /// once, then every keyword table is applied as substring search. The
    /// category drives the base score and the category-specific rules; a
    /// category with no table entry simply contributes 0, it is never an
    /// error.
    pub fn score(&self, complaint: &ClassifiedComplaint) -> PriorityOutcome {
        let text = complaint.description.to_lowercase();
        let location = complaint.localisation.to_lowercase();

        let base = self
            .config
            .base_scores
            .get(&complaint.category)
            .copied()
            .unwrap_or(0);

        let urgent = &self.config.urgent_keywords;
        let urgent_keywords = distinct_matches(&text, &urgent.keywords) * urgent.points_per_match;

        let sensitive = &self.config.sensitive_locations;
        let location_bonus = if any_match(&location, &sensitive.keywords) {
            sensitive.bonus
        } else {
            0
        };

        let category_specific = self
            .config
            .category_rules
            .get(&complaint.category)
            .map(|scoped| category_contribution(scoped, &text))
            .unwrap_or(0);

        let breakdown =
            PriorityBreakdown::compose(base, urgent_keywords, location_bonus, category_specific);
        let tier = UrgencyTier::from_total(breakdown.total);
        PriorityOutcome { breakdown, tier }
    }
}
