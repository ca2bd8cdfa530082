use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::Category;

/// Rule tables driving the priority scoring engine.
///
/// The tables are extensible by adding entries; the scoring algorithm itself
/// never changes shape. Keywords are matched as case-insensitive substrings
/// against the lower-cased complaint text or location, so entries must be
/// stored lower-cased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Base contribution per category; categories absent here score 0.
    pub base_scores: BTreeMap<Category, u32>,
    /// Flat bonus when the complaint location mentions a sensitive site.
    pub sensitive_locations: LocationBonusRule,
    /// Per-distinct-keyword contribution for urgency vocabulary.
    pub urgent_keywords: KeywordPointsRule,
    /// Additional category-scoped rules; a category may carry several and
    /// their contributions sum.
    pub category_rules: BTreeMap<Category, Vec<CategoryRule>>,
}

/// Keyword list with a flat bonus awarded once if ANY keyword matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationBonusRule {
    pub keywords: Vec<String>,
    pub bonus: u32,
}

/// Keyword list scoring per distinct matching keyword. A keyword repeated in
/// the text still counts once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordPointsRule {
    pub keywords: Vec<String>,
    pub points_per_match: u32,
}

/// Category-scoped scoring rule. The two shapes are deliberately distinct:
/// `PerKeyword` accumulates per distinct match, `AnyKeyword` awards its bonus
/// at most once however many keywords hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CategoryRule {
    PerKeyword {
        keywords: Vec<String>,
        points_per_match: u32,
    },
    AnyKeyword {
        keywords: Vec<String>,
        bonus: u32,
    },
}

impl ScoringConfig {
    /// The production rule set for municipal complaint triage.
    pub fn standard() -> Self {
        let base_scores = [
            (Category::from("AGRESSION"), 15),
            (Category::from("CORRUPTION"), 12),
            (Category::from("VOIRIE"), 10),
            (Category::from("DECHETS"), 8),
            (Category::from("AUTRES"), 2),
        ]
        .into_iter()
        .collect();

        let mut category_rules: BTreeMap<Category, Vec<CategoryRule>> = BTreeMap::new();
        category_rules.insert(
            Category::from("AGRESSION"),
            vec![CategoryRule::PerKeyword {
                keywords: string_list(&["attaque", "violence", "casse", "arme"]),
                points_per_match: 2,
            }],
        );
        category_rules.insert(
            Category::from("DECHETS"),
            vec![CategoryRule::AnyKeyword {
                keywords: string_list(&["medical", "médicaux"]),
                bonus: 10,
            }],
        );

        Self {
            base_scores,
            sensitive_locations: LocationBonusRule {
                keywords: string_list(&["école", "lycée", "hôpital", "mosquée"]),
                bonus: 5,
            },
            urgent_keywords: KeywordPointsRule {
                keywords: string_list(&["urgence", "urgent", "danger", "blessé", "armé", "cris"]),
                points_per_match: 3,
            },
            category_rules,
        }
    }
}

fn string_list(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| word.to_string()).collect()
}
