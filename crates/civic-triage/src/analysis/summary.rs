//! Natural-language batch summaries.
//!
//! Output is a single French sentence built from counts per semantic group.
//! The narrative tables live in [`NarrativeConfig`] so wording changes never
//! touch the synthesis algorithm.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Category, ClassifiedComplaint};

/// Time-of-day wording for the opening clause. Matches hours in
/// `start_hour <= hour < end_hour`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePhrase {
    pub start_hour: u32,
    pub end_hour: u32,
    pub phrase: String,
}

/// Wording tables for the summary sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeConfig {
    /// Category to reader-facing theme. Categories absent here read as their
    /// own theme, so an unknown label still produces a sentence.
    pub semantic_groups: BTreeMap<Category, String>,
    pub time_phrases: Vec<TimePhrase>,
    /// Used when no time phrase covers the hour.
    pub fallback_time_phrase: String,
    pub empty_batch_sentence: String,
}

impl NarrativeConfig {
    /// The production wording for municipal complaint reports.
    pub fn standard() -> Self {
        let semantic_groups = [
            ("AGRESSION", "Violences et Sécurité"),
            ("HARCELEMENT", "Violences et Sécurité"),
            ("VOL", "Violences et Sécurité"),
            ("DECHETS", "Problèmes Environnementaux"),
            ("POLLUTION", "Problèmes Environnementaux"),
            ("CORRUPTION", "Infractions Administratives"),
            ("VOIRIE", "Infrastructure et Transport"),
            ("AUTRES", "Autres Problèmes"),
        ]
        .into_iter()
        .map(|(category, group)| (Category::from(category), group.to_string()))
        .collect();

        let time_phrases = [
            (0, 6, "cette nuit"),
            (6, 12, "ce matin"),
            (12, 18, "cet après-midi"),
            (18, 24, "ce soir"),
        ]
        .into_iter()
        .map(|(start_hour, end_hour, phrase)| TimePhrase {
            start_hour,
            end_hour,
            phrase: phrase.to_string(),
        })
        .collect();

        Self {
            semantic_groups,
            time_phrases,
            fallback_time_phrase: "récemment".to_string(),
            empty_batch_sentence: "Aucune plainte signalée pour cette période.".to_string(),
        }
    }

    fn semantic_group<'a>(&'a self, category: &'a Category) -> &'a str {
        self.semantic_groups
            .get(category)
            .map(String::as_str)
            .unwrap_or_else(|| category.as_str())
    }

    fn time_phrase(&self, hour: u32) -> &str {
        self.time_phrases
            .iter()
            .find(|entry| entry.start_hour <= hour && hour < entry.end_hour)
            .map(|entry| entry.phrase.as_str())
            .unwrap_or(&self.fallback_time_phrase)
    }
}

/// Builds the one-sentence French narrative for a batch.
#[derive(Debug, Clone)]
pub struct SummarySynthesizer {
    config: NarrativeConfig,
}

impl SummarySynthesizer {
    pub fn new(config: NarrativeConfig) -> Self {
        Self { config }
    }

    pub fn standard() -> Self {
        Self::new(NarrativeConfig::standard())
    }

    /// Synthesize the narrative for an already-filtered batch.
    ///
    /// `zone` is purely wording: when present it names the area in the
    /// opening clause, it never filters. `hour` picks the time phrase, so
    /// callers control it instead of the wall clock.
    ///
    /// Groups are counted in first-appearance order, then sorted by count
    /// descending; the sort is stable so equal counts keep arrival order and
    /// the sentence is reproducible for a given batch.
    pub fn synthesize(
        &self,
        complaints: &[ClassifiedComplaint],
        zone: Option<&str>,
        hour: u32,
    ) -> String {
        if complaints.is_empty() {
            return self.config.empty_batch_sentence.clone();
        }

        let mut group_counts: Vec<(String, usize)> = Vec::new();
        for complaint in complaints {
            let group = self.config.semantic_group(&complaint.category);
            match group_counts.iter_mut().find(|(name, _)| name == group) {
                Some((_, count)) => *count += 1,
                None => group_counts.push((group.to_string(), 1)),
            }
        }

        let total: usize = group_counts.iter().map(|(_, count)| count).sum();
        let phrase = capitalize_first(self.config.time_phrase(hour));
        let opening = match zone {
            Some(zone) => format!("{phrase} à {zone}, {total} plaintes ont été signalées"),
            None => format!("{phrase}, {total} plaintes ont été signalées"),
        };

        if let [(group, _)] = group_counts.as_slice() {
            return format!("{opening} concernant {}.", group.to_lowercase());
        }

        group_counts.sort_by(|left, right| right.1.cmp(&left.1));
        let parts: Vec<String> = group_counts
            .iter()
            .map(|(group, count)| format!("{count} cas de {}", group.to_lowercase()))
            .collect();
        let listing = match parts.as_slice() {
            [head @ .., last] if head.len() > 1 => format!("{} et {last}", head.join(", ")),
            _ => parts.join(" et "),
        };

        format!("{opening} : {listing}.")
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
