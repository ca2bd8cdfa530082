//! Operational recommendations derived from a complaint batch.

use std::collections::{BTreeMap, BTreeSet};

use super::domain::ClassifiedComplaint;
use super::trend::{TrendDirection, TrendResult};

/// Zone label used when a complaint carries none. Counts as a distinct zone.
pub const UNKNOWN_ZONE: &str = "Zone inconnue";

const LAW_ENFORCEMENT_FLOOR: usize = 3;
const CLEANUP_SURGE_FLOOR: usize = 5;
const COORDINATED_ZONE_FLOOR: usize = 3;

/// Rule cascade turning batch counts into dispatch advice.
///
/// Rules fire in a fixed order so the output list is reproducible: security,
/// sanitation, administrative, trend, zone spread, then the fallback. Within
/// the security and sanitation pairs the escalated wording replaces the
/// routine one, never both.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn standard() -> Self {
        Self
    }

    pub fn recommend(
        &self,
        complaints: &[ClassifiedComplaint],
        trend: Option<&TrendResult>,
    ) -> Vec<String> {
        let mut category_counts: BTreeMap<&str, usize> = BTreeMap::new();
        let mut zones: BTreeSet<&str> = BTreeSet::new();
        for complaint in complaints {
            *category_counts
                .entry(complaint.category.as_str())
                .or_insert(0) += 1;
            zones.insert(complaint.zone.as_deref().unwrap_or(UNKNOWN_ZONE));
        }
        let count = |label: &str| category_counts.get(label).copied().unwrap_or(0);

        let mut recommendations = Vec::new();

        let aggressions = count("AGRESSION");
        if aggressions >= LAW_ENFORCEMENT_FLOOR {
            recommendations
                .push("Intervention immédiate des forces de l'ordre requise".to_string());
        } else if aggressions > 0 {
            recommendations.push("Surveillance renforcée recommandée".to_string());
        }

        let waste = count("DECHETS");
        if waste >= CLEANUP_SURGE_FLOOR {
            recommendations.push("Intervention d'urgence des services de nettoyage".to_string());
        } else if waste > 0 {
            recommendations.push("Planifier une intervention de nettoyage".to_string());
        }

        if count("CORRUPTION") > 0 {
            recommendations
                .push("Enquête administrative et contrôle des services concernés".to_string());
        }

        if let Some(trend) = trend {
            if trend.is_anomaly && trend.direction == TrendDirection::Increase {
                recommendations.push(format!(
                    "Augmentation anormale détectée (+{:.1}%) - Investigation requise",
                    trend.percentage_change
                ));
            }
        }

        // Two or three distinct zones draw no zone advice.
        if zones.len() == 1 {
            if let Some(zone) = zones.first() {
                recommendations.push(format!("Concentrer les efforts sur la zone {zone}"));
            }
        } else if zones.len() > COORDINATED_ZONE_FLOOR {
            recommendations
                .push("Déploiement coordonné nécessaire sur plusieurs zones".to_string());
        }

        if recommendations.is_empty() {
            recommendations.push("Surveillance continue recommandée".to_string());
        }
        recommendations
    }
}
