//! Volume trend detection between two reporting periods.

use serde::{Deserialize, Serialize};

use super::domain::ClassifiedComplaint;

/// Direction of the change in complaint volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increase,
    Decrease,
    Stable,
}

impl TrendDirection {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
            Self::Stable => "stable",
        }
    }
}

/// Comparison of the current period against the previous one.
///
/// `percentage_change` is rounded to one decimal; the direction and the
/// anomaly flag are derived from that rounded figure so the three fields can
/// never disagree on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub current_count: usize,
    pub previous_count: usize,
    pub percentage_change: f64,
    #[serde(rename = "trend_direction")]
    pub direction: TrendDirection,
    pub is_anomaly: bool,
}

impl TrendResult {
    /// One-line French reading of the trend.
    ///
    /// Changes under five percent in either direction read as stable even
    /// when the direction field says otherwise.
    pub fn message(&self) -> String {
        let pct = self.percentage_change;
        if pct.abs() < 5.0 {
            "Situation stable, pas de changement significatif".to_string()
        } else if pct > 0.0 {
            format!("Augmentation de {pct:.1}% des signalements")
        } else {
            format!("Diminution de {:.1}% des signalements", pct.abs())
        }
    }
}

/// Period-over-period volume comparator.
#[derive(Debug, Clone, Copy)]
pub struct TrendDetector {
    anomaly_threshold: f64,
}

impl TrendDetector {
    /// `anomaly_threshold` is the absolute rounded percentage change at which
    /// a movement is flagged anomalous.
    pub fn new(anomaly_threshold: f64) -> Self {
        Self { anomaly_threshold }
    }

    /// Detector with the production threshold of 50%.
    pub fn standard() -> Self {
        Self::new(50.0)
    }

    pub fn detect(
        &self,
        current: &[ClassifiedComplaint],
        previous: &[ClassifiedComplaint],
    ) -> TrendResult {
        self.detect_counts(current.len(), previous.len())
    }

    /// Compare raw period counts.
    ///
    /// An empty previous period reads as +100% when anything was reported
    /// now and as 0% when both periods are empty; division never happens
    /// against zero.
    pub fn detect_counts(&self, current_count: usize, previous_count: usize) -> TrendResult {
        let raw = if previous_count == 0 {
            if current_count > 0 {
                100.0
            } else {
                0.0
            }
        } else {
            (current_count as f64 - previous_count as f64) / previous_count as f64 * 100.0
        };

        let percentage_change = round_to_tenth(raw);
        let direction = if percentage_change > 0.0 {
            TrendDirection::Increase
        } else if percentage_change < 0.0 {
            TrendDirection::Decrease
        } else {
            TrendDirection::Stable
        };

        TrendResult {
            current_count,
            previous_count,
            percentage_change,
            direction,
            is_anomaly: percentage_change.abs() >= self.anomaly_threshold,
        }
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
