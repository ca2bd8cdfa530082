//! View types assembled for report consumers.

use serde::{Deserialize, Serialize};

use super::domain::{Category, CategoryScores};
use super::scoring::{PriorityBreakdown, UrgencyTier};
use super::trend::TrendResult;

/// Priority totals strictly above this count as high priority when grading a
/// reporting period.
pub const HIGH_PRIORITY_FLOOR: u32 = 15;

const CRITICAL_HIGH_PRIORITY_COUNT: usize = 5;
const HIGH_HIGH_PRIORITY_COUNT: usize = 3;
const MEDIUM_BATCH_SIZE: usize = 10;

/// Overall grading of a reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportSeverity {
    /// Grade a period from its high-priority complaint count, falling back
    /// to sheer batch size when few complaints are individually severe.
    pub fn from_batch(high_priority: usize, batch_size: usize) -> Self {
        if high_priority >= CRITICAL_HIGH_PRIORITY_COUNT {
            Self::Critical
        } else if high_priority >= HIGH_HIGH_PRIORITY_COUNT {
            Self::High
        } else if batch_size >= MEDIUM_BATCH_SIZE {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// One complaint classified and scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredComplaint {
    pub category: Category,
    pub category_scores: CategoryScores,
    pub priority: u32,
    pub urgency: UrgencyTier,
    pub breakdown: PriorityBreakdown,
}

/// Situation report for one reporting period.
///
/// The trend block is present only when a previous period was supplied for
/// comparison; `complaint_count` always reflects the batch that was graded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SituationReport {
    pub natural_language_summary: String,
    #[serde(default, rename = "trends", skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendResult>,
    pub recommendations: Vec<String>,
    pub anomalies_detected: bool,
    pub severity_level: ReportSeverity,
    pub complaint_count: usize,
}

/// Period-over-period comparison with its reading and follow-up advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    #[serde(rename = "trends")]
    pub trend: TrendResult,
    #[serde(rename = "trend_message")]
    pub message: String,
    pub recommendations: Vec<String>,
}

/// Combined per-complaint and aggregate view of a batch.
///
/// `individual` is aligned with the input batch; entries are `None` where
/// the description was empty and classification was skipped. Aggregates are
/// computed over the whole batch regardless.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchAnalysis {
    pub individual: Vec<Option<ScoredComplaint>>,
    pub summary: String,
    pub recommendations: Vec<String>,
}
