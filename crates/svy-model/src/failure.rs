//! Failure records, highlight markers, and rule diagnostics.

use serde::{Deserialize, Serialize};

use crate::rule::Severity;

/// A single data-quality failure for one respondent.
///
/// Records are append-only: one per violating (row, check) combination,
/// never mutated or deduplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Value of the respondent-identifier column for the failing row.
    pub respondent_id: String,
    /// Rule-level question name (not always the resolved column).
    pub question: String,
    /// Human-readable description of the failure.
    pub issue: String,
    pub severity: Severity,
}

/// Cell category used by the external report writer to color cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightCategory {
    Range,
    Missing,
    Skip,
    Straightliner,
    Multiselect,
    #[serde(rename = "oe")]
    OpenEnd,
    Ranking,
    Constantsum,
}

impl HighlightCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Range => "range",
            Self::Missing => "missing",
            Self::Skip => "skip",
            Self::Straightliner => "straightliner",
            Self::Multiselect => "multiselect",
            Self::OpenEnd => "oe",
            Self::Ranking => "ranking",
            Self::Constantsum => "constantsum",
        }
    }
}

/// Marks one dataset cell for highlighting in the styled workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightMarker {
    /// Zero-based row index into the dataset.
    pub row: usize,
    /// Resolved dataset column name.
    pub column: String,
    pub category: HighlightCategory,
}

/// Explains why a rule (or part of one) degraded to a no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDiagnostic {
    pub question: String,
    pub reason: String,
}

/// Result of one validation pass: a pure value with no back-references
/// into the dataset or rule table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationOutput {
    pub failures: Vec<FailureRecord>,
    pub highlights: Vec<HighlightMarker>,
    pub diagnostics: Vec<RuleDiagnostic>,
}

impl ValidationOutput {
    pub fn critical_count(&self) -> usize {
        self.failures
            .iter()
            .filter(|failure| failure.severity == Severity::Critical)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.failures
            .iter()
            .filter(|failure| failure.severity == Severity::Warning)
            .count()
    }

    pub fn has_critical(&self) -> bool {
        self.critical_count() > 0
    }
}
