//! Validation rule definitions.
//!
//! A rule row in the authored rule table carries a question name, one or
//! more check-kind tags, a condition string, and an optional severity.
//! Tags and severities are kept as authored; mapping tags to [`CheckKind`]
//! happens in the engine so that unknown tags can be surfaced as
//! diagnostics instead of being dropped at load time.

use serde::{Deserialize, Serialize};

/// Severity attached to a rule and to every failure it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Severity {
    #[default]
    Critical,
    Warning,
}

impl Severity {
    /// Parse an authored severity value. Blank or unrecognized values fall
    /// back to `Critical`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "warning" | "warn" => Self::Warning,
            _ => Self::Critical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Warning => "Warning",
        }
    }
}

/// The closed set of check kinds the engine knows how to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckKind {
    Range,
    Missing,
    Skip,
    Straightliner,
    MultiSelect,
    Ranking,
    ConstantSum,
    OpenEndJunk,
    Duplicate,
}

impl CheckKind {
    /// Map an authored `Check_Type` tag to a check kind.
    ///
    /// Accepts the spellings seen in authored rule tables
    /// (`Multi-Select`, `OpenEnd_Junk`, `Constant Sum`, ...) and is
    /// case-insensitive. Returns `None` for unknown tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let normalized: String = tag
            .trim()
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "range" => Some(Self::Range),
            "missing" => Some(Self::Missing),
            "skip" | "skiplogic" => Some(Self::Skip),
            "straightliner" | "straightline" => Some(Self::Straightliner),
            "multiselect" => Some(Self::MultiSelect),
            "ranking" | "rank" => Some(Self::Ranking),
            "constantsum" => Some(Self::ConstantSum),
            "openendjunk" | "openend" => Some(Self::OpenEndJunk),
            "duplicate" | "duplicates" => Some(Self::Duplicate),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Range => "Range",
            Self::Missing => "Missing",
            Self::Skip => "Skip",
            Self::Straightliner => "Straightliner",
            Self::MultiSelect => "Multi-Select",
            Self::Ranking => "Ranking",
            Self::ConstantSum => "ConstantSum",
            Self::OpenEndJunk => "OpenEnd_Junk",
            Self::Duplicate => "Duplicate",
        }
    }
}

/// One row of the authored rule table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Question name, resolved against dataset columns by the engine.
    pub question: String,
    /// Check-kind tags as authored (semicolon-split, order preserved).
    pub check_types: Vec<String>,
    /// Condition string (semicolon-delimited grammar segments).
    pub condition: String,
    /// Severity applied to every failure this rule produces.
    pub severity: Severity,
}

impl Rule {
    pub fn new(
        question: impl Into<String>,
        check_types: &[&str],
        condition: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            check_types: check_types.iter().map(|s| (*s).to_string()).collect(),
            condition: condition.into(),
            severity: Severity::default(),
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}
