use thiserror::Error;

/// Structural errors that abort a validation run with no partial result.
///
/// Rule-definition problems never surface here; they degrade the affected
/// rule to a no-op and are reported as [`crate::RuleDiagnostic`]s instead.
#[derive(Debug, Error)]
pub enum SvyError {
    #[error("dataset has no columns; a respondent-identifier column is required")]
    EmptyDataset,
    #[error("first dataset column has no header; it must name the respondent identifier")]
    MissingRespondentId,
    #[error("malformed rule table: {0}")]
    MalformedRuleTable(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, SvyError>;
