//! Report writers: failure log CSV, diagnostics CSV, summary JSON.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use svy_model::{FailureRecord, RuleDiagnostic, ValidationOutput};

use crate::summary::{QuestionSummary, summarize};

/// Schema tag carried by the JSON summary payload.
pub const SUMMARY_SCHEMA: &str = "survey-validation-summary";
pub const SUMMARY_SCHEMA_VERSION: u32 = 1;

/// Top-level JSON summary document.
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryReport {
    pub schema: String,
    pub schema_version: u32,
    pub generated_at: String,
    pub respondent_base: usize,
    pub critical_count: usize,
    pub warning_count: usize,
    pub questions: Vec<QuestionSummary>,
    pub diagnostics: Vec<RuleDiagnostic>,
}

impl SummaryReport {
    pub fn new(output: &ValidationOutput, respondent_base: usize) -> Self {
        Self {
            schema: SUMMARY_SCHEMA.to_string(),
            schema_version: SUMMARY_SCHEMA_VERSION,
            generated_at: Utc::now().to_rfc3339(),
            respondent_base,
            critical_count: output.critical_count(),
            warning_count: output.warning_count(),
            questions: summarize(&output.failures, respondent_base),
            diagnostics: output.diagnostics.clone(),
        }
    }
}

/// Write the flat failure log as CSV.
pub fn write_failures_csv(path: &Path, failures: &[FailureRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create failure report {}", path.display()))?;
    writer.write_record(["RespondentId", "Question", "Issue", "Severity"])?;
    for failure in failures {
        writer.write_record([
            failure.respondent_id.as_str(),
            failure.question.as_str(),
            failure.issue.as_str(),
            failure.severity.as_str(),
        ])?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = failures.len(), "failure report written");
    Ok(())
}

/// Write rule diagnostics as CSV. Skipped entirely when there are none.
pub fn write_diagnostics_csv(path: &Path, diagnostics: &[RuleDiagnostic]) -> Result<()> {
    if diagnostics.is_empty() {
        return Ok(());
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create diagnostics report {}", path.display()))?;
    writer.write_record(["Question", "Reason"])?;
    for diagnostic in diagnostics {
        writer.write_record([diagnostic.question.as_str(), diagnostic.reason.as_str()])?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = diagnostics.len(), "diagnostics written");
    Ok(())
}

/// Write the schema-tagged JSON summary.
pub fn write_summary_json(
    path: &Path,
    output: &ValidationOutput,
    respondent_base: usize,
) -> Result<()> {
    let report = SummaryReport::new(output, respondent_base);
    let file = File::create(path)
        .with_context(|| format!("create summary report {}", path.display()))?;
    serde_json::to_writer_pretty(file, &report)
        .with_context(|| format!("write summary report {}", path.display()))?;
    info!(path = %path.display(), questions = report.questions.len(), "summary written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use svy_model::Severity;

    fn sample_output() -> ValidationOutput {
        ValidationOutput {
            failures: vec![
                FailureRecord {
                    respondent_id: "1001".to_string(),
                    question: "Q1".to_string(),
                    issue: "Q1: Out of range (1-5)".to_string(),
                    severity: Severity::Critical,
                },
                FailureRecord {
                    respondent_id: "1002".to_string(),
                    question: "OE1".to_string(),
                    issue: "Junk open-end response ('asdf')".to_string(),
                    severity: Severity::Warning,
                },
            ],
            highlights: Vec::new(),
            diagnostics: vec![RuleDiagnostic {
                question: "Q99".to_string(),
                reason: "no dataset column matches the question name".to_string(),
            }],
        }
    }

    #[test]
    fn failure_csv_has_stable_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("failures.csv");
        write_failures_csv(&path, &sample_output().failures).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("RespondentId,Question,Issue,Severity"));
        assert_eq!(lines.next(), Some("1001,Q1,Q1: Out of range (1-5),Critical"));
        assert_eq!(lines.clone().count(), 1);
    }

    #[test]
    fn summary_json_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        write_summary_json(&path, &sample_output(), 50).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let report: SummaryReport = serde_json::from_str(&contents).unwrap();
        assert_eq!(report.schema, SUMMARY_SCHEMA);
        assert_eq!(report.respondent_base, 50);
        assert_eq!(report.critical_count, 1);
        assert_eq!(report.warning_count, 1);
        assert_eq!(report.questions.len(), 2);
        assert_eq!(report.diagnostics.len(), 1);
    }

    #[test]
    fn empty_diagnostics_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagnostics.csv");
        write_diagnostics_csv(&path, &[]).unwrap();
        assert!(!path.exists());
    }
}
