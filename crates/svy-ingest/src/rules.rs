//! Rule table loading.
//!
//! Reads the authored validation rule table (CSV) into [`Rule`] records.
//! Required headers: `Question`, `Check_Type`, `Condition`; optional:
//! `Severity` (defaults to Critical). Header matching is case-insensitive.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use svy_model::{Result, Rule, Severity, SvyError};

const QUESTION_HEADER: &str = "question";
const CHECK_TYPE_HEADER: &str = "check_type";
const CONDITION_HEADER: &str = "condition";
const SEVERITY_HEADER: &str = "severity";

fn find_header(headers: &[String], wanted: &str) -> Option<usize> {
    headers.iter().position(|header| {
        header
            .trim()
            .trim_matches('\u{feff}')
            .eq_ignore_ascii_case(wanted)
    })
}

/// Read the rule table from a CSV file.
///
/// Rows with a blank `Question` are skipped with a warning; they could
/// never resolve to a dataset column. Missing required headers are a
/// structural error.
pub fn read_rules_csv(path: &Path) -> Result<Vec<Rule>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|error| SvyError::Message(format!("read {}: {error}", path.display())))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|error| SvyError::Message(format!("read {}: {error}", path.display())))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let question_idx = find_header(&headers, QUESTION_HEADER)
        .ok_or_else(|| SvyError::MalformedRuleTable("missing 'Question' column".to_string()))?;
    let check_type_idx = find_header(&headers, CHECK_TYPE_HEADER)
        .ok_or_else(|| SvyError::MalformedRuleTable("missing 'Check_Type' column".to_string()))?;
    let condition_idx = find_header(&headers, CONDITION_HEADER)
        .ok_or_else(|| SvyError::MalformedRuleTable("missing 'Condition' column".to_string()))?;
    let severity_idx = find_header(&headers, SEVERITY_HEADER);

    let mut rules = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|error| SvyError::Message(format!("read {}: {error}", path.display())))?;
        let question = record.get(question_idx).unwrap_or("").trim().to_string();
        if question.is_empty() {
            warn!(row = rules.len() + 1, "skipping rule row with blank Question");
            continue;
        }
        let check_types: Vec<String> = record
            .get(check_type_idx)
            .unwrap_or("")
            .split(';')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(ToString::to_string)
            .collect();
        let condition = record.get(condition_idx).unwrap_or("").trim().to_string();
        let severity = severity_idx
            .and_then(|idx| record.get(idx))
            .map(Severity::from_tag)
            .unwrap_or_default();
        rules.push(Rule {
            question,
            check_types,
            condition,
            severity,
        });
    }
    debug!(rules = rules.len(), "rule table loaded");
    Ok(rules)
}
