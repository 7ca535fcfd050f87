//! Per-question failure summaries.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use svy_model::FailureRecord;

/// Aggregated failure stats for one question in the rule table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub question: String,
    /// Unique respondents with at least one failure on this question.
    pub failed_count: usize,
    /// `failed_count` as a percentage of the respondent base, 0.0 when the
    /// base is empty.
    pub percent_failed: f64,
}

/// Roll up failures per question against the respondent base.
///
/// Questions come back in lexicographic order so repeated runs produce
/// identical reports.
pub fn summarize(failures: &[FailureRecord], respondent_base: usize) -> Vec<QuestionSummary> {
    let mut by_question: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for failure in failures {
        by_question
            .entry(failure.question.as_str())
            .or_default()
            .insert(failure.respondent_id.as_str());
    }
    by_question
        .into_iter()
        .map(|(question, respondents)| {
            let failed_count = respondents.len();
            let percent_failed = if respondent_base == 0 {
                0.0
            } else {
                failed_count as f64 / respondent_base as f64 * 100.0
            };
            QuestionSummary {
                question: question.to_string(),
                failed_count,
                percent_failed,
            }
        })
        .collect()
}
