//! Column resolution: maps a rule's question name to the dataset columns
//! it governs.
//!
//! Precedence: exact case-insensitive match, then prefix match. When the
//! question name ends in a digit the character immediately following the
//! prefix must be non-digit, so `Q1` never absorbs `Q11` or `Q12`. Names
//! not ending in a digit accept any following character (grid-suffix forms
//! like `Q9_r1`). Every check shares this one resolver.

use crate::view::DatasetView;

/// Resolve a question name to an ordered subset of dataset columns.
///
/// An empty result means the rule contributes no failures; callers report
/// that as a diagnostic and move on.
pub fn resolve_columns(question: &str, view: &DatasetView) -> Vec<String> {
    let question = question.trim();
    if question.is_empty() {
        return Vec::new();
    }

    if let Some(exact) = view.resolve_name(question) {
        return vec![exact.to_string()];
    }

    let prefix = question.to_ascii_lowercase();
    let ends_in_digit = prefix.chars().last().is_some_and(|ch| ch.is_ascii_digit());

    view.columns()
        .iter()
        .filter(|column| {
            // The respondent identifier is only addressable by exact name.
            if column.as_str() == view.id_column() {
                return false;
            }
            let lower = column.to_ascii_lowercase();
            if !lower.starts_with(&prefix) || lower.len() == prefix.len() {
                return false;
            }
            if ends_in_digit {
                // Boundary guard: Q1 matches Q1_r2 but not Q11.
                !lower.as_bytes()[prefix.len()].is_ascii_digit()
            } else {
                true
            }
        })
        .cloned()
        .collect()
}
