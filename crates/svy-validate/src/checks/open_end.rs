//! Open-end junk check: heuristic keyword/length screening of free text.
//!
//! Flags text below the declared minimum length, entries from the junk-word
//! set, and degenerate keyboard mashing (fewer than three distinct
//! characters at length four or more). No language-model scoring; these
//! are the heuristics data-processing teams actually run before delivery.

use std::collections::BTreeSet;

use svy_model::HighlightCategory;

use super::{CheckContext, CheckOutcome};

const DEFAULT_MIN_LEN: usize = 3;

/// Case-normalized junk answers; extended via `EngineOptions`.
const JUNK_WORDS: &[&str] = &[
    "asdf", "test", "none", "na", "n/a", "nothing", "abc", "good", "ok", "idk", "nil", "xyz",
    "qwerty", ".",
];

fn is_junk_word(ctx: &CheckContext, text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    JUNK_WORDS.contains(&lower.as_str())
        || ctx
            .options
            .extra_junk_words
            .iter()
            .any(|word| word.eq_ignore_ascii_case(&lower))
}

fn is_degenerate(text: &str) -> bool {
    let chars: Vec<char> = text.to_ascii_lowercase().chars().collect();
    if chars.len() < 4 {
        return false;
    }
    let distinct: BTreeSet<char> = chars.iter().copied().collect();
    distinct.len() < 3
}

pub fn check(ctx: &CheckContext) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    let min_len = ctx.params.min_len.unwrap_or(DEFAULT_MIN_LEN);
    for row in ctx.required_rows() {
        for column in ctx.columns {
            let Some(text) = ctx.view.raw(column, row) else {
                continue;
            };
            let issue = if is_junk_word(ctx, text) {
                Some(format!("Junk open-end response ('{text}')"))
            } else if text.chars().count() < min_len {
                Some(format!(
                    "Open-end too short ({} < {min_len} characters)",
                    text.chars().count()
                ))
            } else if is_degenerate(text) {
                Some("Degenerate open-end response".to_string())
            } else {
                None
            };
            if let Some(issue) = issue {
                outcome.fail(ctx, row, issue);
                outcome.mark(row, column, HighlightCategory::OpenEnd);
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testing::{Fixture, dataset};
    use svy_model::{EngineOptions, Rule};

    fn fixture(values: Vec<&'static str>, condition: &str) -> Fixture {
        let view = dataset(vec![
            ("RespID", (1..=values.len()).map(|_| "r").collect()),
            ("OE1", values),
        ]);
        Fixture::new(view, Rule::new("OE1", &["OpenEnd_Junk"], condition))
    }

    #[test]
    fn min_len_boundary() {
        let fixture = fixture(vec!["abcd", "abcde"], "MinLen=5");
        let outcome = check(&fixture.ctx());
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].issue.contains("too short"));
    }

    #[test]
    fn junk_word_fails_regardless_of_length() {
        let fixture = fixture(vec!["test"], "MinLen=2");
        let outcome = check(&fixture.ctx());
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].issue.contains("Junk"));
    }

    #[test]
    fn degenerate_repetition_fails() {
        let fixture = fixture(vec!["aaaaaa", "ababab", "decent answer"], "");
        let outcome = check(&fixture.ctx());
        assert_eq!(outcome.failures.len(), 2);
    }

    #[test]
    fn extra_junk_words_extend_the_set() {
        let mut fixture = fixture(vec!["whatever"], "");
        fixture.options = EngineOptions::new().with_extra_junk_words(["whatever"]);
        let outcome = check(&fixture.ctx());
        assert_eq!(outcome.failures.len(), 1);
    }

    #[test]
    fn blank_cells_are_out_of_scope() {
        let fixture = fixture(vec![""], "");
        assert!(check(&fixture.ctx()).failures.is_empty());
    }
}
