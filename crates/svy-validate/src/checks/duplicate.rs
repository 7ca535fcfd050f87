//! Duplicate check: a column value repeated across respondents.
//!
//! Detection is global across the dataset's required rows, one failure per
//! occurrence. There is no highlight category for duplicates; this check
//! feeds the failure log only.

use std::collections::BTreeMap;

use super::{CheckContext, CheckOutcome};

pub fn check(ctx: &CheckContext) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    for column in ctx.columns {
        let mut by_value: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for row in ctx.required_rows() {
            if let Some(value) = ctx.view.raw(column, row) {
                by_value
                    .entry(value.to_ascii_lowercase())
                    .or_default()
                    .push(row);
            }
        }
        for (value, rows) in by_value {
            if rows.len() < 2 {
                continue;
            }
            for row in rows.iter().copied() {
                outcome.fail(
                    ctx,
                    row,
                    format!(
                        "{column}: Duplicate value '{value}' shared by {} respondents",
                        rows.len()
                    ),
                );
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testing::{Fixture, dataset};
    use svy_model::Rule;

    #[test]
    fn every_occurrence_is_flagged() {
        let view = dataset(vec![
            ("RespID", vec!["1", "2", "3"]),
            ("EMAIL", vec!["a@x.com", "A@X.COM", "b@x.com"]),
        ]);
        let fixture = Fixture::new(view, Rule::new("EMAIL", &["Duplicate"], ""));
        let outcome = check(&fixture.ctx());
        assert_eq!(outcome.failures.len(), 2);
        assert!(outcome.highlights.is_empty());
    }

    #[test]
    fn blanks_are_never_duplicates() {
        let view = dataset(vec![
            ("RespID", vec!["1", "2"]),
            ("EMAIL", vec!["", ""]),
        ]);
        let fixture = Fixture::new(view, Rule::new("EMAIL", &["Duplicate"], ""));
        assert!(check(&fixture.ctx()).failures.is_empty());
    }
}
