//! Constant-sum check: target columns must sum to an exact total.
//!
//! No tolerance: 99.999 against a 100 target fails. Rows with every target
//! cell blank are left to the Missing check.

use svy_model::HighlightCategory;

use svy_ingest::format_numeric;

use super::{CheckContext, CheckOutcome};

const DEFAULT_TOTAL: f64 = 100.0;

pub fn check(ctx: &CheckContext) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    let total = ctx.params.target_total.unwrap_or(DEFAULT_TOTAL);
    for row in ctx.required_rows() {
        let values: Vec<f64> = ctx
            .columns
            .iter()
            .filter_map(|column| ctx.view.numeric(column, row))
            .collect();
        if values.is_empty() {
            continue;
        }
        let sum: f64 = values.iter().sum();
        if sum != total {
            outcome.fail(
                ctx,
                row,
                format!(
                    "Sum {} differs from required total {}",
                    format_numeric(sum),
                    format_numeric(total)
                ),
            );
            for column in ctx.columns {
                outcome.mark(row, column, HighlightCategory::Constantsum);
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
    fn exact_total_passes_no_tolerance() {
        let view = dataset(vec![
            ("RespID", vec!["1", "2"]),
            ("C1", vec!["60", "60"]),
            ("C2", vec!["40", "39.999"]),
        ]);
        let fixture = Fixture::new(view, Rule::new("C", &["ConstantSum"], "Total=100"));
        let outcome = check(&fixture.ctx());
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].respondent_id, "2");
    }

    #[test]
    fn all_blank_row_is_left_to_missing() {
        let view = dataset(vec![
            ("RespID", vec!["1"]),
            ("C1", vec![""]),
            ("C2", vec![""]),
        ]);
        let fixture = Fixture::new(view, Rule::new("C", &["ConstantSum"], ""));
        assert!(check(&fixture.ctx()).failures.is_empty());
    }

    #[test]
    fn default_total_is_100() {
        let view = dataset(vec![
            ("RespID", vec!["1"]),
            ("C1", vec!["50"]),
            ("C2", vec!["49"]),
        ]);
        let fixture = Fixture::new(view, Rule::new("C", &["ConstantSum"], ""));
        let outcome = check(&fixture.ctx());
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].issue.contains("total 100"));
    }
}
