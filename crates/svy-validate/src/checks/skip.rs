//! Skip-violation check: answered where skip logic requires blank.
//!
//! Operates on the inverse gate scope. One failure per violating row;
//! every answered cell gets a highlight.

use svy_model::HighlightCategory;

use super::{CheckContext, CheckOutcome};

pub fn check(ctx: &CheckContext) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    if ctx.params.skip.is_none() {
        return outcome;
    }
    for row in ctx.skipped_rows() {
        let answered: Vec<&String> = ctx
            .columns
            .iter()
            .filter(|column| !ctx.view.is_blank(column, row))
            .collect();
        if answered.is_empty() {
            continue;
        }
        outcome.fail(
            ctx,
            row,
            "Answered but skip logic requires blank".to_string(),
        );
        for column in answered {
            outcome.mark(row, column, HighlightCategory::Skip);
        }
    }
    outcome
}
