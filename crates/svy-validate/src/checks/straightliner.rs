//! Straightliner check: identical answers across every column of a grid.
//!
//! Incomplete rows are not straightliners; any blank cell exempts the row.

use svy_model::HighlightCategory;

use super::{CheckContext, CheckOutcome};

pub fn check(ctx: &CheckContext) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    if ctx.columns.len() < 2 {
        return outcome;
    }
    for row in ctx.required_rows() {
        let mut values = Vec::with_capacity(ctx.columns.len());
        for column in ctx.columns {
            match ctx.view.raw(column, row) {
                Some(value) => values.push(value.to_ascii_lowercase()),
                None => {
                    values.clear();
                    break;
                }
            }
        }
        if values.len() != ctx.columns.len() {
            continue;
        }
        let first = &values[0];
        if values.iter().all(|value| value == first) {
            outcome.fail(
                ctx,
                row,
                format!(
                    "Straightlined grid (identical answer across {} columns)",
                    ctx.columns.len()
                ),
            );
            for column in ctx.columns {
                outcome.mark(row, column, HighlightCategory::Straightliner);
            }
        }
    }
    outcome
}
