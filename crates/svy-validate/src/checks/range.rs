//! Numeric range check: inclusive [lo, hi] bounds per target column.

use svy_model::HighlightCategory;

use svy_ingest::format_numeric;

use super::{CheckContext, CheckOutcome};

pub fn check(ctx: &CheckContext) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    let Some((lo, hi)) = ctx.params.range else {
        // Declared without parseable bounds; the engine has already
        // diagnosed it.
        return outcome;
    };
    for row in ctx.required_rows() {
        for column in ctx.columns {
            let Some(value) = ctx.view.numeric(column, row) else {
                continue;
            };
            if value < lo || value > hi {
                outcome.fail(
                    ctx,
                    row,
                    format!(
                        "{column}: Out of range ({}-{})",
                        format_numeric(lo),
                        format_numeric(hi)
                    ),
                );
                outcome.mark(row, column, HighlightCategory::Range);
            }
        }
    }
    outcome
}
