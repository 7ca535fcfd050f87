//! Multi-select check: minimum number of selected options.
//!
//! A column counts as selected when its numeric value is positive, or when
//! it holds non-numeric text (punch exports sometimes carry labels instead
//! of 0/1 flags).

use svy_model::HighlightCategory;

use super::{CheckContext, CheckOutcome};

const DEFAULT_MIN_SELECTED: usize = 1;

fn is_selected(ctx: &CheckContext, column: &str, row: usize) -> bool {
    match ctx.view.numeric(column, row) {
        Some(value) => value > 0.0,
        None => !ctx.view.is_blank(column, row),
    }
}

pub fn check(ctx: &CheckContext) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    let min = ctx.params.min_selected.unwrap_or(DEFAULT_MIN_SELECTED);
    for row in ctx.required_rows() {
        let selected = ctx
            .columns
            .iter()
            .filter(|column| is_selected(ctx, column, row))
            .count();
        if selected < min {
            outcome.fail(
                ctx,
                row,
                format!("Fewer than {min} option(s) selected ({selected})"),
            );
            for column in ctx.columns {
                outcome.mark(row, column, HighlightCategory::Multiselect);
            }
        }
    }
    outcome
}
