//! Missing-answer check.
//!
//! Single-column questions fail when the cell is blank. Grids distinguish
//! "all columns blank" from "some columns blank" with separate issue
//! strings so the rule author can tell a skipped grid from a half-finished
//! one.

use svy_model::HighlightCategory;

use super::{CheckContext, CheckOutcome};

pub fn check(ctx: &CheckContext) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    for row in ctx.required_rows() {
        let blank: Vec<&String> = ctx
            .columns
            .iter()
            .filter(|column| ctx.view.is_blank(column, row))
            .collect();
        if blank.is_empty() {
            continue;
        }
        if ctx.columns.len() == 1 {
            outcome.fail(ctx, row, "Missing value".to_string());
            outcome.mark(row, ctx.columns[0].as_str(), HighlightCategory::Missing);
        } else if blank.len() == ctx.columns.len() {
            outcome.fail(
                ctx,
                row,
                format!("All {} grid columns blank", ctx.columns.len()),
            );
            for column in &blank {
                outcome.mark(row, column, HighlightCategory::Missing);
            }
        } else {
            let names: Vec<&str> = blank.iter().map(|column| column.as_str()).collect();
            outcome.fail(
                ctx,
                row,
                format!(
                    "Incomplete grid ({} of {} columns blank: {})",
                    blank.len(),
                    ctx.columns.len(),
                    names.join(", ")
                ),
            );
            for column in &blank {
                outcome.mark(row, column, HighlightCategory::Missing);
            }
        }
    }
    outcome
}
