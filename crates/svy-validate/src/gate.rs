//! Requirement gate: the per-row "must answer" signal derived from skip
//! logic.
//!
//! The gate is the scope filter for every check attached to a rule:
//! non-Skip checks run where the gate is true, the Skip-violation check
//! runs where it is false. The two scopes partition the rows, so no row is
//! ever counted under both for the same rule.

use svy_model::BlankSkipBase;

use crate::condition::{Action, SkipCondition};
use crate::view::DatasetView;

/// Build the per-row requirement gate. Without a skip condition every row
/// is required.
pub fn build_gate(
    view: &DatasetView,
    skip: Option<&SkipCondition>,
    blank_skip_base: BlankSkipBase,
) -> Vec<bool> {
    let Some(skip) = skip else {
        return vec![true; view.height()];
    };
    (0..view.height())
        .map(|row| {
            let action = match skip.trigger.eval(view, row) {
                Some(true) => skip.when_true,
                Some(false) => skip.when_false,
                // Blank base cell: resolved by explicit policy, not a guess.
                None => {
                    return blank_skip_base == BlankSkipBase::Required;
                }
            };
            action == Action::Answered
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::parse_condition;
    use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

    fn view(columns: Vec<(&str, Vec<&str>)>) -> DatasetView {
        let cols: Vec<Column> = columns
            .into_iter()
            .map(|(name, values)| {
                Series::new(
                    name.into(),
                    values.iter().copied().map(String::from).collect::<Vec<_>>(),
                )
                .into_column()
            })
            .collect();
        DatasetView::new(&DataFrame::new(cols).unwrap()).unwrap()
    }

    #[test]
    fn no_skip_means_all_required() {
        let view = view(vec![("RespID", vec!["1", "2"]), ("Q1", vec!["1", "2"])]);
        assert_eq!(build_gate(&view, None, BlankSkipBase::default()), vec![true, true]);
    }

    #[test]
    fn gate_follows_then_and_else_actions() {
        let view = view(vec![
            ("RespID", vec!["1", "2"]),
            ("A", vec!["1", "2"]),
            ("Q", vec!["x", "y"]),
        ]);
        let (params, _) = parse_condition("Q", "IF A IN (1) THEN ANSWERED ELSE BLANK");
        let gate = build_gate(&view, params.skip.as_ref(), BlankSkipBase::default());
        assert_eq!(gate, vec![true, false]);
    }

    #[test]
    fn blank_base_follows_policy() {
        let view = view(vec![
            ("RespID", vec!["1"]),
            ("A", vec![""]),
            ("Q", vec!["x"]),
        ]);
        let (params, _) = parse_condition("Q", "IF A IN (1) THEN ANSWERED ELSE BLANK");
        let not_required = build_gate(&view, params.skip.as_ref(), BlankSkipBase::NotRequired);
        assert_eq!(not_required, vec![false]);
        let required = build_gate(&view, params.skip.as_ref(), BlankSkipBase::Required);
        assert_eq!(required, vec![true]);
    }
}
