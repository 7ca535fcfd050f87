//! Check library: one evaluator per check kind.
//!
//! Every evaluator consumes the same context (resolved columns, requirement
//! gate, raw/numeric views, parsed parameters) and produces failures plus
//! highlight markers. Evaluators run in a fixed order; later markers
//! overwrite earlier ones on the same cell, but the failure list always
//! records every independent violation.

mod constant_sum;
mod duplicate;
mod missing;
mod multiselect;
mod open_end;
mod range;
mod ranking;
mod skip;
mod straightliner;

use svy_model::{
    CheckKind, EngineOptions, FailureRecord, HighlightCategory, HighlightMarker, Rule,
};

use crate::condition::RuleParams;
use crate::view::DatasetView;

/// Everything an evaluator needs for one rule.
pub struct CheckContext<'a> {
    pub view: &'a DatasetView,
    pub rule: &'a Rule,
    pub columns: &'a [String],
    pub gate: &'a [bool],
    pub params: &'a RuleParams,
    pub options: &'a EngineOptions,
}

impl CheckContext<'_> {
    /// Rows the requirement gate marks as "must answer".
    pub fn required_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.view.height()).filter(|row| self.is_required(*row))
    }

    /// Rows skip logic marks as "must be blank" (the inverse scope).
    pub fn skipped_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.view.height()).filter(|row| !self.is_required(*row))
    }

    pub fn is_required(&self, row: usize) -> bool {
        self.gate.get(row).copied().unwrap_or(true)
    }

    fn failure(&self, row: usize, issue: String) -> FailureRecord {
        FailureRecord {
            respondent_id: self.view.respondent_id(row).to_string(),
            question: self.rule.question.clone(),
            issue,
            severity: self.rule.severity,
        }
    }
}

/// Failures and highlight markers from one evaluator.
#[derive(Debug, Default)]
pub struct CheckOutcome {
    pub failures: Vec<FailureRecord>,
    pub highlights: Vec<HighlightMarker>,
}

impl CheckOutcome {
    fn fail(&mut self, ctx: &CheckContext, row: usize, issue: String) {
        self.failures.push(ctx.failure(row, issue));
    }

    fn mark(&mut self, row: usize, column: &str, category: HighlightCategory) {
        self.highlights.push(HighlightMarker {
            row,
            column: column.to_string(),
            category,
        });
    }

    fn absorb(&mut self, mut other: CheckOutcome) {
        self.failures.append(&mut other.failures);
        self.highlights.append(&mut other.highlights);
    }
}

/// Fixed, deterministic evaluation order (drives highlight layering).
const EVALUATION_ORDER: &[CheckKind] = &[
    CheckKind::Skip,
    CheckKind::Missing,
    CheckKind::Range,
    CheckKind::MultiSelect,
    CheckKind::Straightliner,
    CheckKind::Ranking,
    CheckKind::ConstantSum,
    CheckKind::OpenEndJunk,
    CheckKind::Duplicate,
];

/// Run every declared check for one rule.
pub fn run_checks(ctx: &CheckContext, kinds: &[CheckKind]) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    for kind in EVALUATION_ORDER {
        if !kinds.contains(kind) {
            continue;
        }
        let partial = match kind {
            CheckKind::Skip => skip::check(ctx),
            CheckKind::Missing => missing::check(ctx),
            CheckKind::Range => range::check(ctx),
            CheckKind::MultiSelect => multiselect::check(ctx),
            CheckKind::Straightliner => straightliner::check(ctx),
            CheckKind::Ranking => ranking::check(ctx),
            CheckKind::ConstantSum => constant_sum::check(ctx),
            CheckKind::OpenEndJunk => open_end::check(ctx),
            CheckKind::Duplicate => duplicate::check(ctx),
        };
        outcome.absorb(partial);
    }
    outcome
}

#[cfg(test)]
pub(crate) mod testing {
    use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

    use svy_model::{EngineOptions, Rule};

    use crate::condition::{RuleParams, parse_condition};
    use crate::gate::build_gate;
    use crate::resolver::resolve_columns;
    use crate::view::DatasetView;

    pub fn dataset(columns: Vec<(&str, Vec<&str>)>) -> DatasetView {
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

    pub struct Fixture {
        pub view: DatasetView,
        pub rule: Rule,
        pub columns: Vec<String>,
        pub gate: Vec<bool>,
        pub params: RuleParams,
        pub options: EngineOptions,
    }

    impl Fixture {
        pub fn new(view: DatasetView, rule: Rule) -> Self {
            let (params, _) = parse_condition(&rule.question, &rule.condition);
            let columns = match &params.explicit_columns {
                Some(explicit) => explicit
                    .iter()
                    .filter_map(|name| view.resolve_name(name).map(ToString::to_string))
                    .collect(),
                None => resolve_columns(&rule.question, &view),
            };
            let gate = build_gate(&view, params.skip.as_ref(), EngineOptions::default().blank_skip_base);
            Self {
                view,
                rule,
                columns,
                gate,
                params,
                options: EngineOptions::default(),
            }
        }

        pub fn ctx(&self) -> super::CheckContext<'_> {
            super::CheckContext {
                view: &self.view,
                rule: &self.rule,
                columns: &self.columns,
                gate: &self.gate,
                params: &self.params,
                options: &self.options,
            }
        }
    }
}
