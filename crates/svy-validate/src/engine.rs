//! Rule engine: iterates the ordered rule table and dispatches checks.
//!
//! Evaluation is a pure function over (dataset, rules, options): all
//! failures, highlights, and diagnostics come back as one value and no
//! state survives the run. Malformed rules degrade to no-ops with a
//! diagnostic; only structural problems abort.

use std::collections::BTreeSet;

use polars::prelude::{AnyValue, DataFrame};
use tracing::{debug, debug_span};

use svy_ingest::any_to_string;

use svy_model::{
    CheckKind, EngineOptions, Result, Rule, RuleDiagnostic, ValidationOutput,
};

use crate::checks::{CheckContext, run_checks};
use crate::condition::parse_condition;
use crate::gate::build_gate;
use crate::resolver::resolve_columns;
use crate::view::DatasetView;

/// Validate a dataset against an ordered rule table.
///
/// The first dataset column is the respondent identifier. Rule order is
/// preserved; within a rule, checks run in the engine's fixed order.
pub fn validate(
    df: &DataFrame,
    rules: &[Rule],
    options: &EngineOptions,
) -> Result<ValidationOutput> {
    let view = DatasetView::new(df)?;
    let mut output = ValidationOutput::default();
    for rule in rules {
        evaluate_rule(&view, rule, options, &mut output);
    }
    debug!(
        failures = output.failures.len(),
        highlights = output.highlights.len(),
        diagnostics = output.diagnostics.len(),
        "validation pass complete"
    );
    Ok(output)
}

/// Count of unique, non-blank respondent identifiers; the denominator for
/// failure-rate summaries. Reads only the first column, so it stays cheap
/// on wide exports.
pub fn respondent_base(df: &DataFrame) -> usize {
    let Some(ids) = df.get_columns().first() else {
        return 0;
    };
    let mut unique = BTreeSet::new();
    for idx in 0..df.height() {
        let value = ids.get(idx).unwrap_or(AnyValue::Null);
        let id = any_to_string(value).trim().to_string();
        if !id.is_empty() {
            unique.insert(id);
        }
    }
    unique.len()
}

fn evaluate_rule(
    view: &DatasetView,
    rule: &Rule,
    options: &EngineOptions,
    output: &mut ValidationOutput,
) {
    let span = debug_span!("rule", question = %rule.question);
    let _enter = span.enter();

    let mut kinds = Vec::new();
    for tag in &rule.check_types {
        match CheckKind::from_tag(tag) {
            Some(kind) => {
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
            None => output.diagnostics.push(RuleDiagnostic {
                question: rule.question.clone(),
                reason: format!("unknown check type: {tag}"),
            }),
        }
    }

    let (params, mut diagnostics) = parse_condition(&rule.question, &rule.condition);
    output.diagnostics.append(&mut diagnostics);

    // `Not Null` activates Missing; `Unique` activates within-row
    // duplicate detection when no duplicate-style check was declared.
    if params.not_null && !kinds.contains(&CheckKind::Missing) {
        kinds.push(CheckKind::Missing);
    }
    if params.unique
        && !kinds.contains(&CheckKind::Ranking)
        && !kinds.contains(&CheckKind::Duplicate)
    {
        kinds.push(CheckKind::Ranking);
    }

    let columns = resolve_rule_columns(view, rule, &params, output);
    if columns.is_empty() {
        output.diagnostics.push(RuleDiagnostic {
            question: rule.question.clone(),
            reason: "no dataset column matches the question name".to_string(),
        });
        return;
    }

    if kinds.contains(&CheckKind::Range) && params.range.is_none() {
        output.diagnostics.push(RuleDiagnostic {
            question: rule.question.clone(),
            reason: "Range check declared without parseable lo-hi bounds".to_string(),
        });
    }
    if kinds.contains(&CheckKind::Skip) && params.skip.is_none() {
        output.diagnostics.push(RuleDiagnostic {
            question: rule.question.clone(),
            reason: "Skip check declared without a parseable IF condition".to_string(),
        });
    }

    let gate = build_gate(view, params.skip.as_ref(), options.blank_skip_base);
    let ctx = CheckContext {
        view,
        rule,
        columns: &columns,
        gate: &gate,
        params: &params,
        options,
    };
    let outcome = run_checks(&ctx, &kinds);
    debug!(
        columns = columns.len(),
        failures = outcome.failures.len(),
        "rule evaluated"
    );
    output.failures.extend(outcome.failures);
    output.highlights.extend(outcome.highlights);
}

/// Explicit `A1 to A5` enumerations take precedence over name resolution;
/// enumerated names missing from the dataset are dropped with a
/// diagnostic.
fn resolve_rule_columns(
    view: &DatasetView,
    rule: &Rule,
    params: &crate::condition::RuleParams,
    output: &mut ValidationOutput,
) -> Vec<String> {
    let Some(explicit) = &params.explicit_columns else {
        return resolve_columns(&rule.question, view);
    };
    let mut resolved = Vec::new();
    for name in explicit {
        match view.resolve_name(name) {
            Some(column) => resolved.push(column.to_string()),
            None => output.diagnostics.push(RuleDiagnostic {
                question: rule.question.clone(),
                reason: format!("enumerated column not in dataset: {name}"),
            }),
        }
    }
    if resolved.is_empty() {
        resolve_columns(&rule.question, view)
    } else {
        resolved
    }
}
