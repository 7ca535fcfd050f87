//! Condition grammar: parsing and per-row evaluation.
//!
//! The authored `Condition` cell is a semicolon-delimited list of segments,
//! order-independent, with several overloaded forms:
//!
//! - `lo-hi`                      inclusive numeric range
//! - `Not Null`                   activates the Missing check
//! - `IF <trigger> THEN <action> [ELSE <action>]`  skip logic
//! - `Min=<n>` / `Total=<n>` / `MinLen=<n>`        check parameters
//! - `Unique`                     duplicate-value flag
//! - `ColA1 to ColA5`             explicit column enumeration
//!
//! Triggers parse into a tagged tree (comparison atoms combined by AND/OR,
//! OR binding loosest) so every downstream consumer shares one evaluator.
//! A malformed segment degrades to a diagnostic; it never aborts the run.

use std::sync::LazyLock;

use regex::Regex;

use svy_model::RuleDiagnostic;

use crate::view::DatasetView;

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*-\s*(-?\d+(?:\.\d+)?)\s*$").expect("range regex")
});
static KEY_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(min|minlen|total)\s*=\s*(.+?)\s*$").expect("key=value regex")
});
static SKIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^\s*if\s+(.+?)\s+then\s+(answered|blank)(?:\s+else\s+(answered|blank))?\s*$")
        .expect("skip regex")
});
static COLUMN_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*([A-Za-z_][A-Za-z0-9_]*?)(\d+)\s+to\s+([A-Za-z_][A-Za-z0-9_]*?)(\d+)\s*$")
        .expect("column range regex")
});
static IN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*([A-Za-z_][A-Za-z0-9_]*)\s+in\s*\(([^)]*)\)\s*$").expect("in regex")
});
static COMPARE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*(<=|>=|!=|=|<|>)\s*(.+?)\s*$")
        .expect("compare regex")
});

/// Right-hand side of a comparison: numeric when coercible, with the
/// authored text kept for string fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub text: String,
    pub number: Option<f64>,
}

impl Literal {
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim().to_string();
        let number = text.parse::<f64>().ok();
        Self { text, number }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(Self::Eq),
            "!=" => Some(Self::Ne),
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Le),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::Ge),
            _ => None,
        }
    }

    fn compare(self, left: f64, right: f64) -> bool {
        match self {
            Self::Eq => left == right,
            Self::Ne => left != right,
            Self::Lt => left < right,
            Self::Le => left <= right,
            Self::Gt => left > right,
            Self::Ge => left >= right,
        }
    }
}

/// Parsed trigger tree. `AnyOf` of `AllOf`s: OR has lower precedence.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    Compare {
        column: String,
        op: CompareOp,
        value: Literal,
    },
    InSet {
        column: String,
        values: Vec<Literal>,
    },
    InRange {
        column: String,
        lo: f64,
        hi: f64,
    },
    AllOf(Vec<Trigger>),
    AnyOf(Vec<Trigger>),
}

/// What the gated question must do when the trigger fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Answered,
    Blank,
}

impl Action {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "answered" => Some(Self::Answered),
            "blank" => Some(Self::Blank),
            _ => None,
        }
    }

    /// Implicit ELSE is the negation of the THEN action.
    pub fn negated(self) -> Self {
        match self {
            Self::Answered => Self::Blank,
            Self::Blank => Self::Answered,
        }
    }
}

/// A parsed `IF ... THEN ... [ELSE ...]` skip condition.
#[derive(Debug, Clone, PartialEq)]
pub struct SkipCondition {
    pub trigger: Trigger,
    pub when_true: Action,
    pub when_false: Action,
}

/// All parameters a rule's condition cell can carry, in one bag shared by
/// every check kind attached to the rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleParams {
    pub range: Option<(f64, f64)>,
    pub skip: Option<SkipCondition>,
    pub min_selected: Option<usize>,
    pub target_total: Option<f64>,
    pub min_len: Option<usize>,
    pub not_null: bool,
    pub unique: bool,
    pub explicit_columns: Option<Vec<String>>,
}

/// Parse a condition cell into [`RuleParams`] plus diagnostics for the
/// segments that looked structured but failed to parse. Free text that
/// matches no grammar element ("At least one selected") is ignored.
pub fn parse_condition(question: &str, condition: &str) -> (RuleParams, Vec<RuleDiagnostic>) {
    let mut params = RuleParams::default();
    let mut diagnostics = Vec::new();
    let mut diagnose = |reason: String| {
        diagnostics.push(RuleDiagnostic {
            question: question.to_string(),
            reason,
        });
    };

    for segment in condition.split(';') {
        let segment = segment.trim();
        if segment.is_empty() || segment.eq_ignore_ascii_case("nan") {
            continue;
        }

        if segment.to_ascii_lowercase().starts_with("if ") {
            match parse_skip(segment) {
                Some(skip) => params.skip = Some(skip),
                None => diagnose(format!("unparseable skip condition: {segment}")),
            }
            continue;
        }

        if let Some(caps) = KEY_VALUE_RE.captures(segment) {
            let key = caps[1].to_ascii_lowercase();
            let value = caps[2].trim();
            match key.as_str() {
                "min" => match value.parse::<usize>() {
                    Ok(n) => params.min_selected = Some(n),
                    Err(_) => diagnose(format!("invalid Min value: {value}")),
                },
                "minlen" => match value.parse::<usize>() {
                    Ok(n) => params.min_len = Some(n),
                    Err(_) => diagnose(format!("invalid MinLen value: {value}")),
                },
                "total" => match value.parse::<f64>() {
                    Ok(n) => params.target_total = Some(n),
                    Err(_) => diagnose(format!("invalid Total value: {value}")),
                },
                _ => {}
            }
            continue;
        }

        if segment.eq_ignore_ascii_case("not null") {
            params.not_null = true;
            continue;
        }
        if segment.eq_ignore_ascii_case("unique") {
            params.unique = true;
            continue;
        }

        if let Some(caps) = COLUMN_RANGE_RE.captures(segment) {
            match expand_column_range(&caps[1], &caps[2], &caps[3], &caps[4]) {
                Some(columns) => params.explicit_columns = Some(columns),
                None => diagnose(format!("unparseable column range: {segment}")),
            }
            continue;
        }

        if let Some(caps) = RANGE_RE.captures(segment) {
            let lo: f64 = caps[1].parse().unwrap_or(f64::NAN);
            let hi: f64 = caps[2].parse().unwrap_or(f64::NAN);
            if lo.is_nan() || hi.is_nan() || lo > hi {
                diagnose(format!("invalid numeric range: {segment}"));
            } else {
                params.range = Some((lo, hi));
            }
            continue;
        }

        // Free-text annotation; carries no parameters.
    }

    (params, diagnostics)
}

fn parse_skip(segment: &str) -> Option<SkipCondition> {
    let caps = SKIP_RE.captures(segment)?;
    let trigger = parse_trigger(&caps[1])?;
    let when_true = Action::parse(&caps[2])?;
    let when_false = caps
        .get(3)
        .and_then(|m| Action::parse(m.as_str()))
        .unwrap_or_else(|| when_true.negated());
    Some(SkipCondition {
        trigger,
        when_true,
        when_false,
    })
}

/// Parse a trigger expression: disjunction (`OR`) of conjunctions (`AND`)
/// of comparison/membership atoms.
pub fn parse_trigger(text: &str) -> Option<Trigger> {
    let mut disjuncts = Vec::new();
    for part in split_keyword(text, "OR") {
        let mut conjuncts = Vec::new();
        for atom in split_keyword(&part, "AND") {
            conjuncts.push(parse_atom(&atom)?);
        }
        disjuncts.push(match conjuncts.len() {
            0 => return None,
            1 => conjuncts.remove(0),
            _ => Trigger::AllOf(conjuncts),
        });
    }
    match disjuncts.len() {
        0 => None,
        1 => Some(disjuncts.remove(0)),
        _ => Some(Trigger::AnyOf(disjuncts)),
    }
}

/// Split on a bare keyword outside parentheses, case-insensitively.
fn split_keyword(text: &str, keyword: &str) -> Vec<String> {
    let upper = text.to_ascii_uppercase();
    let bytes = upper.as_bytes();
    let keyword = keyword.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            _ if depth == 0 && bytes[i..].starts_with(keyword) => {
                let boundary_before =
                    i == 0 || (!bytes[i - 1].is_ascii_alphanumeric() && bytes[i - 1] != b'_');
                let after = i + keyword.len();
                let boundary_after = after >= bytes.len()
                    || (!bytes[after].is_ascii_alphanumeric() && bytes[after] != b'_');
                if boundary_before && boundary_after {
                    parts.push(text[start..i].to_string());
                    i = after;
                    start = i;
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(text[start..].to_string());
    parts
}

fn parse_atom(text: &str) -> Option<Trigger> {
    if let Some(caps) = IN_RE.captures(text) {
        let column = caps[1].to_string();
        let body = caps[2].trim();
        if !body.contains(',')
            && let Some(range) = RANGE_RE.captures(body)
        {
            let lo: f64 = range[1].parse().ok()?;
            let hi: f64 = range[2].parse().ok()?;
            return Some(Trigger::InRange { column, lo, hi });
        }
        let values: Vec<Literal> = body
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(Literal::parse)
            .collect();
        if values.is_empty() {
            return None;
        }
        return Some(Trigger::InSet { column, values });
    }

    let caps = COMPARE_RE.captures(text)?;
    let op = CompareOp::from_symbol(&caps[2])?;
    Some(Trigger::Compare {
        column: caps[1].to_string(),
        op,
        value: Literal::parse(&caps[3]),
    })
}

/// Expand `ColA1 to ColA5` into `[ColA1, ColA2, ..., ColA5]` by
/// incrementing the trailing numeric suffix. Both ends must share the same
/// prefix.
fn expand_column_range(
    prefix_a: &str,
    suffix_a: &str,
    prefix_b: &str,
    suffix_b: &str,
) -> Option<Vec<String>> {
    if !prefix_a.eq_ignore_ascii_case(prefix_b) {
        return None;
    }
    let start: u64 = suffix_a.parse().ok()?;
    let end: u64 = suffix_b.parse().ok()?;
    if end < start {
        return None;
    }
    Some((start..=end).map(|n| format!("{prefix_a}{n}")).collect())
}

impl Trigger {
    /// Evaluate against one row.
    ///
    /// `Some(bool)` is a definite answer; `None` means the base cell was
    /// blank, which the requirement gate maps through the configured
    /// blank-skip-base policy. A trigger naming a column absent from the
    /// dataset is permanently false, never an error.
    pub fn eval(&self, view: &DatasetView, row: usize) -> Option<bool> {
        match self {
            Self::Compare { column, op, value } => {
                let Some(column) = view.resolve_name(column) else {
                    return Some(false);
                };
                let raw = view.raw(column, row)?;
                if let (Some(number), Some(cell)) = (value.number, view.numeric(column, row)) {
                    return Some(op.compare(cell, number));
                }
                match op {
                    CompareOp::Eq => Some(raw.eq_ignore_ascii_case(&value.text)),
                    CompareOp::Ne => Some(!raw.eq_ignore_ascii_case(&value.text)),
                    _ => Some(false),
                }
            }
            Self::InSet { column, values } => {
                let Some(column) = view.resolve_name(column) else {
                    return Some(false);
                };
                let raw = view.raw(column, row)?;
                let cell = view.numeric(column, row);
                Some(values.iter().any(|value| match (value.number, cell) {
                    (Some(number), Some(cell)) => cell == number,
                    _ => raw.eq_ignore_ascii_case(&value.text),
                }))
            }
            Self::InRange { column, lo, hi } => {
                let Some(column) = view.resolve_name(column) else {
                    return Some(false);
                };
                view.raw(column, row)?;
                match view.numeric(column, row) {
                    Some(cell) => Some(cell >= *lo && cell <= *hi),
                    None => Some(false),
                }
            }
            Self::AllOf(triggers) => {
                let mut saw_blank = false;
                for trigger in triggers {
                    match trigger.eval(view, row) {
                        Some(false) => return Some(false),
                        None => saw_blank = true,
                        Some(true) => {}
                    }
                }
                if saw_blank { None } else { Some(true) }
            }
            Self::AnyOf(triggers) => {
                let mut saw_blank = false;
                for trigger in triggers {
                    match trigger.eval(view, row) {
                        Some(true) => return Some(true),
                        None => saw_blank = true,
                        Some(false) => {}
                    }
                }
                if saw_blank { None } else { Some(false) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

    fn frame(columns: Vec<(&str, Vec<&str>)>) -> DatasetView {
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
    fn parses_numeric_range() {
        let (params, diags) = parse_condition("Q1", "1-5;Not Null");
        assert_eq!(params.range, Some((1.0, 5.0)));
        assert!(params.not_null);
        assert!(diags.is_empty());
    }

    #[test]
    fn inverted_range_is_diagnosed() {
        let (params, diags) = parse_condition("Q1", "5-1");
        assert_eq!(params.range, None);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn parses_key_value_parameters() {
        let (params, diags) = parse_condition("Q2_", "Min=2;Total=100;MinLen=5");
        assert_eq!(params.min_selected, Some(2));
        assert_eq!(params.target_total, Some(100.0));
        assert_eq!(params.min_len, Some(5));
        assert!(diags.is_empty());
    }

    #[test]
    fn parses_skip_with_implicit_else() {
        let (params, diags) = parse_condition("Q3_", "If Q2_1=1 THEN ANSWERED");
        let skip = params.skip.expect("skip parsed");
        assert_eq!(skip.when_true, Action::Answered);
        assert_eq!(skip.when_false, Action::Blank);
        assert!(diags.is_empty());
    }

    #[test]
    fn parses_in_set_and_in_range_triggers() {
        let (params, _) = parse_condition("Q4a", "If Q4_r1 IN (10,11) THEN ANSWERED ELSE BLANK");
        assert!(matches!(
            params.skip.unwrap().trigger,
            Trigger::InSet { ref column, ref values } if column == "Q4_r1" && values.len() == 2
        ));

        let (params, _) = parse_condition("Q5", "IF Q1 IN (3-7) THEN BLANK");
        assert!(matches!(
            params.skip.unwrap().trigger,
            Trigger::InRange { lo, hi, .. } if lo == 3.0 && hi == 7.0
        ));
    }

    #[test]
    fn or_binds_looser_than_and() {
        let trigger = parse_trigger("A=1 AND B=2 OR C=3").unwrap();
        match trigger {
            Trigger::AnyOf(disjuncts) => {
                assert_eq!(disjuncts.len(), 2);
                assert!(matches!(disjuncts[0], Trigger::AllOf(ref c) if c.len() == 2));
                assert!(matches!(disjuncts[1], Trigger::Compare { .. }));
            }
            other => panic!("expected AnyOf, got {other:?}"),
        }
    }

    #[test]
    fn malformed_skip_is_diagnosed() {
        let (params, diags) = parse_condition("Q3_", "If Q2_1 !! THEN ANSWERED");
        assert!(params.skip.is_none());
        assert_eq!(diags.len(), 1);
        assert!(diags[0].reason.contains("skip"));
    }

    #[test]
    fn expands_column_ranges() {
        let (params, _) = parse_condition("Q9_", "Q9_r1 to Q9_r3");
        assert_eq!(
            params.explicit_columns,
            Some(vec![
                "Q9_r1".to_string(),
                "Q9_r2".to_string(),
                "Q9_r3".to_string()
            ])
        );
    }

    #[test]
    fn mismatched_column_range_is_diagnosed() {
        let (params, diags) = parse_condition("Q9_", "Q9_r1 to Q10_r5");
        assert!(params.explicit_columns.is_none());
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn free_text_is_ignored() {
        let (params, diags) = parse_condition("Q2_", "At least one selected");
        assert_eq!(params, RuleParams::default());
        assert!(diags.is_empty());
    }

    #[test]
    fn trigger_eval_numeric_and_string_fallback() {
        let view = frame(vec![
            ("RespID", vec!["1", "2", "3"]),
            ("Q1", vec!["2", "yes", ""]),
        ]);
        let numeric = parse_trigger("Q1=2").unwrap();
        assert_eq!(numeric.eval(&view, 0), Some(true));
        assert_eq!(numeric.eval(&view, 1), Some(false));
        assert_eq!(numeric.eval(&view, 2), None);

        let text = parse_trigger("Q1=YES").unwrap();
        assert_eq!(text.eval(&view, 1), Some(true));
    }

    #[test]
    fn absent_column_is_permanently_false() {
        let view = frame(vec![("RespID", vec!["1"]), ("Q1", vec!["2"])]);
        let trigger = parse_trigger("MISSING_COL IN (1,2)").unwrap();
        assert_eq!(trigger.eval(&view, 0), Some(false));
    }

    #[test]
    fn conjunction_short_circuits_false_over_blank() {
        let view = frame(vec![
            ("RespID", vec!["1"]),
            ("A", vec![""]),
            ("B", vec!["9"]),
        ]);
        // A is blank but B=9 makes the conjunct definitively false.
        let trigger = parse_trigger("A=1 AND B=1").unwrap();
        assert_eq!(trigger.eval(&view, 0), Some(false));
        // Blank propagates when nothing settles the answer.
        let trigger = parse_trigger("A=1 AND B=9").unwrap();
        assert_eq!(trigger.eval(&view, 0), None);
    }
}
