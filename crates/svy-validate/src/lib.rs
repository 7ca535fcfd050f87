//! Survey validation core: rule interpretation and evaluation.
//!
//! The engine consumes a tabular dataset (rows x named columns, first
//! column the respondent identifier) and an ordered rule table, and
//! produces failure records, cell highlight markers, and rule diagnostics.
//! All I/O lives in the surrounding crates; this one is a pure evaluation
//! pass.

pub mod checks;
pub mod condition;
pub mod engine;
pub mod gate;
pub mod resolver;
pub mod view;

pub use condition::{
    Action, CompareOp, Literal, RuleParams, SkipCondition, Trigger, parse_condition,
    parse_trigger,
};
pub use engine::{respondent_base, validate};
pub use gate::build_gate;
pub use resolver::resolve_columns;
pub use view::DatasetView;
