//! Survey validation report assembly.
//!
//! Turns a [`svy_model::ValidationOutput`] into deliverables:
//!
//! - flat failure log (CSV)
//! - per-question summary with failure rates (JSON, schema-tagged)
//! - rule diagnostics (CSV)
//! - per-cell highlight map for styled exports
//! - starter rule-table template

mod highlight;
mod summary;
mod template;
mod writer;

pub use highlight::highlight_map;
pub use summary::{QuestionSummary, summarize};
pub use template::{starter_rules, write_template_csv};
pub use writer::{
    SUMMARY_SCHEMA, SUMMARY_SCHEMA_VERSION, SummaryReport, write_diagnostics_csv,
    write_failures_csv, write_summary_json,
};
