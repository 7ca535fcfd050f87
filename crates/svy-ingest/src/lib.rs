//! Loading of survey exports and authored rule tables.

pub mod dataset;
pub mod polars_utils;
pub mod rules;

pub use dataset::read_dataset_csv;
pub use polars_utils::{any_to_f64, any_to_string, format_numeric, is_missing_value, parse_f64};
pub use rules::read_rules_csv;
