//! Shared survey validation types: rules, failures, options, and errors.

pub mod error;
pub mod failure;
pub mod lookup;
pub mod options;
pub mod rule;

pub use error::{Result, SvyError};
pub use failure::{
    FailureRecord, HighlightCategory, HighlightMarker, RuleDiagnostic, ValidationOutput,
};
pub use lookup::CaseInsensitiveLookup;
pub use options::{BlankSkipBase, EngineOptions};
pub use rule::{CheckKind, Rule, Severity};
