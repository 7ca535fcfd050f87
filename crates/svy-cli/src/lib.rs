//! CLI library components for the survey auditor.

pub mod logging;
