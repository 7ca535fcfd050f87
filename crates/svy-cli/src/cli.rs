//! CLI argument definitions for the survey auditor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "survey-audit",
    version,
    about = "Survey response validator - rule-driven data quality checks",
    long_about = "Validate a survey response export against an authored rule table.\n\n\
                  Checks cover ranges, missing answers, skip logic, straightlining,\n\
                  multi-select minimums, rankings, constant sums, open-end junk, and\n\
                  duplicate values, producing failure and summary reports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a dataset against a rule table and write reports.
    Validate(ValidateArgs),

    /// Write a starter rule-table CSV to fill in.
    Template(TemplateArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Survey response export (CSV, first column = respondent id).
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Filled rule table (CSV: Question, Check_Type, Condition[, Severity]).
    #[arg(value_name = "RULES")]
    pub rules: PathBuf,

    /// Output directory for reports (default: <DATASET dir>/reports).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Validate and print the summary without writing report files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Treat rows whose skip-trigger cells are blank as required.
    ///
    /// By default such rows are exempt from both the requirement checks and
    /// the skip-violation check.
    #[arg(long = "strict-skip-base")]
    pub strict_skip_base: bool,

    /// Additional junk words for the open-end check (repeatable).
    #[arg(long = "junk-word", value_name = "WORD")]
    pub junk_words: Vec<String>,
}

#[derive(Parser)]
pub struct TemplateArgs {
    /// Where to write the template (default: Validation_Rules_Template.csv).
    #[arg(
        value_name = "PATH",
        default_value = "Validation_Rules_Template.csv"
    )]
    pub path: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
