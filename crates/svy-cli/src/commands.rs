//! Subcommand implementations.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use svy_ingest::{read_dataset_csv, read_rules_csv};
use svy_model::{BlankSkipBase, EngineOptions, ValidationOutput};
use svy_report::{write_diagnostics_csv, write_failures_csv, write_summary_json, write_template_csv};
use svy_validate::{respondent_base, validate};

use crate::cli::{TemplateArgs, ValidateArgs};

/// Outcome of a `validate` run, consumed by the terminal summary.
pub struct ValidateResult {
    pub output: ValidationOutput,
    pub respondent_base: usize,
    pub dataset: PathBuf,
    pub output_dir: PathBuf,
    pub wrote_reports: bool,
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidateResult> {
    let span = info_span!("validate", dataset = %args.dataset.display());
    let _guard = span.enter();

    let df = read_dataset_csv(&args.dataset)
        .with_context(|| format!("load dataset {}", args.dataset.display()))?;
    let rules = read_rules_csv(&args.rules)
        .with_context(|| format!("load rule table {}", args.rules.display()))?;
    info!(
        rows = df.height(),
        columns = df.width(),
        rules = rules.len(),
        "inputs loaded"
    );

    let options = engine_options(args);
    let output = validate(&df, &rules, &options)?;
    let base = respondent_base(&df);

    let output_dir = args.output_dir.clone().unwrap_or_else(|| {
        args.dataset
            .parent()
            .map_or_else(|| PathBuf::from("reports"), |dir| dir.join("reports"))
    });
    let wrote_reports = !args.dry_run;
    if wrote_reports {
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("create output directory {}", output_dir.display()))?;
        write_failures_csv(&output_dir.join("failures.csv"), &output.failures)?;
        write_summary_json(&output_dir.join("summary.json"), &output, base)?;
        write_diagnostics_csv(&output_dir.join("diagnostics.csv"), &output.diagnostics)?;
    }

    Ok(ValidateResult {
        output,
        respondent_base: base,
        dataset: args.dataset.clone(),
        output_dir,
        wrote_reports,
    })
}

pub fn run_template(args: &TemplateArgs) -> Result<()> {
    write_template_csv(&args.path)?;
    println!("Rule template written to {}", args.path.display());
    Ok(())
}

fn engine_options(args: &ValidateArgs) -> EngineOptions {
    let base = if args.strict_skip_base {
        BlankSkipBase::Required
    } else {
        BlankSkipBase::NotRequired
    };
    EngineOptions::new()
        .with_blank_skip_base(base)
        .with_extra_junk_words(args.junk_words.iter().map(String::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &std::path::Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn validate_args(dataset: PathBuf, rules: PathBuf) -> ValidateArgs {
        ValidateArgs {
            dataset,
            rules,
            output_dir: None,
            dry_run: false,
            strict_skip_base: false,
            junk_words: Vec::new(),
        }
    }

    #[test]
    fn validate_writes_reports_next_to_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = write_file(
            dir.path(),
            "data.csv",
            "RespID,Q1,AGE\n1001,3,44\n1002,9,17\n",
        );
        let rules = write_file(
            dir.path(),
            "rules.csv",
            "Question,Check_Type,Condition\nQ1,Range;Missing,1-5;Not Null\nAGE,Range,18-65\n",
        );
        let result = run_validate(&validate_args(dataset, rules)).unwrap();

        assert_eq!(result.respondent_base, 2);
        assert_eq!(result.output.failures.len(), 2);
        assert!(result.wrote_reports);
        assert!(result.output_dir.join("failures.csv").exists());
        assert!(result.output_dir.join("summary.json").exists());
    }

    #[test]
    fn dry_run_skips_report_files() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = write_file(dir.path(), "data.csv", "RespID,Q1\n1001,3\n");
        let rules = write_file(
            dir.path(),
            "rules.csv",
            "Question,Check_Type,Condition\nQ1,Range,1-5\n",
        );
        let mut args = validate_args(dataset, rules);
        args.dry_run = true;
        let result = run_validate(&args).unwrap();
        assert!(!result.wrote_reports);
        assert!(!result.output_dir.join("failures.csv").exists());
    }

    #[test]
    fn template_round_trips_through_rule_ingest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.csv");
        run_template(&TemplateArgs { path: path.clone() }).unwrap();
        let rules = read_rules_csv(&path).unwrap();
        assert_eq!(rules.len(), svy_report::starter_rules().len());
    }
}
