//! Starter rule table for new studies.
//!
//! The template covers one example of every check family so a fielded
//! questionnaire can be rule-tabled by editing rather than authoring from
//! scratch.

use std::path::Path;

use anyhow::{Context, Result};

use svy_model::Rule;

/// Example rules spanning the supported check kinds and condition grammar.
pub fn starter_rules() -> Vec<Rule> {
    vec![
        Rule::new("Q1", &["Range", "Missing"], "1-5;Not Null"),
        Rule::new("Q4_r1", &["Range"], "1-11"),
        Rule::new(
            "Q4a",
            &["Skip", "OpenEnd_Junk"],
            "If Q4_r1 IN (10,11) THEN ANSWERED ELSE BLANK;MinLen=3",
        ),
        Rule::new("Q9_", &["Straightliner"], "Q9_r1 to Q9_r9"),
        Rule::new("Q11_", &["Straightliner"], "Q11_r1 to Q11_r12"),
        Rule::new("Q2_", &["Multi-Select"], "At least one selected"),
        Rule::new("Q3_", &["Skip"], "If Q2_1=1 THEN ANSWERED ELSE BLANK"),
        Rule::new("AGE", &["Range"], "18-65"),
        Rule::new("OE1", &["OpenEnd_Junk"], "Detect junk or AI text"),
    ]
}

/// Write the starter rule table as a fillable CSV.
pub fn write_template_csv(path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create rule template {}", path.display()))?;
    writer.write_record(["Question", "Check_Type", "Condition", "Severity"])?;
    for rule in starter_rules() {
        writer.write_record([
            rule.question.as_str(),
            &rule.check_types.join(";"),
            rule.condition.as_str(),
            rule.severity.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
