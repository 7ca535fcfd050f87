//! Serialization round-trips for report-facing model types.

use svy_model::{FailureRecord, HighlightCategory, HighlightMarker, Rule, Severity, ValidationOutput};

#[test]
fn rule_round_trips_through_json() {
    let rule = Rule::new("Q4a", &["Skip", "OpenEnd_Junk"], "If Q4_r1 IN (10,11) THEN ANSWERED ELSE BLANK;MinLen=3")
        .with_severity(Severity::Warning);
    let json = serde_json::to_string(&rule).expect("serialize rule");
    let round: Rule = serde_json::from_str(&json).expect("deserialize rule");
    assert_eq!(round.question, "Q4a");
    assert_eq!(round.check_types, vec!["Skip", "OpenEnd_Junk"]);
    assert_eq!(round.severity, Severity::Warning);
}

#[test]
fn validation_output_round_trips_through_json() {
    let output = ValidationOutput {
        failures: vec![FailureRecord {
            respondent_id: "1001".to_string(),
            question: "Q1".to_string(),
            issue: "Missing value".to_string(),
            severity: Severity::Critical,
        }],
        highlights: vec![HighlightMarker {
            row: 0,
            column: "Q1".to_string(),
            category: HighlightCategory::Missing,
        }],
        diagnostics: Vec::new(),
    };
    let json = serde_json::to_string(&output).expect("serialize output");
    let round: ValidationOutput = serde_json::from_str(&json).expect("deserialize output");
    assert_eq!(round.failures.len(), 1);
    assert_eq!(round.highlights[0].category, HighlightCategory::Missing);
}
