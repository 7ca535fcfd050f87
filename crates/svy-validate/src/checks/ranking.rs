//! Ranking check: duplicate rank values within one respondent's row.

use std::collections::BTreeMap;

use svy_model::HighlightCategory;

use svy_ingest::format_numeric;

use super::{CheckContext, CheckOutcome};

pub fn check(ctx: &CheckContext) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    for row in ctx.required_rows() {
        // Keyed on the bit pattern of the coerced value so "2" and "2.0"
        // collide while distinct ranks never do.
        let mut by_value: BTreeMap<u64, Vec<&String>> = BTreeMap::new();
        for column in ctx.columns {
            if let Some(value) = ctx.view.numeric(column, row) {
                by_value.entry(value.to_bits()).or_default().push(column);
            }
        }
        let duplicated: Vec<(u64, &Vec<&String>)> = by_value
            .iter()
            .filter(|(_, columns)| columns.len() >= 2)
            .map(|(bits, columns)| (*bits, columns))
            .collect();
        if duplicated.is_empty() {
            continue;
        }
        let values: Vec<String> = duplicated
            .iter()
            .map(|(bits, _)| format_numeric(f64::from_bits(*bits)))
            .collect();
        outcome.fail(
            ctx,
            row,
            format!("Duplicate rank value(s): {}", values.join(", ")),
        );
        for (_, columns) in duplicated {
            for column in columns {
                outcome.mark(row, column, HighlightCategory::Ranking);
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testing::{Fixture, dataset};
    use svy_model::Rule;

    #[test]
    fn duplicate_ranks_fire_once_per_row() {
        let view = dataset(vec![
            ("RespID", vec!["1", "2"]),
            ("R1", vec!["1", "1"]),
            ("R2", vec!["2", "1"]),
            ("R3", vec!["3", "2"]),
        ]);
        let fixture = Fixture::new(view, Rule::new("R", &["Ranking"], "Unique"));
        let outcome = check(&fixture.ctx());
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].respondent_id, "2");
        assert!(outcome.failures[0].issue.contains("1"));
        assert_eq!(outcome.highlights.len(), 2);
    }

    #[test]
    fn complete_ranking_with_double_digit_ranks_passes() {
        let view = dataset(vec![
            ("RespID", vec!["1"]),
            ("R_1", vec!["1"]),
            ("R_2", vec!["2"]),
            ("R_3", vec!["3"]),
            ("R_4", vec!["4"]),
            ("R_5", vec!["5"]),
            ("R_6", vec!["6"]),
            ("R_7", vec!["7"]),
            ("R_8", vec!["8"]),
            ("R_9", vec!["9"]),
            ("R_10", vec!["10"]),
        ]);
        let fixture = Fixture::new(view, Rule::new("R_", &["Ranking"], "Unique"));
        let outcome = check(&fixture.ctx());
        // Rank 10 must never be treated as another rank 1.
        assert!(outcome.failures.is_empty(), "{:?}", outcome.failures);
    }

    #[test]
    fn duplicate_message_names_the_colliding_rank() {
        let view = dataset(vec![
            ("RespID", vec!["1"]),
            ("R1", vec!["10"]),
            ("R2", vec!["10"]),
            ("R3", vec!["2"]),
        ]);
        let fixture = Fixture::new(view, Rule::new("R", &["Ranking"], "Unique"));
        let outcome = check(&fixture.ctx());
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].issue.contains("10"));
    }

    #[test]
    fn blanks_do_not_collide() {
        let view = dataset(vec![
            ("RespID", vec!["1"]),
            ("R1", vec![""]),
            ("R2", vec![""]),
            ("R3", vec!["2"]),
        ]);
        let fixture = Fixture::new(view, Rule::new("R", &["Ranking"], ""));
        assert!(check(&fixture.ctx()).failures.is_empty());
    }
}
