//! Terminal summary tables for validation runs.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, ColumnConstraint, ContentArrangement, Table, Width,
};

use svy_model::Severity;
use svy_report::summarize;

use crate::commands::ValidateResult;

pub fn print_summary(result: &ValidateResult) {
    println!("Dataset: {}", result.dataset.display());
    println!("Respondent base: {}", result.respondent_base);
    if result.wrote_reports {
        println!("Reports: {}", result.output_dir.display());
    } else {
        println!("Reports: (dry run, nothing written)");
    }

    let summaries = summarize(&result.output.failures, result.respondent_base);
    if summaries.is_empty() {
        println!("No validation failures found.");
    } else {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Question"),
            header_cell("Respondents failed"),
            header_cell("% of base"),
        ]);
        apply_summary_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        align_column(&mut table, 2, CellAlignment::Right);
        for summary in &summaries {
            table.add_row(vec![
                Cell::new(&summary.question),
                count_cell(summary.failed_count, comfy_table::Color::Red),
                Cell::new(format!("{:.1}%", summary.percent_failed)),
            ]);
        }
        table.add_row(vec![
            Cell::new("TOTAL")
                .fg(comfy_table::Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new(result.output.failures.len()).add_attribute(Attribute::Bold),
            dim_cell("-"),
        ]);
        println!("{table}");
    }

    let critical = result.output.critical_count();
    let warning = result.output.warning_count();
    println!(
        "Failures: {critical} {}, {warning} {}",
        Severity::Critical.as_str().to_lowercase(),
        Severity::Warning.as_str().to_lowercase()
    );
    print_diagnostics(result);
}

fn print_diagnostics(result: &ValidateResult) {
    if result.output.diagnostics.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Question"), header_cell("Rule problem")]);
    apply_diagnostics_table_style(&mut table);
    for diagnostic in &result.output.diagnostics {
        table.add_row(vec![
            Cell::new(&diagnostic.question),
            Cell::new(&diagnostic.reason),
        ]);
    }
    println!();
    println!("Rule diagnostics:");
    println!("{table}");
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
    if table.column_count() >= 3 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
        ]);
    }
}

fn apply_diagnostics_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(comfy_table::Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: comfy_table::Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(comfy_table::Color::DarkGrey)
}
