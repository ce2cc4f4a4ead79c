use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use qpp_convert::{BatchReport, Outcome};

pub fn print_summary(report: &BatchReport) {
    if !report.resolution_errors.is_empty() {
        eprintln!("Errors:");
        for error in &report.resolution_errors {
            eprintln!("- {error}");
        }
    }
    if report.files.is_empty() {
        eprintln!("No files to convert");
        return;
    }
    println!("{}", summary_table(report));
}

pub fn summary_table(report: &BatchReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Result"),
        header_cell("Output"),
        header_cell("Details"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);

    for file in &report.files {
        table.add_row(vec![
            Cell::new(file.input.display()),
            outcome_cell(&file.outcome),
            file.outcome
                .artifact()
                .map_or_else(|| dim_cell("-"), |path| Cell::new(file_name(path))),
            detail_cell(&file.outcome),
        ]);
    }

    let totals = format!(
        "{} converted, {} rejected, {} failed, {} skipped",
        report.converted(),
        report.rejected(),
        report.failed(),
        report.skipped()
    );
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.files.len()).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(totals).add_attribute(Attribute::Bold),
    ]);
    table
}

fn outcome_cell(outcome: &Outcome) -> Cell {
    let cell = Cell::new(outcome.label());
    match outcome {
        Outcome::Converted { .. } => cell.fg(Color::Green).add_attribute(Attribute::Bold),
        Outcome::Rejected { .. } => cell.fg(Color::Yellow),
        Outcome::Skipped => cell.fg(Color::DarkGrey),
        Outcome::Failed(_) => cell.fg(Color::Red).add_attribute(Attribute::Bold),
    }
}

fn detail_cell(outcome: &Outcome) -> Cell {
    match outcome {
        Outcome::Converted { .. } => dim_cell("-"),
        Outcome::Rejected { errors, .. } => {
            let noun = if errors.len() == 1 { "error" } else { "errors" };
            Cell::new(format!("{} validation {noun}", errors.len())).fg(Color::Yellow)
        }
        Outcome::Skipped => dim_cell("input no longer exists"),
        Outcome::Failed(error) => Cell::new(format!("{}: {error}", error.kind())).fg(Color::Red),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
