use anyhow::Result;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use ross_model::Severity;
use ross_validate::{
    FILE_ISSUES_NOTE, FileValidationResult, Selection, render_text, to_json, write_csv,
};

use crate::cli::ReportFormatArg;
use crate::types::{ExportResult, ImportResult, XmlResult};

/// Render a validation report in the requested format.
pub fn render_report(report: &FileValidationResult, format: ReportFormatArg) -> Result<String> {
    Ok(match format {
        ReportFormatArg::Table => render_tables(report),
        ReportFormatArg::Text => render_text(report),
        ReportFormatArg::Json => to_json(report)?,
        ReportFormatArg::Csv => {
            let mut buffer = Vec::new();
            write_csv(report, &mut buffer)?;
            String::from_utf8(buffer)?
        }
    })
}

fn render_tables(report: &FileValidationResult) -> String {
    let metrics = &report.metrics;
    let mut overview = Table::new();
    overview.set_header(vec![
        header_cell("Records"),
        header_cell("Accepted"),
        header_cell("Rejected"),
        header_cell("Valid"),
        header_cell("Critical"),
        header_cell("Errors"),
        header_cell("Warnings"),
        header_cell("Info"),
        header_cell("Line endings"),
        header_cell("Charset"),
    ]);
    apply_table_style(&mut overview);
    for index in 0..8 {
        align_column(&mut overview, index, CellAlignment::Right);
    }
    overview.add_row(vec![
        Cell::new(metrics.total_records).add_attribute(Attribute::Bold),
        count_cell(metrics.accepted_records, Color::Green),
        count_cell(metrics.rejected_records, Color::Red),
        Cell::new(format!("{:.1}%", report.validity_rate())),
        count_cell(report.count(Severity::Critical), severity_color(Severity::Critical)),
        count_cell(report.count(Severity::Error), severity_color(Severity::Error)),
        count_cell(report.count(Severity::Warning), severity_color(Severity::Warning)),
        count_cell(report.count(Severity::Info), severity_color(Severity::Info)),
        status_cell(metrics.line_ending.as_str(), metrics.line_endings_ok),
        status_cell(
            if metrics.ascii_only { "ASCII" } else { "non-ASCII" },
            metrics.ascii_only,
        ),
    ]);

    let mut out = format!("{overview}\n");
    let issues: Vec<_> = report.issues().collect();
    if !issues.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Line"),
            header_cell("Severity"),
            header_cell("Kind"),
            header_cell("Field"),
            header_cell("Message"),
        ]);
        apply_issue_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        align_column(&mut table, 1, CellAlignment::Center);
        for (line, issue) in issues {
            table.add_row(vec![
                line.map_or_else(|| dim_cell("file"), Cell::new),
                severity_cell(issue.severity),
                Cell::new(issue.kind.code()),
                issue
                    .field
                    .map_or_else(|| dim_cell("-"), Cell::new),
                Cell::new(&issue.message),
            ]);
        }
        out.push_str(&format!("\nIssues:\n{table}\n"));
    }
    let status = if report.is_valid() { "VALID" } else { "INVALID" };
    out.push_str(&format!("\nStatus: {status}\n"));
    if !report.file_issues.is_empty() {
        out.push_str(&format!("Note: {FILE_ISSUES_NOTE}\n"));
    }
    out
}

pub fn print_export(result: &ExportResult) {
    let label = match result.selection {
        Selection::Accepted => "accepted",
        Selection::Rejected => "rejected",
    };
    println!(
        "Wrote {} {label} of {} records to {}",
        result.written,
        result.total,
        result.output.display()
    );
}

pub fn print_xml(result: &XmlResult) {
    println!("Movement XML: {}", result.output.display());
    println!("Facility: {}", result.facility_code);
    println!(
        "Records: {} transformed, {} rejected and skipped",
        result.records, result.skipped
    );
    println!("Movements: {}", result.movements);
    println!("SHA-256: {}", result.digest);
}

pub fn print_import(result: &ImportResult) {
    println!(
        "Imported {} records into {}",
        result.records,
        result.output.display()
    );
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Fixed(26)),
            ColumnConstraint::UpperBoundary(Width::Fixed(28)),
            ColumnConstraint::UpperBoundary(Width::Percentage(55)),
        ]);
    }
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn severity_cell(severity: Severity) -> Cell {
    let cell = Cell::new(severity.as_str()).fg(severity_color(severity));
    if severity == Severity::Critical {
        cell.add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Critical | Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Blue,
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn status_cell(label: &str, ok: bool) -> Cell {
    if ok {
        Cell::new(label).fg(Color::Green)
    } else {
        Cell::new(label).fg(Color::Red).add_attribute(Attribute::Bold)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
