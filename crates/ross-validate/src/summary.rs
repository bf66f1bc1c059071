//! Plain-text rendering of a file validation result.

use std::fmt::Write;

use ross_model::Severity;

use crate::report::FileValidationResult;

/// Number of fields listed in the "most errors/warnings" sections.
pub const TOP_FIELDS: usize = 5;

/// Printed under the status whenever a file carries file-level issues.
pub const FILE_ISSUES_NOTE: &str =
    "File-level issues are reported only; they do not affect record acceptance or file validity.";

/// Render a deterministic text report: totals, file issues, the fields with
/// the most errors and warnings, then every record that has issues.
pub fn render_text(result: &FileValidationResult) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, result);
    out
}

fn write_report(out: &mut String, result: &FileValidationResult) -> std::fmt::Result {
    let metrics = &result.metrics;
    writeln!(out, "ROSS 1000 validation report")?;
    writeln!(out, "===========================")?;
    writeln!(
        out,
        "Records: {} total, {} accepted, {} rejected ({:.1}% valid)",
        metrics.total_records,
        metrics.accepted_records,
        metrics.rejected_records,
        result.validity_rate()
    )?;
    writeln!(
        out,
        "Line endings: {} ({})",
        metrics.line_ending,
        if metrics.line_endings_ok { "ok" } else { "expected CRLF" }
    )?;
    writeln!(
        out,
        "Charset: {}",
        if metrics.ascii_only { "ASCII" } else { "non-ASCII content" }
    )?;
    let counts: Vec<String> = Severity::ALL
        .iter()
        .map(|severity| {
            format!(
                "{} {}",
                result.count(*severity),
                severity.as_str().to_lowercase()
            )
        })
        .collect();
    writeln!(out, "Issues: {}", counts.join(", "))?;
    writeln!(
        out,
        "Status: {}",
        if result.is_valid() { "VALID" } else { "INVALID" }
    )?;
    if !result.file_issues.is_empty() {
        writeln!(out, "Note: {FILE_ISSUES_NOTE}")?;
    }

    if !result.file_issues.is_empty() {
        writeln!(out)?;
        writeln!(out, "File issues:")?;
        for issue in &result.file_issues {
            writeln!(out, "  {issue}")?;
        }
    }

    for (title, ranked) in [
        (
            "Fields with most errors:",
            result.top_fields(|s| s.rejects(), TOP_FIELDS),
        ),
        (
            "Fields with most warnings:",
            result.top_fields(|s| s == Severity::Warning, TOP_FIELDS),
        ),
    ] {
        if ranked.is_empty() {
            continue;
        }
        writeln!(out)?;
        writeln!(out, "{title}")?;
        for (field, count) in ranked {
            writeln!(out, "  {field}: {count}")?;
        }
    }

    for (index, record) in result.records.iter().enumerate() {
        if record.issues().next().is_none() {
            continue;
        }
        writeln!(out)?;
        let status = if record.is_accepted() { "accepted" } else { "rejected" };
        writeln!(out, "Record {}: {status}", index + 1)?;
        for issue in record.issues() {
            writeln!(out, "  {issue}")?;
        }
    }
    Ok(())
}
