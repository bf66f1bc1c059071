//! Machine-readable exports of a validation result.

use std::io::Write;

use ross_model::FieldId;
use serde::Serialize;

use crate::error::Result;
use crate::report::FileValidationResult;

/// One CSV row per issue.
#[derive(Debug, Serialize)]
struct IssueRow<'a> {
    line: Option<usize>,
    severity: &'static str,
    kind: &'static str,
    field: Option<u8>,
    field_name: &'static str,
    message: &'a str,
}

/// Write every issue as CSV; file-level issues leave `line` empty.
pub fn write_csv<W: Write>(result: &FileValidationResult, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for (line, issue) in result.issues() {
        csv.serialize(IssueRow {
            line,
            severity: issue.severity.as_str(),
            kind: issue.kind.code(),
            field: issue.field.map(FieldId::order),
            field_name: issue.field.map(FieldId::name).unwrap_or_default(),
            message: &issue.message,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Pretty-printed JSON of the full result.
pub fn to_json(result: &FileValidationResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
