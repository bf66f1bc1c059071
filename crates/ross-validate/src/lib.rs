//! Validation of ROSS 1000 records.
//!
//! Every record goes through the per-field rules and then the cross-field
//! rules; all findings are collected, none stops the pass except a wrong
//! record length or a Critical field finding. Lengths are counted in bytes. A record is accepted when it
//! has no Critical or Error issue, and a file is valid when every record is.
//!
//! # Example
//!
//! ```
//! use ross_model::{ParseOptions, ValidationOptions};
//! use ross_validate::validate_file;
//!
//! let validated = validate_file("16\r\n", &ValidationOptions::default(), ParseOptions::default());
//! assert_eq!(validated.report.metrics.total_records, 1);
//! assert!(!validated.report.is_valid());
//! ```

pub mod checks;
mod error;
pub mod export;
pub mod report;
pub mod summary;

pub use checks::field::{FieldOutcome, validate_field};
pub use error::{ReportError, Result};
pub use export::{to_json, write_csv};
pub use report::{FileMetrics, FileValidationResult, RecordValidationResult, Selection};
pub use summary::{FILE_ISSUES_NOTE, render_text};

use ross_codec::{
    LineEnding, decode, detect_line_ending, fill_unspecified_defaults, is_ascii_only, parse,
};
use ross_model::{
    IssueKind, ParseOptions, RECORD_LENGTH, Record, ValidationIssue, ValidationOptions,
};
use tracing::{debug, info, warn};

/// Validate one record snapshot.
///
/// Pure: validating the same record twice yields the same result.
pub fn validate_record(record: &Record, options: &ValidationOptions) -> RecordValidationResult {
    RecordValidationResult::from_issues(checks::run_all(record, options))
}

/// Validate one raw line (terminator excluded).
///
/// A line that is not exactly 328 bytes yields a single Critical issue
/// and no further checks.
pub fn validate_line(line: &str, options: &ValidationOptions) -> (Record, RecordValidationResult) {
    check_line(line, options, ParseOptions::default())
}

fn check_line(
    line: &str,
    options: &ValidationOptions,
    parse_options: ParseOptions,
) -> (Record, RecordValidationResult) {
    let mut record = decode(line);
    if parse_options.fill_unspecified_defaults {
        fill_unspecified_defaults(&mut record);
    }
    let length = line.len();
    if length != RECORD_LENGTH {
        let issue = ValidationIssue::critical(
            IssueKind::InvalidRecordLength,
            format!("Record length is {length}, expected {RECORD_LENGTH}"),
        );
        return (record, RecordValidationResult::from_issues([issue]));
    }
    let result = validate_record(&record, options);
    (record, result)
}

/// Validate records supplied directly, without file-level checks.
pub fn validate_records(records: &[Record], options: &ValidationOptions) -> FileValidationResult {
    let results = records
        .iter()
        .map(|record| validate_record(record, options))
        .collect();
    FileValidationResult::new(results, LineEnding::None, true, Vec::new())
}

/// Records decoded from a file together with their validation.
#[derive(Debug, Clone)]
pub struct ValidatedFile {
    /// Decoded records, in input order.
    pub records: Vec<Record>,
    pub report: FileValidationResult,
}

impl ValidatedFile {
    pub fn select(&self, selection: Selection) -> Vec<&Record> {
        self.report.select(&self.records, selection)
    }

    pub fn accepted(&self) -> Vec<&Record> {
        self.select(Selection::Accepted)
    }

    pub fn rejected(&self) -> Vec<&Record> {
        self.select(Selection::Rejected)
    }
}

/// Split, decode and validate a whole text block.
pub fn validate_file(
    text: &str,
    options: &ValidationOptions,
    parse_options: ParseOptions,
) -> ValidatedFile {
    let line_ending = detect_line_ending(text);
    let ascii_only = is_ascii_only(text);

    let mut file_issues = Vec::new();
    if !line_ending.is_valid() {
        warn!(%line_ending, "records are not terminated by CRLF");
        file_issues.push(ValidationIssue::critical(
            IssueKind::InvalidLineEnding,
            format!("File uses {line_ending} line endings; records must end with CR+LF"),
        ));
    }
    if !ascii_only {
        warn!("file contains non-ASCII characters");
        file_issues.push(ValidationIssue::error(
            IssueKind::NonAsciiContent,
            "File contains non-ASCII characters",
        ));
    }

    let mut records = Vec::new();
    let mut results = Vec::new();
    for (index, line) in parse(text).into_iter().enumerate() {
        let (record, result) = check_line(line, options, parse_options);
        debug!(
            line = index + 1,
            accepted = result.is_accepted(),
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "validated record"
        );
        records.push(record);
        results.push(result);
    }

    let report = FileValidationResult::new(results, line_ending, ascii_only, file_issues);
    info!(
        total = report.metrics.total_records,
        accepted = report.metrics.accepted_records,
        rejected = report.metrics.rejected_records,
        "validation complete"
    );
    ValidatedFile { records, report }
}
