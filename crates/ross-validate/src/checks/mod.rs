//! Validation check modules.
//!
//! Field rules run first, then the record-level rules.

pub mod field;
pub mod record;

use ross_model::{Record, ValidationIssue, ValidationOptions};

/// Run all checks on a record, field rules first.
pub fn run_all(record: &Record, options: &ValidationOptions) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    // 1. Width, requiredness and domain rule per field
    issues.extend(field::check(record, options));

    // 2. Rules spanning several fields
    issues.extend(record::check(record, options));

    issues
}
