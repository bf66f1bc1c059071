//! Per-record and per-file validation results.

use std::collections::BTreeMap;

use ross_codec::LineEnding;
use ross_model::{FieldId, Severity, ValidationIssue};
use serde::{Deserialize, Serialize};

/// Issues found in one record, split by severity.
///
/// `errors` holds both Critical and Error issues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub info: Vec<ValidationIssue>,
}

impl RecordValidationResult {
    pub fn from_issues(issues: impl IntoIterator<Item = ValidationIssue>) -> Self {
        let mut result = Self::default();
        for issue in issues {
            result.add(issue);
        }
        result
    }

    pub fn add(&mut self, issue: ValidationIssue) {
        match issue.severity {
            Severity::Critical | Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
            Severity::Info => self.info.push(issue),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn has_info(&self) -> bool {
        !self.info.is_empty()
    }

    pub fn has_critical(&self) -> bool {
        self.errors.iter().any(|i| i.severity == Severity::Critical)
    }

    /// A record is accepted when it has no Critical or Error issue.
    pub fn is_accepted(&self) -> bool {
        !self.has_errors()
    }

    /// All issues, most severe first.
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .chain(&self.info)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues().filter(|i| i.severity == severity).count()
    }
}

/// File-level figures gathered alongside record validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetrics {
    pub total_records: usize,
    pub accepted_records: usize,
    pub rejected_records: usize,
    pub line_ending: LineEnding,
    pub line_endings_ok: bool,
    pub ascii_only: bool,
}

/// Which records to pick from a validated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    Accepted,
    Rejected,
}

/// Validation of a whole file: one result per record plus file metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileValidationResult {
    /// One entry per input record, in input order.
    pub records: Vec<RecordValidationResult>,
    pub metrics: FileMetrics,
    /// Findings about the file as a whole (terminators, charset).
    pub file_issues: Vec<ValidationIssue>,
}

impl FileValidationResult {
    /// Assemble the result and derive the record counts.
    pub fn new(
        records: Vec<RecordValidationResult>,
        line_ending: LineEnding,
        ascii_only: bool,
        file_issues: Vec<ValidationIssue>,
    ) -> Self {
        let accepted = records.iter().filter(|r| r.is_accepted()).count();
        let metrics = FileMetrics {
            total_records: records.len(),
            accepted_records: accepted,
            rejected_records: records.len() - accepted,
            line_ending,
            line_endings_ok: line_ending.is_valid(),
            ascii_only,
        };
        Self {
            records,
            metrics,
            file_issues,
        }
    }

    /// Valid when every record is accepted.
    pub fn is_valid(&self) -> bool {
        self.records.iter().all(RecordValidationResult::is_accepted)
    }

    /// 0-based indices of the records matching `selection`.
    pub fn indices(&self, selection: Selection) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_accepted() == (selection == Selection::Accepted))
            .map(|(index, _)| index)
            .collect()
    }

    /// Pick the records matching `selection` from the validated input.
    pub fn select<'a, T>(&self, items: &'a [T], selection: Selection) -> Vec<&'a T> {
        self.indices(selection)
            .into_iter()
            .filter_map(|index| items.get(index))
            .collect()
    }

    /// All issues with their 1-based line number; file issues carry `None`.
    pub fn issues(&self) -> impl Iterator<Item = (Option<usize>, &ValidationIssue)> {
        self.file_issues.iter().map(|issue| (None, issue)).chain(
            self.records
                .iter()
                .enumerate()
                .flat_map(|(index, r)| r.issues().map(move |issue| (Some(index + 1), issue))),
        )
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues()
            .filter(|(_, issue)| issue.severity == severity)
            .count()
    }

    /// Accepted records as a percentage of all records.
    pub fn validity_rate(&self) -> f64 {
        if self.metrics.total_records == 0 {
            return 0.0;
        }
        self.metrics.accepted_records as f64 * 100.0 / self.metrics.total_records as f64
    }

    /// Fields with the most issues matching `filter`, most frequent first.
    ///
    /// Ties are broken by field order.
    pub fn top_fields(
        &self,
        filter: impl Fn(Severity) -> bool,
        limit: usize,
    ) -> Vec<(FieldId, usize)> {
        let mut counts: BTreeMap<FieldId, usize> = BTreeMap::new();
        for (_, issue) in self.issues() {
            if !filter(issue.severity) {
                continue;
            }
            if let Some(field) = issue.field {
                *counts.entry(field).or_default() += 1;
            }
        }
        let mut ranked: Vec<(FieldId, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ross_model::IssueKind;

    fn error(field: FieldId) -> ValidationIssue {
        ValidationIssue::error(IssueKind::InvalidValue, "bad").on(field)
    }

    #[test]
    fn warnings_do_not_reject() {
        let result = RecordValidationResult::from_issues([
            ValidationIssue::warning(IssueKind::Implausible, "odd"),
            ValidationIssue::info(IssueKind::Unusual, "note"),
        ]);
        assert!(result.is_accepted());
        assert!(result.has_warnings());
        assert!(result.has_info());
    }

    #[test]
    fn critical_goes_to_errors() {
        let result = RecordValidationResult::from_issues([ValidationIssue::critical(
            IssueKind::InvalidRecordLength,
            "short",
        )]);
        assert!(!result.is_accepted());
        assert!(result.has_critical());
        assert_eq!(result.count(Severity::Critical), 1);
    }

    #[test]
    fn file_partitions_and_ranks() {
        let records = vec![
            RecordValidationResult::from_issues([error(FieldId::Sex), error(FieldId::Modality)]),
            RecordValidationResult::default(),
            RecordValidationResult::from_issues([error(FieldId::Sex)]),
        ];
        let result = FileValidationResult::new(records, LineEnding::CrLf, true, Vec::new());
        assert!(!result.is_valid());
        assert_eq!(result.metrics.accepted_records, 1);
        assert_eq!(result.metrics.rejected_records, 2);
        assert_eq!(result.indices(Selection::Rejected), vec![0, 2]);
        assert_eq!(result.select(&["a", "b", "c"], Selection::Accepted), vec![&"b"]);
        assert_eq!(
            result.top_fields(|s| s.rejects(), 5),
            vec![(FieldId::Sex, 2), (FieldId::Modality, 1)]
        );
        let lines: Vec<Option<usize>> = result.issues().map(|(line, _)| line).collect();
        assert_eq!(lines, vec![Some(1), Some(1), Some(3)]);
    }
}
