//! Validation issue types shared by the validator and its reports.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::FieldId;

/// Issue severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Structural violation; the record cannot be read reliably.
    Critical,
    /// Rule violation that makes the record unacceptable.
    Error,
    /// Odd but acceptable.
    Warning,
    /// Descriptive note.
    Info,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        }
    }

    /// Critical and Error reject a record.
    pub fn rejects(&self) -> bool {
        matches!(self, Severity::Critical | Severity::Error)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Some(Self::Critical),
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What kind of rule produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    /// Raw field width differs from the declared width.
    InvalidLength,
    RequiredFieldEmpty,
    InvalidValue,
    /// Content does not match the field's character class.
    InvalidFormat,
    InvalidDate,
    LogicalInconsistency,
    /// A field that must be left empty for this record carries a value.
    FieldShouldBeBlank,
    UnnecessaryForDeletion,
    /// Plausibility notes (long stays, unusual ages).
    Implausible,
    /// Travel pattern notes with no bearing on correctness.
    Unusual,
    InvalidRecordLength,
    MissingOperationId,
    InvalidModality,
    InvalidLineEnding,
    NonAsciiContent,
}

impl IssueKind {
    pub fn code(&self) -> &'static str {
        match self {
            IssueKind::InvalidLength => "INVALID_LENGTH",
            IssueKind::RequiredFieldEmpty => "REQUIRED_FIELD_EMPTY",
            IssueKind::InvalidValue => "INVALID_VALUE",
            IssueKind::InvalidFormat => "INVALID_FORMAT",
            IssueKind::InvalidDate => "INVALID_DATE",
            IssueKind::LogicalInconsistency => "LOGICAL_INCONSISTENCY",
            IssueKind::FieldShouldBeBlank => "FIELD_SHOULD_BE_BLANK",
            IssueKind::UnnecessaryForDeletion => "UNNECESSARY_FOR_DELETION",
            IssueKind::Implausible => "IMPLAUSIBLE",
            IssueKind::Unusual => "UNUSUAL",
            IssueKind::InvalidRecordLength => "INVALID_RECORD_LENGTH",
            IssueKind::MissingOperationId => "MISSING_OPERATION_ID",
            IssueKind::InvalidModality => "INVALID_MODALITY",
            IssueKind::InvalidLineEnding => "INVALID_LINE_ENDING",
            IssueKind::NonAsciiContent => "NON_ASCII_CONTENT",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single finding about a record or a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub kind: IssueKind,
    pub message: String,
    /// Field the issue is attached to, if any.
    pub field: Option<FieldId>,
}

impl ValidationIssue {
    pub fn new(severity: Severity, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            field: None,
        }
    }

    pub fn critical(kind: IssueKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Critical, kind, message)
    }

    pub fn error(kind: IssueKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, kind, message)
    }

    pub fn warning(kind: IssueKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, kind, message)
    }

    pub fn info(kind: IssueKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, kind, message)
    }

    /// Attach the issue to a field.
    pub fn on(mut self, field: FieldId) -> Self {
        self.field = Some(field);
        self
    }

    pub fn rejects(&self) -> bool {
        self.severity.rejects()
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.severity, self.kind)?;
        if let Some(field) = self.field {
            write!(f, " field {field}")?;
        }
        write!(f, ": {}", self.message)
    }
}
