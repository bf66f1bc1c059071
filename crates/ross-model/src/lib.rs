//! Data model for ROSS 1000 tourism movement records.
//!
//! The field catalog, the [`Record`] container, coded values and the issue
//! types every other crate of the workspace builds on.

pub mod date;
pub mod enums;
pub mod error;
pub mod field;
pub mod issue;
pub mod options;
pub mod record;

pub use date::{DateProblem, FieldDate, age_in_years};
pub use enums::{
    GuestType, ITALY_CODE, Modality, Region, Sex, TourismType, TransportMode, UNSPECIFIED,
    is_italy,
};
pub use error::{ModelError, Result};
pub use field::{
    CATALOG, FIELD_COUNT, FieldDescriptor, FieldId, RECORD_LENGTH, Requiredness, ValueKind,
};
pub use issue::{IssueKind, Severity, ValidationIssue};
pub use options::{CalendarCheck, ParseOptions, ValidationOptions};
pub use record::Record;
