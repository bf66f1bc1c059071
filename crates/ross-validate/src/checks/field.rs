//! Per-field rules.
//!
//! Every field, fillers included, must have its declared width in bytes and
//! hold only ASCII. Past that, blank-enforced fillers are done; every other
//! field must be non-empty when required and must satisfy its own domain
//! rule. A field is either valid or invalid with exactly one issue.

use ross_model::{
    FieldId, GuestType, IssueKind, Modality, Record, Requiredness, Severity, Sex, TourismType,
    TransportMode, ValidationIssue, ValidationOptions, ValueKind, is_italy,
};

/// Outcome of checking one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    Valid,
    Invalid(ValidationIssue),
}

impl FieldOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, FieldOutcome::Valid)
    }

    pub fn into_issue(self) -> Option<ValidationIssue> {
        match self {
            FieldOutcome::Valid => None,
            FieldOutcome::Invalid(issue) => Some(issue),
        }
    }
}

/// Fields that stay required when a record deletes a position.
pub const DELETION_KEYS: [FieldId; 3] =
    [FieldId::GuestType, FieldId::ArrivalDate, FieldId::OperationId];

/// Check a single field of `record`.
pub fn validate_field(record: &Record, id: FieldId, options: &ValidationOptions) -> FieldOutcome {
    let descriptor = id.descriptor();
    let raw = record.get(id);

    let length = raw.len();
    if length != descriptor.width {
        return invalid(
            ValidationIssue::error(
                IssueKind::InvalidLength,
                format!(
                    "{}: length is {length}, expected {}",
                    descriptor.name, descriptor.width
                ),
            )
            .on(id),
        );
    }

    if !raw.is_ascii() {
        return invalid(
            ValidationIssue::error(
                IssueKind::NonAsciiContent,
                format!("{}: only ASCII characters are allowed", descriptor.name),
            )
            .on(id),
        );
    }

    if descriptor.must_be_blank {
        return FieldOutcome::Valid;
    }

    let value = raw.trim();
    if value.is_empty() {
        return match missing_value_issue(record, id) {
            Some(issue) => invalid(issue.on(id)),
            None => FieldOutcome::Valid,
        };
    }

    match domain_rule(record, id, value, options) {
        Some(issue) => invalid(issue.on(id)),
        None => FieldOutcome::Valid,
    }
}

fn invalid(issue: ValidationIssue) -> FieldOutcome {
    FieldOutcome::Invalid(issue)
}

/// Issue raised when `id` is empty, or `None` when emptiness is legal.
fn missing_value_issue(record: &Record, id: FieldId) -> Option<ValidationIssue> {
    let name = id.name();
    match id {
        FieldId::OperationId => Some(ValidationIssue::critical(
            IssueKind::MissingOperationId,
            format!("{name}: required"),
        )),
        FieldId::Modality => Some(ValidationIssue::critical(
            IssueKind::InvalidModality,
            format!("{name}: required (1 = new, 2 = amend, 3 = delete)"),
        )),
        _ if record.modality() == Some(Modality::Delete) && !DELETION_KEYS.contains(&id) => None,
        FieldId::ResidenceComune | FieldId::ResidenceProvince => {
            is_italy(record.trimmed(FieldId::ResidenceCountry)).then(|| {
                ValidationIssue::error(
                    IssueKind::RequiredFieldEmpty,
                    format!("{name}: required for residents in Italy"),
                )
            })
        }
        FieldId::DepartureDate => (record.modality() == Some(Modality::Amend)).then(|| {
            ValidationIssue::error(
                IssueKind::RequiredFieldEmpty,
                format!("{name}: required when amending a position"),
            )
        }),
        FieldId::RoomsOccupied | FieldId::RoomsAvailable | FieldId::BedsAvailable => record
            .guest_type()
            .filter(GuestType::occupies_rooms)
            .map(|guest| {
                ValidationIssue::error(
                    IssueKind::RequiredFieldEmpty,
                    format!("{name}: required for guest-type {guest}"),
                )
            }),
        _ => (id.descriptor().requiredness == Requiredness::Required).then(|| {
            ValidationIssue::error(IssueKind::RequiredFieldEmpty, format!("{name}: required"))
        }),
    }
}

/// Domain rule for a non-empty, correctly sized value.
fn domain_rule(
    record: &Record,
    id: FieldId,
    value: &str,
    options: &ValidationOptions,
) -> Option<ValidationIssue> {
    let name = id.name();
    match id {
        FieldId::GuestType => value.parse::<GuestType>().err().map(|_| {
            invalid_value(format!(
                "{name}: {value:?} is not a guest type (16, 17, 18, 19, 20)"
            ))
        }),
        FieldId::Sex => value
            .parse::<Sex>()
            .err()
            .map(|_| invalid_value(format!("{name}: must be 1 (male) or 2 (female)"))),
        FieldId::ArrivalDate | FieldId::BirthDate => check_date(name, value, options),
        FieldId::DepartureDate => {
            // Only constrained when amending; the ordering is a record-level rule.
            if record.modality() == Some(Modality::Amend) {
                check_date(name, value, options)
            } else {
                None
            }
        }
        FieldId::ResidenceProvince => (!is_province_code(value)).then(|| {
            ValidationIssue::error(
                IssueKind::InvalidFormat,
                format!("{name}: must be two letters"),
            )
        }),
        FieldId::BirthComune
        | FieldId::BirthCountry
        | FieldId::Citizenship
        | FieldId::ResidenceComune
        | FieldId::ResidenceCountry => check_numeric(name, value),
        FieldId::TourismType => value
            .parse::<TourismType>()
            .err()
            .map(|_| invalid_value(format!("{name}: {value:?} is not a known tourism type"))),
        FieldId::TransportMode => value
            .parse::<TransportMode>()
            .err()
            .map(|_| invalid_value(format!("{name}: {value:?} is not a known transport mode"))),
        FieldId::RoomsOccupied | FieldId::RoomsAvailable | FieldId::BedsAvailable => {
            match record.guest_type() {
                Some(guest) if guest.is_member() => Some(ValidationIssue::error(
                    IssueKind::FieldShouldBeBlank,
                    format!("{name}: must not be filled for guest-type {guest}"),
                )),
                _ => check_numeric(name, value),
            }
        }
        FieldId::TouristTax => (!matches!(value, "0" | "1"))
            .then(|| invalid_value(format!("{name}: must be 0, 1 or blank"))),
        FieldId::Modality => check_modality(record, name, value),
        _ if id.descriptor().kind == ValueKind::Numeric => check_numeric(name, value),
        _ => None,
    }
}

fn invalid_value(message: String) -> ValidationIssue {
    ValidationIssue::error(IssueKind::InvalidValue, message)
}

fn check_numeric(name: &str, value: &str) -> Option<ValidationIssue> {
    (!value.bytes().all(|b| b.is_ascii_digit())).then(|| {
        ValidationIssue::error(IssueKind::InvalidFormat, format!("{name}: must be numeric"))
    })
}

fn check_date(name: &str, value: &str, options: &ValidationOptions) -> Option<ValidationIssue> {
    options.calendar.parse(value).err().map(|problem| {
        ValidationIssue::error(
            IssueKind::InvalidDate,
            format!("{name}: invalid date {value:?} ({})", problem.describe()),
        )
    })
}

fn check_modality(record: &Record, name: &str, value: &str) -> Option<ValidationIssue> {
    let Ok(modality) = value.parse::<Modality>() else {
        return Some(ValidationIssue::critical(
            IssueKind::InvalidModality,
            format!("{name}: {value:?} is not 1 (new), 2 (amend) or 3 (delete)"),
        ));
    };
    if modality != Modality::Delete {
        return None;
    }
    DELETION_KEYS
        .into_iter()
        .find(|key| record.is_blank(*key))
        .map(|key| {
            ValidationIssue::error(
                IssueKind::RequiredFieldEmpty,
                format!("{name}: deletion requires {}", key.name()),
            )
        })
}

fn is_province_code(value: &str) -> bool {
    value.len() == 2 && value.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Check every field in record order.
///
/// Stops at the first Critical finding; remaining fields are not checked.
pub fn check(record: &Record, options: &ValidationOptions) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for id in FieldId::ALL {
        if let Some(issue) = validate_field(record, id, options).into_issue() {
            let halt = issue.severity == Severity::Critical;
            issues.push(issue);
            if halt {
                break;
            }
        }
    }
    issues
}
