//! Cross-field rules operating on trimmed values of a whole record.

use chrono::NaiveDate;
use ross_model::{
    FieldDate, FieldId, GuestType, IssueKind, Modality, Record, TourismType,
    TransportMode, ValidationIssue, ValidationOptions, age_in_years, is_italy,
};

use super::field::DELETION_KEYS;

/// Run every record-level rule.
pub fn check(record: &Record, options: &ValidationOptions) -> Vec<ValidationIssue> {
    let deleting = record.modality() == Some(Modality::Delete);
    let mut issues = Vec::new();

    issues.extend(head_identifier(record));
    issues.extend(stay_dates(record, options));
    issues.extend(residence_abroad(record));
    issues.extend(accommodation(record, deleting));
    if deleting {
        issues.extend(deletion(record));
    }
    issues.extend(age(record, options));
    if !deleting {
        issues.extend(birth_place(record));
    }
    if options.flag_travel_heuristics {
        issues.extend(travel_patterns(record));
    }
    issues
}

/// Loosely parsed calendar date of a date field, if well formed.
fn date_of(record: &Record, id: FieldId) -> Option<NaiveDate> {
    FieldDate::parse(record.trimmed(id))
        .ok()
        .and_then(|date| date.to_naive())
}

fn head_identifier(record: &Record) -> Vec<ValidationIssue> {
    match record.guest_type() {
        Some(guest) if guest.is_head() && record.operation_id().is_empty() => {
            vec![
                ValidationIssue::error(
                    IssueKind::RequiredFieldEmpty,
                    format!("Operation identifier is required for a {}", guest.label()),
                )
                .on(FieldId::OperationId),
            ]
        }
        _ => Vec::new(),
    }
}

fn stay_dates(record: &Record, options: &ValidationOptions) -> Vec<ValidationIssue> {
    let (Some(arrival), Some(departure)) = (
        date_of(record, FieldId::ArrivalDate),
        date_of(record, FieldId::DepartureDate),
    ) else {
        return Vec::new();
    };

    if departure <= arrival {
        return vec![
            ValidationIssue::error(
                IssueKind::LogicalInconsistency,
                "Departure must be after arrival",
            )
            .on(FieldId::DepartureDate),
        ];
    }

    let days = (departure - arrival).num_days();
    if days > options.long_stay_days {
        return vec![
            ValidationIssue::warning(
                IssueKind::Implausible,
                format!("Extended stay of {days} days"),
            )
            .on(FieldId::DepartureDate),
        ];
    }
    Vec::new()
}

fn residence_abroad(record: &Record) -> Vec<ValidationIssue> {
    let residence = record.trimmed(FieldId::ResidenceCountry);
    let citizen = is_italy(record.trimmed(FieldId::Citizenship));
    if citizen && !residence.is_empty() && !is_italy(residence) {
        return vec![
            ValidationIssue::warning(
                IssueKind::LogicalInconsistency,
                "Italian citizen resident abroad",
            )
            .on(FieldId::ResidenceCountry),
        ];
    }
    Vec::new()
}

/// Integer value of a count field; blank or malformed reads as zero.
fn count(record: &Record, id: FieldId) -> u32 {
    record.trimmed(id).parse().unwrap_or(0)
}

fn accommodation(record: &Record, deleting: bool) -> Vec<ValidationIssue> {
    let Some(guest) = record.guest_type().filter(GuestType::occupies_rooms) else {
        return Vec::new();
    };
    let mut issues = Vec::new();

    if !deleting {
        for id in FieldId::ACCOMMODATION {
            if count(record, id) == 0 {
                issues.push(
                    ValidationIssue::error(
                        IssueKind::RequiredFieldEmpty,
                        format!(
                            "{} must be present and non-zero for a {}",
                            id.name(),
                            guest.label()
                        ),
                    )
                    .on(id),
                );
            }
        }
    }

    let occupied = count(record, FieldId::RoomsOccupied);
    let rooms = count(record, FieldId::RoomsAvailable);
    let beds = count(record, FieldId::BedsAvailable);

    if rooms > 0 && occupied > rooms {
        issues.push(
            ValidationIssue::error(
                IssueKind::LogicalInconsistency,
                format!("Rooms occupied ({occupied}) cannot exceed rooms available ({rooms})"),
            )
            .on(FieldId::RoomsOccupied),
        );
    }
    if beds > 0 && occupied > beds {
        issues.push(
            ValidationIssue::warning(
                IssueKind::LogicalInconsistency,
                format!("More rooms occupied ({occupied}) than beds available ({beds})"),
            )
            .on(FieldId::RoomsOccupied),
        );
    }
    issues
}

fn deletion(record: &Record) -> Vec<ValidationIssue> {
    let mut issues: Vec<ValidationIssue> = DELETION_KEYS
        .into_iter()
        .filter(|id| record.is_blank(*id))
        .map(|id| {
            ValidationIssue::error(
                IssueKind::RequiredFieldEmpty,
                format!("{} is required for deletion", id.name()),
            )
            .on(id)
        })
        .collect();

    issues.extend(
        FieldId::ALL
            .into_iter()
            .filter(|id| !DELETION_KEYS.contains(id) && *id != FieldId::Modality)
            .filter(|id| !record.is_blank(*id))
            .map(|id| {
                ValidationIssue::warning(
                    IssueKind::UnnecessaryForDeletion,
                    format!("{}: field unnecessary for deletion", id.name()),
                )
                .on(id)
            }),
    );
    issues
}

fn age(record: &Record, options: &ValidationOptions) -> Vec<ValidationIssue> {
    let (Some(birth), Some(arrival)) = (
        date_of(record, FieldId::BirthDate),
        date_of(record, FieldId::ArrivalDate),
    ) else {
        return Vec::new();
    };

    let years = age_in_years(birth, arrival);
    let issue = if years < 0 {
        ValidationIssue::error(
            IssueKind::LogicalInconsistency,
            "Birth date is after arrival date",
        )
    } else if years > options.max_plausible_age {
        ValidationIssue::warning(IssueKind::Implausible, format!("Unusual age: {years} years"))
    } else if years < options.adult_age && !record.guest_type().is_some_and(|g| g.is_member()) {
        ValidationIssue::info(IssueKind::Implausible, format!("Minor guest: {years} years"))
    } else {
        return Vec::new();
    };
    vec![issue.on(FieldId::BirthDate)]
}

fn birth_place(record: &Record) -> Vec<ValidationIssue> {
    if !(is_italy(record.trimmed(FieldId::Citizenship))
        && is_italy(record.trimmed(FieldId::BirthCountry)))
    {
        return Vec::new();
    }
    [FieldId::BirthComune, FieldId::BirthProvince]
        .into_iter()
        .filter(|id| record.is_blank(*id))
        .map(|id| {
            ValidationIssue::error(
                IssueKind::RequiredFieldEmpty,
                format!("{} is required for Italian citizens born in Italy", id.name()),
            )
            .on(id)
        })
        .collect()
}

fn travel_patterns(record: &Record) -> Vec<ValidationIssue> {
    let tourism = record.trimmed(FieldId::TourismType).parse::<TourismType>().ok();
    let transport = record
        .trimmed(FieldId::TransportMode)
        .parse::<TransportMode>()
        .ok();
    let note = match (tourism, transport) {
        (Some(TourismType::Beach), Some(TransportMode::Air)) => {
            "Beach tourism with air transport"
        }
        (Some(TourismType::Cycling), Some(TransportMode::Car)) => {
            "Cycling tourism with car transport (bicycle probably carried)"
        }
        _ => return Vec::new(),
    };
    vec![ValidationIssue::info(IssueKind::Unusual, note).on(FieldId::TransportMode)]
}
