//! Integration tests for field and record validation.

use ross_codec::{encode, encode_records, fit};
use ross_model::{
    CalendarCheck, FieldId, IssueKind, ParseOptions, Record, Severity, ValidationIssue,
    ValidationOptions,
};
use ross_validate::{
    FILE_ISSUES_NOTE, RecordValidationResult, Selection, render_text, validate_field,
    validate_file, validate_line, validate_record, validate_records, write_csv,
};

/// A lone guest, Italian, resident in Italy, that passes every rule.
fn valid_record() -> Record {
    build(&[
        (FieldId::GuestType, "16"),
        (FieldId::ArrivalDate, "15/01/2024"),
        (FieldId::Sex, "1"),
        (FieldId::BirthDate, "01/01/1980"),
        (FieldId::BirthComune, "054032"),
        (FieldId::BirthProvince, "RM"),
        (FieldId::BirthCountry, "100000100"),
        (FieldId::Citizenship, "100000100"),
        (FieldId::ResidenceComune, "054032"),
        (FieldId::ResidenceProvince, "RM"),
        (FieldId::ResidenceCountry, "100000100"),
        (FieldId::DepartureDate, "20/01/2024"),
        (FieldId::TourismType, "Culturale"),
        (FieldId::TransportMode, "Auto"),
        (FieldId::RoomsOccupied, "1"),
        (FieldId::RoomsAvailable, "50"),
        (FieldId::BedsAvailable, "100"),
        (FieldId::TouristTax, "1"),
        (FieldId::OperationId, "POS0000001"),
        (FieldId::Modality, "1"),
    ])
}

fn build(values: &[(FieldId, &str)]) -> Record {
    let mut record = Record::blank();
    for (id, value) in values {
        record.set(*id, fit(*id, value));
    }
    record
}

fn set(record: &mut Record, id: FieldId, value: &str) {
    record.set(id, fit(id, value));
}

fn validate(record: &Record) -> RecordValidationResult {
    validate_record(record, &ValidationOptions::default())
}

fn issues_on(result: &RecordValidationResult, field: FieldId) -> Vec<&ValidationIssue> {
    result.issues().filter(|i| i.field == Some(field)).collect()
}

#[test]
fn well_formed_record_has_no_issues() {
    let result = validate(&valid_record());
    assert!(result.is_accepted(), "{:?}", result);
    assert_eq!(result.issues().count(), 0);
}

#[test]
fn validation_is_idempotent() {
    let mut record = valid_record();
    set(&mut record, FieldId::Sex, "7");
    set(&mut record, FieldId::DepartureDate, "10/01/2024");
    assert_eq!(validate(&record), validate(&record));
}

#[test]
fn residents_in_italy_need_comune_and_province() {
    let mut record = valid_record();
    set(&mut record, FieldId::ResidenceComune, "");
    set(&mut record, FieldId::ResidenceProvince, "");
    let result = validate(&record);

    for field in [FieldId::ResidenceComune, FieldId::ResidenceProvince] {
        let issues = issues_on(&result, field);
        assert_eq!(issues.len(), 1, "{field}");
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[0].message.contains("required for residents in Italy"));
    }
}

#[test]
fn foreign_residents_may_omit_comune_and_province() {
    let mut record = valid_record();
    set(&mut record, FieldId::ResidenceCountry, "100000215");
    set(&mut record, FieldId::Citizenship, "100000215");
    set(&mut record, FieldId::BirthCountry, "100000215");
    set(&mut record, FieldId::ResidenceComune, "");
    set(&mut record, FieldId::ResidenceProvince, "");
    assert!(validate(&record).is_accepted());
}

#[test]
fn members_must_leave_accommodation_blank() {
    let mut record = valid_record();
    set(&mut record, FieldId::GuestType, "19");
    for id in FieldId::ACCOMMODATION {
        set(&mut record, id, "");
    }
    assert!(validate(&record).is_accepted());

    record.set(FieldId::RoomsOccupied, "  1");
    let result = validate(&record);
    let issues = issues_on(&result, FieldId::RoomsOccupied);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Error);
    assert!(issues[0].message.contains("must not be filled for guest-type 19"));
}

#[test]
fn departure_must_follow_arrival() {
    let mut record = valid_record();
    set(&mut record, FieldId::Modality, "2");
    set(&mut record, FieldId::ArrivalDate, "15/01/2024");
    set(&mut record, FieldId::DepartureDate, "10/01/2024");
    let result = validate(&record);
    let ordering: Vec<_> = issues_on(&result, FieldId::DepartureDate)
        .into_iter()
        .filter(|i| i.message.to_lowercase().contains("departure must be after arrival"))
        .collect();
    assert_eq!(ordering.len(), 1);
    assert_eq!(ordering[0].severity, Severity::Error);

    set(&mut record, FieldId::ArrivalDate, "10/01/2024");
    set(&mut record, FieldId::DepartureDate, "15/01/2024");
    let result = validate(&record);
    assert!(
        result
            .issues()
            .all(|i| !i.message.to_lowercase().contains("departure must be after arrival"))
    );
    assert!(result.is_accepted());
}

#[test]
fn long_stays_warn() {
    let mut record = valid_record();
    set(&mut record, FieldId::DepartureDate, "20/01/2025");
    let result = validate(&record);
    assert!(result.is_accepted());
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].message.contains("371 days"));

    let relaxed = ValidationOptions::default().with_long_stay_days(400);
    assert!(!validate_record(&record, &relaxed).has_warnings());
}

#[test]
fn deletion_needs_only_keys_and_warns_on_extra_fields() {
    let mut record = valid_record();
    set(&mut record, FieldId::Modality, "3");
    set(&mut record, FieldId::Surname, "Rossi");
    set(&mut record, FieldId::GivenName, "Mario");
    set(&mut record, FieldId::Address, "Via Roma 1");
    set(&mut record, FieldId::DocumentType, "IDENT");
    set(&mut record, FieldId::DocumentNumber, "AB1234567");
    set(&mut record, FieldId::DocumentIssuePlace, "058091");

    let result = validate(&record);
    assert!(result.is_accepted(), "{:?}", result.errors);
    let unnecessary = result
        .warnings
        .iter()
        .filter(|i| i.kind == IssueKind::UnnecessaryForDeletion)
        .count();
    assert_eq!(unnecessary, 22);
    assert_eq!(result.warnings.len(), 22);
}

#[test]
fn deletion_with_only_keys_is_accepted() {
    let record = build(&[
        (FieldId::GuestType, "16"),
        (FieldId::ArrivalDate, "15/01/2024"),
        (FieldId::OperationId, "POS0000001"),
        (FieldId::Modality, "3"),
    ]);
    let result = validate(&record);
    assert!(result.is_accepted(), "{:?}", result.errors);
    assert!(!result.has_warnings());
}

#[test]
fn deletion_without_arrival_is_rejected() {
    let record = build(&[
        (FieldId::GuestType, "16"),
        (FieldId::OperationId, "POS0000001"),
        (FieldId::Modality, "3"),
    ]);
    let result = validate(&record);
    assert!(!result.is_accepted());
    assert!(!issues_on(&result, FieldId::ArrivalDate).is_empty());
    assert!(!issues_on(&result, FieldId::Modality).is_empty());
}

#[test]
fn accommodation_figures_are_cross_checked() {
    let mut record = valid_record();
    set(&mut record, FieldId::RoomsOccupied, "45");
    set(&mut record, FieldId::RoomsAvailable, "50");
    set(&mut record, FieldId::BedsAvailable, "40");
    let result = validate(&record);
    assert!(result.is_accepted());
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].field, Some(FieldId::RoomsOccupied));

    set(&mut record, FieldId::RoomsOccupied, "60");
    let result = validate(&record);
    assert!(
        result
            .errors
            .iter()
            .any(|i| i.message.contains("cannot exceed rooms available"))
    );
}

#[test]
fn zero_counts_are_independent_errors() {
    let mut record = valid_record();
    set(&mut record, FieldId::RoomsOccupied, "0");
    set(&mut record, FieldId::BedsAvailable, "");
    let result = validate(&record);
    assert_eq!(issues_on(&result, FieldId::RoomsOccupied).len(), 1);
    assert_eq!(issues_on(&result, FieldId::RoomsAvailable).len(), 0);
    // Blank beds: once as a required field, once as a record rule.
    assert_eq!(issues_on(&result, FieldId::BedsAvailable).len(), 2);
}

#[test]
fn italian_citizen_abroad_warns() {
    let mut record = valid_record();
    set(&mut record, FieldId::ResidenceCountry, "100000215");
    let result = validate(&record);
    assert!(result.is_accepted());
    let warnings = issues_on(&result, FieldId::ResidenceCountry);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].message, "Italian citizen resident abroad");
}

#[test]
fn age_plausibility() {
    let mut record = valid_record();
    set(&mut record, FieldId::BirthDate, "01/02/2024");
    let result = validate(&record);
    assert!(
        issues_on(&result, FieldId::BirthDate)
            .iter()
            .any(|i| i.severity == Severity::Error)
    );

    set(&mut record, FieldId::BirthDate, "01/01/1900");
    let result = validate(&record);
    assert!(result.is_accepted());
    assert_eq!(result.warnings[0].message, "Unusual age: 124 years");

    set(&mut record, FieldId::BirthDate, "20/01/2010");
    let result = validate(&record);
    assert_eq!(result.info.len(), 1);
    assert_eq!(result.info[0].message, "Minor guest: 13 years");

    set(&mut record, FieldId::GuestType, "19");
    for id in FieldId::ACCOMMODATION {
        set(&mut record, id, "");
    }
    assert!(!validate(&record).has_info());
}

#[test]
fn italians_born_in_italy_need_birth_place() {
    let mut record = valid_record();
    set(&mut record, FieldId::BirthComune, "");
    set(&mut record, FieldId::BirthProvince, "");
    let result = validate(&record);
    assert_eq!(issues_on(&result, FieldId::BirthComune).len(), 1);
    assert_eq!(issues_on(&result, FieldId::BirthProvince).len(), 1);
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn travel_heuristics_are_informational() {
    let mut record = valid_record();
    set(&mut record, FieldId::TourismType, "Balneare");
    set(&mut record, FieldId::TransportMode, "Aereo");
    let result = validate(&record);
    assert!(result.is_accepted());
    assert_eq!(result.info.len(), 1);
    assert_eq!(result.info[0].kind, IssueKind::Unusual);

    let quiet = ValidationOptions::default().with_travel_heuristics(false);
    assert!(!validate_record(&record, &quiet).has_info());
}

#[test]
fn unknown_categories_are_rejected() {
    let mut record = valid_record();
    set(&mut record, FieldId::TourismType, "Spiaggia");
    set(&mut record, FieldId::TransportMode, "Aereo+Pullman");
    let result = validate(&record);
    assert_eq!(issues_on(&result, FieldId::TourismType).len(), 1);
    assert!(issues_on(&result, FieldId::TransportMode).is_empty());
}

#[test]
fn calendar_check_is_loose_by_default() {
    let mut record = valid_record();
    set(&mut record, FieldId::ArrivalDate, "31/02/2024");
    set(&mut record, FieldId::DepartureDate, "05/03/2024");
    assert!(validate(&record).is_accepted());

    let strict = ValidationOptions::default().with_calendar(CalendarCheck::Strict);
    let outcome = validate_field(&record, FieldId::ArrivalDate, &strict);
    let issue = outcome.into_issue().unwrap();
    assert_eq!(issue.kind, IssueKind::InvalidDate);
}

#[test]
fn heads_need_operation_identifier() {
    let mut record = valid_record();
    set(&mut record, FieldId::GuestType, "17");
    set(&mut record, FieldId::OperationId, "");
    let result = validate(&record);
    assert!(result.has_critical());
    let on_id = issues_on(&result, FieldId::OperationId);
    assert_eq!(on_id.len(), 2);
    assert_eq!(on_id[0].kind, IssueKind::MissingOperationId);
    assert_eq!(on_id[1].severity, Severity::Error);
}

#[test]
fn invalid_modality_is_critical() {
    let mut record = valid_record();
    set(&mut record, FieldId::Modality, "9");
    let result = validate(&record);
    assert!(result.has_critical());
    assert_eq!(result.errors[0].kind, IssueKind::InvalidModality);
}

#[test]
fn wrong_line_length_stops_checks() {
    let line = encode(&valid_record());
    let (_, result) = validate_line(&line[..327], &ValidationOptions::default());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind, IssueKind::InvalidRecordLength);
    assert_eq!(result.errors[0].severity, Severity::Critical);

    let (record, result) = validate_line(&line, &ValidationOptions::default());
    assert!(result.is_accepted());
    assert_eq!(record, valid_record());
}

#[test]
fn accented_fields_reject_the_record() {
    let mut record = valid_record();
    set(&mut record, FieldId::Surname, "Niccolò");
    let text = encode_records([&record, &valid_record()]);
    assert_eq!(text.lines().next().unwrap().len(), 328);

    let validated = validate_file(&text, &ValidationOptions::default(), ParseOptions::default());
    let result = &validated.report.records[0];
    assert!(!result.is_accepted());
    let issues = issues_on(result, FieldId::Surname);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::NonAsciiContent);
    assert!(!validated.report.metrics.ascii_only);
    assert!(!validated.report.is_valid());

    let exported = encode_records(validated.accepted());
    assert!(exported.is_ascii());
    assert_eq!(exported.len(), 328 + 2);
}

#[test]
fn character_count_does_not_pass_the_length_gate() {
    let line = encode(&valid_record());
    // Same number of characters, one byte more.
    let widened = line.replacen("  ", "ò ", 1);
    assert_eq!(widened.chars().count(), line.chars().count());
    let (_, result) = validate_line(&widened, &ValidationOptions::default());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind, IssueKind::InvalidRecordLength);
}

#[test]
fn file_validation_partitions_records() {
    let mut bad = valid_record();
    set(&mut bad, FieldId::Sex, "3");
    let records = vec![valid_record(), bad.clone(), valid_record()];
    let text = encode_records(&records);

    let validated = validate_file(&text, &ValidationOptions::default(), ParseOptions::default());
    let metrics = validated.report.metrics;
    assert_eq!(metrics.total_records, 3);
    assert_eq!(metrics.accepted_records, 2);
    assert_eq!(metrics.rejected_records, 1);
    assert!(metrics.line_endings_ok);
    assert!(metrics.ascii_only);
    assert!(!validated.report.is_valid());
    assert_eq!(validated.rejected(), vec![&bad]);
    assert_eq!(validated.select(Selection::Accepted).len(), 2);
}

#[test]
fn records_validate_without_file_checks() {
    let mut bad = valid_record();
    set(&mut bad, FieldId::Sex, "3");
    let records = vec![valid_record(), bad.clone()];

    let report = validate_records(&records, &ValidationOptions::default());
    assert_eq!(report.metrics.total_records, 2);
    assert_eq!(report.metrics.accepted_records, 1);
    assert!(report.file_issues.is_empty());
    assert_eq!(report.records[1], validate(&bad));
    assert_eq!(report.select(&records, Selection::Rejected), vec![&bad]);
}

#[test]
fn lf_files_raise_a_file_issue_but_records_stay_accepted() {
    let line = encode(&valid_record());
    let text = format!("{line}\n{line}\n");
    let validated = validate_file(&text, &ValidationOptions::default(), ParseOptions::default());
    assert!(!validated.report.metrics.line_endings_ok);
    assert_eq!(validated.report.file_issues.len(), 1);
    assert_eq!(
        validated.report.file_issues[0].kind,
        IssueKind::InvalidLineEnding
    );
    assert!(validated.report.is_valid());

    let report = render_text(&validated.report);
    assert!(report.contains(&format!("Status: VALID\nNote: {FILE_ISSUES_NOTE}\n")));
    assert!(report.contains("CRITICAL [INVALID_LINE_ENDING]"));
}

#[test]
fn fill_defaults_rescues_blank_categories() {
    let mut record = valid_record();
    set(&mut record, FieldId::TourismType, "");
    let text = encode_records([&record]);

    let plain = validate_file(&text, &ValidationOptions::default(), ParseOptions::default());
    assert!(!plain.report.is_valid());

    let filled = validate_file(
        &text,
        &ValidationOptions::default(),
        ParseOptions::default().with_fill_unspecified_defaults(true),
    );
    assert!(filled.report.is_valid());
    assert_eq!(
        filled.records[0].trimmed(FieldId::TourismType),
        "Non Specificato"
    );
}

#[test]
fn text_report_lists_totals_and_records() {
    let mut bad = valid_record();
    set(&mut bad, FieldId::Sex, "3");
    let text = encode_records([&valid_record(), &bad]);
    let validated = validate_file(&text, &ValidationOptions::default(), ParseOptions::default());
    let report = render_text(&validated.report);

    let totals = report.lines().nth(2).unwrap();
    insta::assert_snapshot!(totals, @"Records: 2 total, 1 accepted, 1 rejected (50.0% valid)");
    assert!(report.contains("Issues: 0 critical, 1 error, 0 warning, 0 info"));
    assert!(report.contains("Fields with most errors:\n  5 (Sesso): 1"));
    assert!(report.contains("Record 2: rejected"));
    assert!(!report.contains("Record 1:"));
    assert!(!report.contains("Note:"));
}

#[test]
fn csv_export_has_one_row_per_issue() {
    let mut bad = valid_record();
    set(&mut bad, FieldId::Sex, "3");
    set(&mut bad, FieldId::TouristTax, "5");
    let text = format!("{}\n", encode(&bad));
    let validated = validate_file(&text, &ValidationOptions::default(), ParseOptions::default());

    let mut out = Vec::new();
    write_csv(&validated.report, &mut out).unwrap();
    let csv = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "line,severity,kind,field,field_name,message");
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with(",CRITICAL,INVALID_LINE_ENDING,,,"));
    assert!(lines[2].starts_with("1,ERROR,INVALID_VALUE,5,Sesso,"));
}
