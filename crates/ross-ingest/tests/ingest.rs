//! File loading and movement XML import.

use std::io::Write;

use ross_codec::{encode_records, fit};
use ross_ingest::{
    IngestError, parse_movements_xml, read_movements_file, read_records_file, read_text_file,
};
use ross_model::{FieldId, ParseOptions, Record};
use ross_output::{XmlOptions, movements_xml};
use tempfile::NamedTempFile;

const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<movimenti>
  <codice>H042</codice>
  <prodotto>ROSS1000-ISTAT-Processor</prodotto>
  <movimento>
    <data>20240115</data>
    <struttura>
      <apertura>SI</apertura>
      <camereoccupate>3</camereoccupate>
      <cameredisponibili>40</cameredisponibili>
      <lettidisponibili>80</lettidisponibili>
    </struttura>
    <arrivi>
      <arrivo>
        <idswh>HEAD1</idswh>
        <tipoalloggiato>17</tipoalloggiato>
        <idcapo></idcapo>
        <sesso>F</sesso>
        <cittadinanza>100000100</cittadinanza>
        <statoresidenza>100000100</statoresidenza>
        <luogoresidenza>054032</luogoresidenza>
        <datanascita>19850403</datanascita>
        <statonascita></statonascita>
        <comunenascita>054032</comunenascita>
        <tipoturismo>Culturale</tipoturismo>
        <mezzotrasporto></mezzotrasporto>
      </arrivo>
      <arrivo>
        <idswh>MEM1</idswh>
        <tipoalloggiato>19</tipoalloggiato>
        <idcapo>HEAD1</idcapo>
        <sesso>M</sesso>
        <cittadinanza>100000215</cittadinanza>
        <statoresidenza>100000215</statoresidenza>
        <datanascita>20100101</datanascita>
      </arrivo>
    </arrivi>
    <partenze/>
    <prenotazioni>
      <prenotazione>
        <arrivo>20240301</arrivo>
        <partenza>20240305</partenza>
        <ospiti>2</ospiti>
      </prenotazione>
      <prenotazione>
        <idswh>EMPTY</idswh>
        <arrivo>20240310</arrivo>
        <ospiti>0</ospiti>
      </prenotazione>
    </prenotazioni>
  </movimento>
</movimenti>
"#;

#[test]
fn arrivals_and_bookings_become_records() {
    let records = parse_movements_xml(SAMPLE).unwrap();
    assert_eq!(records.len(), 3);

    let head = &records[0];
    assert_eq!(head.trimmed(FieldId::GuestType), "17");
    assert_eq!(head.trimmed(FieldId::ArrivalDate), "15/01/2024");
    assert_eq!(head.trimmed(FieldId::Sex), "2");
    assert_eq!(head.trimmed(FieldId::BirthDate), "03/04/1985");
    assert_eq!(head.trimmed(FieldId::BirthCountry), "100000100");
    assert_eq!(head.trimmed(FieldId::TourismType), "Culturale");
    assert_eq!(head.trimmed(FieldId::TransportMode), "Non Specificato");
    assert_eq!(head.get(FieldId::RoomsOccupied), "  3");
    assert_eq!(head.trimmed(FieldId::RoomsAvailable), "40");
    assert_eq!(head.trimmed(FieldId::BedsAvailable), "80");
    assert_eq!(head.operation_id(), "HEAD1");
    assert_eq!(head.trimmed(FieldId::Modality), "1");

    let member = &records[1];
    assert_eq!(member.trimmed(FieldId::Sex), "1");
    assert_eq!(member.trimmed(FieldId::BirthCountry), "100000215");
    assert!(member.is_blank(FieldId::RoomsOccupied));
    assert!(member.is_blank(FieldId::RoomsAvailable));
    assert!(member.is_blank(FieldId::BedsAvailable));

    let booking = &records[2];
    assert_eq!(booking.trimmed(FieldId::GuestType), "16");
    assert_eq!(booking.trimmed(FieldId::ArrivalDate), "01/03/2024");
    assert_eq!(booking.trimmed(FieldId::DepartureDate), "05/03/2024");
    assert_eq!(booking.trimmed(FieldId::RoomsOccupied), "1");
    assert_eq!(booking.operation_id(), "PREN3");

    for record in &records {
        for (id, value) in record.iter() {
            assert_eq!(value.len(), id.width(), "{id}");
        }
    }
}

#[test]
fn documents_without_movements_are_refused() {
    let err = parse_movements_xml("<movimenti><codice>H1</codice></movimenti>").unwrap_err();
    assert!(matches!(err, IngestError::NoMovements));

    let err = parse_movements_xml(
        "<movimenti><movimento><data>20240101</data><arrivi/></movimento></movimenti>",
    )
    .unwrap_err();
    assert!(matches!(err, IngestError::NoRecords));
}

#[test]
fn malformed_xml_is_an_error() {
    let err = parse_movements_xml("<movimenti><movimento>").unwrap_err();
    assert!(matches!(err, IngestError::Xml(_)));
}

fn guest(kind: &str, id: &str, arrival: &str) -> Record {
    let mut record = Record::blank();
    for (field, value) in [
        (FieldId::GuestType, kind),
        (FieldId::ArrivalDate, arrival),
        (FieldId::Sex, "2"),
        (FieldId::Citizenship, "100000100"),
        (FieldId::ResidenceCountry, "100000100"),
        (FieldId::TourismType, "Balneare"),
        (FieldId::TransportMode, "Treno"),
        (FieldId::RoomsOccupied, "1"),
        (FieldId::RoomsAvailable, "10"),
        (FieldId::BedsAvailable, "20"),
        (FieldId::OperationId, id),
        (FieldId::Modality, "1"),
    ] {
        record.set(field, fit(field, value));
    }
    record
}

#[test]
fn generated_xml_imports_back() {
    let records = vec![
        guest("16", "A1", "15/01/2024"),
        guest("16", "A2", "16/01/2024"),
    ];
    let xml = movements_xml(&records, &XmlOptions::default()).unwrap();
    let imported = parse_movements_xml(&xml).unwrap();

    assert_eq!(imported.len(), 2);
    for (original, back) in records.iter().zip(&imported) {
        for id in [
            FieldId::GuestType,
            FieldId::ArrivalDate,
            FieldId::Sex,
            FieldId::Citizenship,
            FieldId::TourismType,
            FieldId::TransportMode,
            FieldId::OperationId,
            FieldId::Modality,
        ] {
            assert_eq!(original.get(id), back.get(id), "{id}");
        }
    }
}

#[test]
fn movement_files_are_read_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();
    let records = read_movements_file(file.path()).unwrap();
    assert_eq!(records.len(), 3);
}

#[test]
fn text_files_keep_their_terminators() {
    let records = vec![guest("16", "A1", "15/01/2024")];
    let text = encode_records(&records);
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();

    assert_eq!(read_text_file(file.path()).unwrap(), text);
    assert!(text.ends_with("\r\n"));
    assert_eq!(
        read_records_file(file.path(), ParseOptions::default()).unwrap(),
        records
    );
}

#[test]
fn unreadable_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    assert!(matches!(
        read_text_file(&missing),
        Err(IngestError::FileNotFound { .. })
    ));

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"16\xff\r\n").unwrap();
    let err = read_records_file(file.path(), ParseOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::Decode { .. }));
    assert!(err.to_string().contains("offset 2"));
}
