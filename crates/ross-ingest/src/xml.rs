//! Import of movement XML documents back into fixed-width records.
//!
//! Every `arrivo` becomes a new-position record dated by its `movimento`;
//! every `prenotazione` with guests becomes a lone-guest record spanning the
//! booked stay. Capacity figures come from the enclosing `struttura`.

use std::path::Path;

use ross_codec::fit;
use ross_model::{FieldId, GuestType, Record, UNSPECIFIED};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::text::read_text_file;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MovementDocument {
    #[serde(rename = "movimento")]
    movements: Vec<Movement>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Movement {
    #[serde(rename = "data")]
    date: String,
    #[serde(rename = "struttura")]
    structure: Structure,
    #[serde(rename = "arrivi")]
    arrivals: Arrivals,
    #[serde(rename = "prenotazioni")]
    bookings: Bookings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Structure {
    #[serde(rename = "camereoccupate")]
    rooms_occupied: String,
    #[serde(rename = "cameredisponibili")]
    rooms_available: String,
    #[serde(rename = "lettidisponibili")]
    beds_available: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Arrivals {
    #[serde(rename = "arrivo")]
    entries: Vec<Arrival>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Arrival {
    idswh: String,
    #[serde(rename = "tipoalloggiato")]
    guest_type: String,
    #[serde(rename = "sesso")]
    sex: String,
    #[serde(rename = "cittadinanza")]
    citizenship: String,
    #[serde(rename = "statoresidenza")]
    residence_country: String,
    #[serde(rename = "luogoresidenza")]
    residence_comune: String,
    #[serde(rename = "datanascita")]
    birth_date: String,
    #[serde(rename = "statonascita")]
    birth_country: String,
    #[serde(rename = "comunenascita")]
    birth_comune: String,
    #[serde(rename = "tipoturismo")]
    tourism_type: String,
    #[serde(rename = "mezzotrasporto")]
    transport_mode: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Bookings {
    #[serde(rename = "prenotazione")]
    entries: Vec<Booking>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Booking {
    idswh: String,
    #[serde(rename = "arrivo")]
    arrival: String,
    #[serde(rename = "partenza")]
    departure: String,
    #[serde(rename = "ospiti")]
    guests: String,
}

/// `YYYYMMDD` to `DD/MM/YYYY`; anything else is kept as written.
fn field_date(value: &str) -> String {
    let value = value.trim();
    if value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}/{}/{}", &value[6..8], &value[4..6], &value[0..4])
    } else {
        value.to_string()
    }
}

/// Trimmed `value`, or `default` when it is empty.
fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    match value.trim() {
        "" => default,
        trimmed => trimmed,
    }
}

fn sex_code(letter: &str) -> &'static str {
    match letter.trim() {
        "F" => "2",
        _ => "1",
    }
}

struct RecordBuilder(Record);

impl RecordBuilder {
    fn new() -> Self {
        Self(Record::blank())
    }

    fn set(mut self, id: FieldId, value: &str) -> Self {
        self.0.set(id, fit(id, value));
        self
    }

    fn build(self) -> Record {
        self.0
    }
}

fn arrival_record(movement: &Movement, arrival: &Arrival) -> Record {
    let guest_type = or_default(&arrival.guest_type, GuestType::LoneGuest.code());
    let citizenship = arrival.citizenship.trim();
    let mut builder = RecordBuilder::new()
        .set(FieldId::GuestType, guest_type)
        .set(FieldId::ArrivalDate, &field_date(&movement.date))
        .set(FieldId::Sex, sex_code(&arrival.sex))
        .set(FieldId::BirthDate, &field_date(&arrival.birth_date))
        .set(FieldId::BirthComune, &arrival.birth_comune)
        .set(
            FieldId::BirthCountry,
            or_default(&arrival.birth_country, citizenship),
        )
        .set(FieldId::Citizenship, citizenship)
        .set(FieldId::ResidenceComune, &arrival.residence_comune)
        .set(FieldId::ResidenceCountry, &arrival.residence_country)
        .set(
            FieldId::TourismType,
            or_default(&arrival.tourism_type, UNSPECIFIED),
        )
        .set(
            FieldId::TransportMode,
            or_default(&arrival.transport_mode, UNSPECIFIED),
        )
        .set(FieldId::OperationId, &arrival.idswh)
        .set(FieldId::Modality, "1");

    let member = guest_type
        .parse::<GuestType>()
        .is_ok_and(|guest| guest.is_member());
    if !member {
        let structure = &movement.structure;
        builder = builder
            .set(FieldId::RoomsOccupied, or_default(&structure.rooms_occupied, "0"))
            .set(FieldId::RoomsAvailable, or_default(&structure.rooms_available, "0"))
            .set(FieldId::BedsAvailable, or_default(&structure.beds_available, "0"));
    }
    builder.build()
}

fn booking_record(movement: &Movement, booking: &Booking, sequence: usize) -> Record {
    let structure = &movement.structure;
    let idswh = match booking.idswh.trim() {
        "" => format!("PREN{sequence}"),
        id => id.to_string(),
    };
    RecordBuilder::new()
        .set(FieldId::GuestType, GuestType::LoneGuest.code())
        .set(FieldId::ArrivalDate, &field_date(&booking.arrival))
        .set(FieldId::Sex, "1")
        .set(FieldId::DepartureDate, &field_date(&booking.departure))
        .set(FieldId::TourismType, UNSPECIFIED)
        .set(FieldId::TransportMode, UNSPECIFIED)
        .set(FieldId::RoomsOccupied, "1")
        .set(FieldId::RoomsAvailable, or_default(&structure.rooms_available, "0"))
        .set(FieldId::BedsAvailable, or_default(&structure.beds_available, "0"))
        .set(FieldId::OperationId, &idswh)
        .set(FieldId::Modality, "1")
        .build()
}

/// Build records from a movement XML document.
///
/// Fails when the document is malformed, has no `movimento`, or yields no
/// record at all.
pub fn parse_movements_xml(xml: &str) -> Result<Vec<Record>> {
    let document: MovementDocument = quick_xml::de::from_str(xml)?;
    if document.movements.is_empty() {
        return Err(IngestError::NoMovements);
    }

    let mut records = Vec::new();
    for movement in &document.movements {
        for arrival in &movement.arrivals.entries {
            records.push(arrival_record(movement, arrival));
        }
        for booking in &movement.bookings.entries {
            let guests: u32 = booking.guests.trim().parse().unwrap_or(0);
            if guests == 0 {
                debug!(date = %movement.date, "skipping booking without guests");
                continue;
            }
            let sequence = records.len() + 1;
            records.push(booking_record(movement, booking, sequence));
        }
    }

    if records.is_empty() {
        return Err(IngestError::NoRecords);
    }
    info!(
        movements = document.movements.len(),
        records = records.len(),
        "imported movement XML"
    );
    Ok(records)
}

/// Read a movement XML file and build its records.
pub fn read_movements_file(path: &Path) -> Result<Vec<Record>> {
    let xml = read_text_file(path)?;
    parse_movements_xml(&xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_dates_are_expanded() {
        assert_eq!(field_date("20240115"), "15/01/2024");
        assert_eq!(field_date(" 20240115 "), "15/01/2024");
        assert_eq!(field_date("15/01/2024"), "15/01/2024");
        assert_eq!(field_date(""), "");
    }

    #[test]
    fn sex_letters() {
        assert_eq!(sex_code("F"), "2");
        assert_eq!(sex_code("M"), "1");
        assert_eq!(sex_code(""), "1");
    }
}
