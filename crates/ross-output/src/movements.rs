//! Movement XML: accepted records grouped by date.
//!
//! Every distinct arrival or departure date becomes one `movimento` with a
//! capacity block, the arrivals of new and amended positions, and the
//! departures of that day. Dates are emitted in calendar order.

use std::collections::BTreeMap;
use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, Event};
use ross_model::{FieldDate, FieldId, GuestType, ITALY_CODE, Record, Sex};
use tracing::{debug, info};

use crate::common::{empty, end, start, write_text_element};
use crate::error::Result;

/// Facility code used when none can be derived.
pub const DEFAULT_FACILITY_CODE: &str = "STRUTTURA001";

/// Product identifier written into every document.
pub const DEFAULT_PRODUCT: &str = "ROSS1000-ISTAT-Processor";

/// Options for movement XML output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlOptions {
    pub facility_code: String,
    pub product: String,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            facility_code: DEFAULT_FACILITY_CODE.to_string(),
            product: DEFAULT_PRODUCT.to_string(),
        }
    }
}

impl XmlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_facility_code(mut self, code: impl Into<String>) -> Self {
        self.facility_code = code.into();
        self
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }
}

/// Facility code taken from the leading alphanumeric run of a file name.
///
/// `H123_jan.txt` gives `H123`; a name starting with anything else gives
/// [`DEFAULT_FACILITY_CODE`].
pub fn facility_code_from_file_name(name: &str) -> String {
    let code: String = name
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect();
    if code.is_empty() {
        DEFAULT_FACILITY_CODE.to_string()
    } else {
        code
    }
}

/// Aggregate room and bed figures of one date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capacity {
    pub rooms_occupied: u32,
    pub rooms_available: u32,
    pub beds_available: u32,
}

/// One date of the movement document.
///
/// `arrivals` and `departures` hold indices into the record slice the
/// movement was built from, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    pub date: FieldDate,
    pub capacity: Capacity,
    pub arrivals: Vec<usize>,
    pub departures: Vec<usize>,
}

fn date_of(record: &Record, id: FieldId) -> Option<FieldDate> {
    FieldDate::parse(record.trimmed(id)).ok()
}

fn count(record: &Record, id: FieldId) -> u32 {
    record.trimmed(id).parse().unwrap_or(0)
}

fn date_key(date: FieldDate) -> (i32, u32, u32) {
    (date.year, date.month, date.day)
}

#[derive(Default)]
struct Day {
    arrivals: Vec<usize>,
    departures: Vec<usize>,
}

/// Group records by arrival and departure date and derive each date's
/// capacity.
///
/// Rooms occupied sums the arrivals of lone guests and heads; rooms and
/// beds available come from the first arrival of the date. Only new and
/// amended positions are listed as arrivals, but every arrival counts
/// towards capacity.
pub fn group_movements(records: &[Record]) -> Vec<Movement> {
    let mut days: BTreeMap<(i32, u32, u32), (FieldDate, Day)> = BTreeMap::new();
    for (index, record) in records.iter().enumerate() {
        if let Some(date) = date_of(record, FieldId::ArrivalDate) {
            let (_, day) = days.entry(date_key(date)).or_insert_with(|| (date, Day::default()));
            day.arrivals.push(index);
        }
        if let Some(date) = date_of(record, FieldId::DepartureDate) {
            let (_, day) = days.entry(date_key(date)).or_insert_with(|| (date, Day::default()));
            day.departures.push(index);
        }
    }

    days.into_values()
        .map(|(date, day)| {
            let rooms_occupied = day
                .arrivals
                .iter()
                .map(|&i| &records[i])
                .filter(|r| r.guest_type().is_some_and(|g| g.occupies_rooms()))
                .map(|r| count(r, FieldId::RoomsOccupied))
                .sum();
            let first = day.arrivals.first().map(|&i| &records[i]);
            let capacity = Capacity {
                rooms_occupied,
                rooms_available: first.map_or(0, |r| count(r, FieldId::RoomsAvailable)),
                beds_available: first.map_or(0, |r| count(r, FieldId::BedsAvailable)),
            };
            let arrivals = day
                .arrivals
                .into_iter()
                .filter(|&i| records[i].modality().is_some_and(|m| m.is_transmitted()))
                .collect();
            Movement {
                date,
                capacity,
                arrivals,
                departures: day.departures,
            }
        })
        .collect()
}

/// Operation identifier of the head each family or group member travels
/// with, indexed like `records`.
///
/// A member is linked to the nearest preceding head of its own kind
/// (family member to family head, group member to group head), else to the
/// nearest preceding head of either kind. Heads without an operation
/// identifier are skipped. Non-members map to `None`.
pub fn leader_links(records: &[Record]) -> Vec<Option<&str>> {
    let mut family_head: Option<&str> = None;
    let mut group_head: Option<&str> = None;
    let mut any_head: Option<&str> = None;

    records
        .iter()
        .map(|record| {
            let guest = record.guest_type()?;
            let id = record.operation_id();
            if guest.is_head() {
                if !id.is_empty() {
                    if guest == GuestType::FamilyHead {
                        family_head = Some(id);
                    } else {
                        group_head = Some(id);
                    }
                    any_head = Some(id);
                }
                return None;
            }
            let own_head = match guest.leader_kind()? {
                GuestType::FamilyHead => family_head,
                _ => group_head,
            };
            own_head.or(any_head)
        })
        .collect()
}

/// Write the movement document for `records` to `writer`.
///
/// Callers pass accepted records only; nothing is re-validated here.
pub fn write_movements_xml<W: Write>(
    writer: W,
    records: &[Record],
    options: &XmlOptions,
) -> Result<()> {
    let movements = group_movements(records);
    let leaders = leader_links(records);

    let mut xml = Writer::new_with_indent(writer, b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    start(&mut xml, "movimenti")?;
    write_text_element(&mut xml, "codice", &options.facility_code)?;
    write_text_element(&mut xml, "prodotto", &options.product)?;

    for movement in &movements {
        debug!(
            date = %movement.date,
            arrivals = movement.arrivals.len(),
            departures = movement.departures.len(),
            rooms_occupied = movement.capacity.rooms_occupied,
            "writing movement"
        );
        start(&mut xml, "movimento")?;
        write_text_element(&mut xml, "data", &movement.date.compact())?;
        write_capacity(&mut xml, movement.capacity)?;

        if movement.arrivals.is_empty() {
            empty(&mut xml, "arrivi")?;
        } else {
            start(&mut xml, "arrivi")?;
            for &index in &movement.arrivals {
                write_arrival(&mut xml, &records[index], leaders[index])?;
            }
            end(&mut xml, "arrivi")?;
        }

        if movement.departures.is_empty() {
            empty(&mut xml, "partenze")?;
        } else {
            start(&mut xml, "partenze")?;
            for &index in &movement.departures {
                write_departure(&mut xml, &records[index])?;
            }
            end(&mut xml, "partenze")?;
        }
        end(&mut xml, "movimento")?;
    }

    end(&mut xml, "movimenti")?;
    xml.into_inner().flush()?;
    info!(
        records = records.len(),
        movements = movements.len(),
        facility = %options.facility_code,
        "movement XML written"
    );
    Ok(())
}

/// Render the movement document as a string.
pub fn movements_xml(records: &[Record], options: &XmlOptions) -> Result<String> {
    let mut buffer = Vec::new();
    write_movements_xml(&mut buffer, records, options)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_capacity<W: Write>(xml: &mut Writer<W>, capacity: Capacity) -> Result<()> {
    start(xml, "struttura")?;
    write_text_element(xml, "apertura", "SI")?;
    write_text_element(xml, "camereoccupate", &capacity.rooms_occupied.to_string())?;
    write_text_element(xml, "cameredisponibili", &capacity.rooms_available.to_string())?;
    write_text_element(xml, "lettidisponibili", &capacity.beds_available.to_string())?;
    end(xml, "struttura")
}

/// Comune code when the paired country is exactly Italy, else empty.
fn comune_if_italian(record: &Record, comune: FieldId, country: FieldId) -> &str {
    if record.trimmed(country) == ITALY_CODE {
        record.trimmed(comune)
    } else {
        ""
    }
}

fn compact_date(record: &Record, id: FieldId) -> String {
    date_of(record, id)
        .map(|date| date.compact())
        .unwrap_or_default()
}

fn write_arrival<W: Write>(
    xml: &mut Writer<W>,
    record: &Record,
    leader: Option<&str>,
) -> Result<()> {
    let sex = record
        .trimmed(FieldId::Sex)
        .parse::<Sex>()
        .map_or("", |sex| sex.letter());

    start(xml, "arrivo")?;
    write_text_element(xml, "idswh", record.operation_id())?;
    write_text_element(xml, "tipoalloggiato", record.trimmed(FieldId::GuestType))?;
    write_text_element(xml, "idcapo", leader.unwrap_or_default())?;
    write_text_element(xml, "sesso", sex)?;
    write_text_element(xml, "cittadinanza", record.trimmed(FieldId::Citizenship))?;
    write_text_element(xml, "statoresidenza", record.trimmed(FieldId::ResidenceCountry))?;
    write_text_element(
        xml,
        "luogoresidenza",
        comune_if_italian(record, FieldId::ResidenceComune, FieldId::ResidenceCountry),
    )?;
    write_text_element(xml, "datanascita", &compact_date(record, FieldId::BirthDate))?;
    write_text_element(xml, "statonascita", record.trimmed(FieldId::BirthCountry))?;
    write_text_element(
        xml,
        "comunenascita",
        comune_if_italian(record, FieldId::BirthComune, FieldId::BirthCountry),
    )?;
    write_text_element(xml, "tipoturismo", record.trimmed(FieldId::TourismType))?;
    write_text_element(xml, "mezzotrasporto", record.trimmed(FieldId::TransportMode))?;
    for unused in [
        "canaleprenotazione",
        "titolostudio",
        "professione",
        "esenzioneimposta",
    ] {
        write_text_element(xml, unused, "")?;
    }
    end(xml, "arrivo")
}

fn write_departure<W: Write>(xml: &mut Writer<W>, record: &Record) -> Result<()> {
    start(xml, "partenza")?;
    write_text_element(xml, "idswh", record.operation_id())?;
    write_text_element(xml, "tipoalloggiato", record.trimmed(FieldId::GuestType))?;
    write_text_element(xml, "arrivo", &compact_date(record, FieldId::ArrivalDate))?;
    end(xml, "partenza")
}
