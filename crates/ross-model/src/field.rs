//! The ROSS 1000 field catalog.
//!
//! Every record is 328 bytes split into 26 positional fields:
//!
//! | Order | Offset | Width | Field                            |
//! |-------|--------|-------|----------------------------------|
//! | 1     | 0      | 2     | Tipo Alloggiato                  |
//! | 2     | 2      | 10    | Data Arrivo                      |
//! | 3     | 12     | 50    | Cognome                          |
//! | 4     | 62     | 30    | Nome                             |
//! | 5     | 92     | 1     | Sesso                            |
//! | 6     | 93     | 10    | Data Nascita                     |
//! | 7     | 103    | 9     | Comune Nascita                   |
//! | 8     | 112    | 2     | Provincia Nascita                |
//! | 9     | 114    | 9     | Stato Nascita                    |
//! | 10    | 123    | 9     | Cittadinanza                     |
//! | 11    | 132    | 9     | Comune Residenza                 |
//! | 12    | 141    | 2     | Provincia Residenza              |
//! | 13    | 143    | 9     | Stato Residenza                  |
//! | 14    | 152    | 50    | Indirizzo                        |
//! | 15    | 202    | 5     | Tipo Documento                   |
//! | 16    | 207    | 20    | Numero Documento                 |
//! | 17    | 227    | 9     | Luogo Rilascio Documento         |
//! | 18    | 236    | 10    | Data Partenza                    |
//! | 19    | 246    | 30    | Tipo Turismo                     |
//! | 20    | 276    | 30    | Mezzo Trasporto                  |
//! | 21    | 306    | 3     | Camere Occupate                  |
//! | 22    | 309    | 3     | Camere Disponibili               |
//! | 23    | 312    | 4     | Letti Disponibili                |
//! | 24    | 316    | 1     | Tassa Soggiorno                  |
//! | 25    | 317    | 10    | Codice Identificativo Posizione  |
//! | 26    | 327    | 1     | Modalità                         |

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Length of a well-formed record, terminator excluded.
pub const RECORD_LENGTH: usize = 328;

/// Number of positional fields in a record.
pub const FIELD_COUNT: usize = 26;

/// Positional field of a record, numbered 1..=26.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum FieldId {
    GuestType = 1,
    ArrivalDate = 2,
    Surname = 3,
    GivenName = 4,
    Sex = 5,
    BirthDate = 6,
    BirthComune = 7,
    BirthProvince = 8,
    BirthCountry = 9,
    Citizenship = 10,
    ResidenceComune = 11,
    ResidenceProvince = 12,
    ResidenceCountry = 13,
    Address = 14,
    DocumentType = 15,
    DocumentNumber = 16,
    DocumentIssuePlace = 17,
    DepartureDate = 18,
    TourismType = 19,
    TransportMode = 20,
    RoomsOccupied = 21,
    RoomsAvailable = 22,
    BedsAvailable = 23,
    TouristTax = 24,
    OperationId = 25,
    Modality = 26,
}

impl FieldId {
    /// All fields in record order.
    pub const ALL: [FieldId; FIELD_COUNT] = [
        FieldId::GuestType,
        FieldId::ArrivalDate,
        FieldId::Surname,
        FieldId::GivenName,
        FieldId::Sex,
        FieldId::BirthDate,
        FieldId::BirthComune,
        FieldId::BirthProvince,
        FieldId::BirthCountry,
        FieldId::Citizenship,
        FieldId::ResidenceComune,
        FieldId::ResidenceProvince,
        FieldId::ResidenceCountry,
        FieldId::Address,
        FieldId::DocumentType,
        FieldId::DocumentNumber,
        FieldId::DocumentIssuePlace,
        FieldId::DepartureDate,
        FieldId::TourismType,
        FieldId::TransportMode,
        FieldId::RoomsOccupied,
        FieldId::RoomsAvailable,
        FieldId::BedsAvailable,
        FieldId::TouristTax,
        FieldId::OperationId,
        FieldId::Modality,
    ];

    /// The accommodation-count fields (21, 22, 23).
    pub const ACCOMMODATION: [FieldId; 3] = [
        FieldId::RoomsOccupied,
        FieldId::RoomsAvailable,
        FieldId::BedsAvailable,
    ];

    /// 1-based position in the record.
    pub fn order(self) -> u8 {
        self as u8
    }

    /// 0-based index into record storage.
    pub fn index(self) -> usize {
        usize::from(self.order() - 1)
    }

    pub fn from_order(order: u8) -> Option<Self> {
        order
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(usize::from(index)).copied())
    }

    pub fn descriptor(self) -> &'static FieldDescriptor {
        &CATALOG[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn width(self) -> usize {
        self.descriptor().width
    }

    /// Character range occupied by the field within a record.
    pub fn span(self) -> Range<usize> {
        let start: usize = CATALOG[..self.index()].iter().map(|d| d.width).sum();
        start..start + self.width()
    }

    pub fn is_accommodation(self) -> bool {
        Self::ACCOMMODATION.contains(&self)
    }

    /// Whether the serialized value is right-aligned (space padded on the left).
    ///
    /// Numeric fields are, and so are the accommodation counts even though the
    /// catalog types them alphanumeric.
    pub fn pads_left(self) -> bool {
        self.descriptor().kind == ValueKind::Numeric || self.is_accommodation()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.order(), self.name())
    }
}

impl From<FieldId> for u8 {
    fn from(id: FieldId) -> Self {
        id.order()
    }
}

impl TryFrom<u8> for FieldId {
    type Error = ModelError;

    fn try_from(order: u8) -> Result<Self, Self::Error> {
        FieldId::from_order(order).ok_or(ModelError::UnknownField(order))
    }
}

/// Declared character class of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Numeric,
    Alphanumeric,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Numeric => "numeric",
            ValueKind::Alphanumeric => "alphanumeric",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a field must carry a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Requiredness {
    /// Always required.
    Required,
    /// Never required.
    Optional,
    /// Required depending on other fields of the same record.
    Conditional,
}

impl Requiredness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Requiredness::Required => "required",
            Requiredness::Optional => "optional",
            Requiredness::Conditional => "conditional",
        }
    }

    /// Required or conditional.
    pub fn may_require(&self) -> bool {
        !matches!(self, Requiredness::Optional)
    }
}

impl fmt::Display for Requiredness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static description of one positional field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub id: FieldId,
    pub name: &'static str,
    pub width: usize,
    pub kind: ValueKind,
    pub requiredness: Requiredness,
    /// Positional filler that this format never populates; only its width is checked.
    pub must_be_blank: bool,
}

impl FieldDescriptor {
    const fn new(
        id: FieldId,
        name: &'static str,
        width: usize,
        kind: ValueKind,
        requiredness: Requiredness,
    ) -> Self {
        Self {
            id,
            name,
            width,
            kind,
            requiredness,
            must_be_blank: false,
        }
    }

    const fn filler(id: FieldId, name: &'static str, width: usize, kind: ValueKind) -> Self {
        Self {
            id,
            name,
            width,
            kind,
            requiredness: Requiredness::Optional,
            must_be_blank: true,
        }
    }
}

use Requiredness::{Conditional, Optional, Required};
use ValueKind::{Alphanumeric, Numeric};

const FIELDS: [FieldDescriptor; FIELD_COUNT] = [
    FieldDescriptor::new(FieldId::GuestType, "Tipo Alloggiato", 2, Numeric, Required),
    FieldDescriptor::new(FieldId::ArrivalDate, "Data Arrivo", 10, Alphanumeric, Required),
    FieldDescriptor::filler(FieldId::Surname, "Cognome", 50, Alphanumeric),
    FieldDescriptor::filler(FieldId::GivenName, "Nome", 30, Alphanumeric),
    FieldDescriptor::new(FieldId::Sex, "Sesso", 1, Numeric, Required),
    FieldDescriptor::new(FieldId::BirthDate, "Data Nascita", 10, Alphanumeric, Required),
    FieldDescriptor::new(FieldId::BirthComune, "Comune Nascita", 9, Numeric, Optional),
    FieldDescriptor::new(FieldId::BirthProvince, "Provincia Nascita", 2, Alphanumeric, Optional),
    FieldDescriptor::new(FieldId::BirthCountry, "Stato Nascita", 9, Numeric, Required),
    FieldDescriptor::new(FieldId::Citizenship, "Cittadinanza", 9, Numeric, Required),
    FieldDescriptor::new(FieldId::ResidenceComune, "Comune Residenza", 9, Numeric, Conditional),
    FieldDescriptor::new(
        FieldId::ResidenceProvince,
        "Provincia Residenza",
        2,
        Alphanumeric,
        Conditional,
    ),
    FieldDescriptor::new(FieldId::ResidenceCountry, "Stato Residenza", 9, Numeric, Required),
    FieldDescriptor::filler(FieldId::Address, "Indirizzo", 50, Alphanumeric),
    FieldDescriptor::filler(FieldId::DocumentType, "Tipo Documento", 5, Alphanumeric),
    FieldDescriptor::filler(FieldId::DocumentNumber, "Numero Documento", 20, Alphanumeric),
    FieldDescriptor::filler(FieldId::DocumentIssuePlace, "Luogo Rilascio Documento", 9, Numeric),
    FieldDescriptor::new(FieldId::DepartureDate, "Data Partenza", 10, Alphanumeric, Conditional),
    FieldDescriptor::new(FieldId::TourismType, "Tipo Turismo", 30, Alphanumeric, Required),
    FieldDescriptor::new(FieldId::TransportMode, "Mezzo Trasporto", 30, Alphanumeric, Required),
    FieldDescriptor::new(FieldId::RoomsOccupied, "Camere Occupate", 3, Alphanumeric, Conditional),
    FieldDescriptor::new(
        FieldId::RoomsAvailable,
        "Camere Disponibili",
        3,
        Alphanumeric,
        Conditional,
    ),
    FieldDescriptor::new(FieldId::BedsAvailable, "Letti Disponibili", 4, Alphanumeric, Conditional),
    FieldDescriptor::new(FieldId::TouristTax, "Tassa Soggiorno", 1, Numeric, Optional),
    FieldDescriptor::new(
        FieldId::OperationId,
        "Codice Identificativo Posizione",
        10,
        Alphanumeric,
        Required,
    ),
    FieldDescriptor::new(FieldId::Modality, "Modalità", 1, Numeric, Required),
];

const fn total_width(fields: &[FieldDescriptor]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < fields.len() {
        total += fields[i].width;
        i += 1;
    }
    total
}

const _: () = assert!(total_width(&FIELDS) == RECORD_LENGTH);

/// Field descriptors in record order.
pub static CATALOG: [FieldDescriptor; FIELD_COUNT] = FIELDS;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_in_order() {
        for (index, descriptor) in CATALOG.iter().enumerate() {
            assert_eq!(descriptor.id.index(), index);
        }
    }

    #[test]
    fn spans_are_contiguous() {
        let mut expected_start = 0;
        for id in FieldId::ALL {
            let span = id.span();
            assert_eq!(span.start, expected_start, "{id}");
            expected_start = span.end;
        }
        assert_eq!(expected_start, RECORD_LENGTH);
        assert_eq!(FieldId::Modality.span(), 327..328);
    }

    #[test]
    fn from_order_bounds() {
        assert_eq!(FieldId::from_order(0), None);
        assert_eq!(FieldId::from_order(1), Some(FieldId::GuestType));
        assert_eq!(FieldId::from_order(26), Some(FieldId::Modality));
        assert_eq!(FieldId::from_order(27), None);
    }
}
