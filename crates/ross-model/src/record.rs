use serde::{Deserialize, Serialize};

use crate::enums::{GuestType, Modality};
use crate::field::{FIELD_COUNT, FieldId};

/// One ROSS 1000 record: the raw value of each of the 26 fields.
///
/// Values are stored exactly as read or assigned, padding included. A value
/// may have the wrong width; the validator reports that rather than the
/// record refusing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    values: [String; FIELD_COUNT],
}

impl Record {
    /// A record with every field empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// A record with every field filled with spaces to its declared width.
    pub fn blank() -> Self {
        Self {
            values: FieldId::ALL.map(|id| " ".repeat(id.width())),
        }
    }

    pub fn from_values(values: [String; FIELD_COUNT]) -> Self {
        Self { values }
    }

    /// Raw value, padding included.
    pub fn get(&self, id: FieldId) -> &str {
        &self.values[id.index()]
    }

    /// Value with surrounding whitespace removed.
    pub fn trimmed(&self, id: FieldId) -> &str {
        self.get(id).trim()
    }

    pub fn is_blank(&self, id: FieldId) -> bool {
        self.trimmed(id).is_empty()
    }

    pub fn set(&mut self, id: FieldId, value: impl Into<String>) {
        self.values[id.index()] = value.into();
    }

    pub fn with(mut self, id: FieldId, value: impl Into<String>) -> Self {
        self.set(id, value);
        self
    }

    pub fn values(&self) -> &[String; FIELD_COUNT] {
        &self.values
    }

    pub fn into_values(self) -> [String; FIELD_COUNT] {
        self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        FieldId::ALL
            .into_iter()
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn guest_type(&self) -> Option<GuestType> {
        self.trimmed(FieldId::GuestType).parse().ok()
    }

    pub fn modality(&self) -> Option<Modality> {
        self.trimmed(FieldId::Modality).parse().ok()
    }

    pub fn operation_id(&self) -> &str {
        self.trimmed(FieldId::OperationId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_record_has_declared_widths() {
        let record = Record::blank();
        for (id, value) in record.iter() {
            assert_eq!(value.len(), id.width(), "{id}");
            assert!(record.is_blank(id));
        }
    }

    #[test]
    fn typed_accessors_use_trimmed_values() {
        let record = Record::blank()
            .with(FieldId::GuestType, "17")
            .with(FieldId::Modality, "2")
            .with(FieldId::OperationId, "POS1      ");
        assert_eq!(record.guest_type(), Some(GuestType::FamilyHead));
        assert_eq!(record.modality(), Some(Modality::Amend));
        assert_eq!(record.operation_id(), "POS1");
        assert_eq!(record.get(FieldId::OperationId), "POS1      ");
    }
}
