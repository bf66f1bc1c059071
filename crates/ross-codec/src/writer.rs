//! Fixed-width record writer.

use std::io::{BufWriter, Write};

use ross_model::{FieldId, Record};

use crate::error::Result;
use crate::text::TERMINATOR;

/// Fit a value to the declared width of a field, measured in bytes.
///
/// A value that already has the declared width is kept as is. Anything else
/// is trimmed, truncated at the last whole character that fits and padded
/// with spaces (on the left for right-aligned fields, on the right
/// otherwise), so the result is always exactly `width` bytes.
pub fn fit(id: FieldId, value: &str) -> String {
    let width = id.width();
    if value.len() == width {
        return value.to_string();
    }
    let mut clean = String::with_capacity(width);
    for c in value.trim().chars() {
        if clean.len() + c.len_utf8() > width {
            break;
        }
        clean.push(c);
    }
    let padding = " ".repeat(width - clean.len());
    if id.pads_left() {
        padding + &clean
    } else {
        clean + &padding
    }
}

/// Serialize a record into a 328-byte line, terminator excluded.
pub fn encode(record: &Record) -> String {
    record.iter().map(|(id, value)| fit(id, value)).collect()
}

/// Serialize records, each followed by CR+LF.
pub fn encode_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&encode(record));
        out.push_str(TERMINATOR);
    }
    out
}

/// Streaming fixed-width writer.
pub struct RecordWriter<W: Write> {
    writer: BufWriter<W>,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            written: 0,
        }
    }

    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        self.writer.write_all(encode(record).as_bytes())?;
        self.writer.write_all(TERMINATOR.as_bytes())?;
        self.written += 1;
        Ok(())
    }

    /// Flush and return the number of records written.
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.written)
    }
}

/// Write all records to `writer`.
pub fn write_records<'a, W: Write>(
    writer: W,
    records: impl IntoIterator<Item = &'a Record>,
) -> Result<usize> {
    let mut out = RecordWriter::new(writer);
    for record in records {
        out.write_record(record)?;
    }
    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_accommodation_fields_align_right() {
        assert_eq!(fit(FieldId::RoomsOccupied, "1"), "  1");
        assert_eq!(fit(FieldId::BedsAvailable, "12"), "  12");
        assert_eq!(fit(FieldId::BirthComune, "54032"), "    54032");
        assert_eq!(fit(FieldId::GuestType, "16"), "16");
    }

    #[test]
    fn alphanumeric_fields_align_left() {
        assert_eq!(fit(FieldId::OperationId, " POS1 "), "POS1      ");
        assert_eq!(fit(FieldId::BirthProvince, "R"), "R ");
    }

    #[test]
    fn overlong_values_are_truncated() {
        assert_eq!(fit(FieldId::BirthProvince, "ROMA"), "RO");
        assert_eq!(fit(FieldId::RoomsOccupied, "12345"), "123");
    }

    #[test]
    fn widths_are_counted_in_bytes() {
        let surname = fit(FieldId::Surname, "Niccolò");
        assert_eq!(surname.len(), 50);
        assert!(surname.starts_with("Niccolò "));
        // "È" takes two bytes and no longer fits.
        assert_eq!(fit(FieldId::BirthProvince, "RÈ"), "R ");
        assert_eq!(fit(FieldId::RoomsOccupied, "ÈÈ"), " È");
    }

    #[test]
    fn exact_width_values_are_kept() {
        assert_eq!(fit(FieldId::RoomsOccupied, "1  "), "1  ");
    }

    #[test]
    fn writer_counts_records() {
        let mut buffer = Vec::new();
        let records = vec![Record::blank(), Record::blank()];
        let written = write_records(&mut buffer, &records).unwrap();
        assert_eq!(written, 2);
        assert_eq!(buffer.len(), 2 * (ross_model::RECORD_LENGTH + 2));
    }
}
