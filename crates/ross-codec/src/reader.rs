//! Fixed-width record reader.

use ross_model::{FieldId, ParseOptions, Record, UNSPECIFIED};
use tracing::debug;

use crate::error::Result;
use crate::text::parse;
use crate::writer::fit;

/// Slice one line into a record.
///
/// Fields are cut at cumulative byte offsets taken from the catalog.
/// Nothing is trimmed. When the line is too short the affected fields come
/// out shorter than declared (possibly empty), which the validator reports
/// as length errors. A cut through a multi-byte character leaves U+FFFD in
/// both neighbouring fields.
pub fn decode(line: &str) -> Record {
    let bytes = line.as_bytes();
    let mut record = Record::new();
    let mut position = 0;
    for id in FieldId::ALL {
        let start = position.min(bytes.len());
        let end = (position + id.width()).min(bytes.len());
        record.set(id, String::from_utf8_lossy(&bytes[start..end]).into_owned());
        position += id.width();
    }
    record
}

/// Fill empty tourism type and transport mode with `Non Specificato`.
///
/// Returns whether anything changed.
pub fn fill_unspecified_defaults(record: &mut Record) -> bool {
    let mut changed = false;
    for id in [FieldId::TourismType, FieldId::TransportMode] {
        if record.is_blank(id) {
            record.set(id, fit(id, UNSPECIFIED));
            changed = true;
        }
    }
    changed
}

/// Split a text block into lines and decode each of them.
pub fn decode_text(text: &str, options: ParseOptions) -> Vec<Record> {
    parse(text)
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            let mut record = decode(line);
            if options.fill_unspecified_defaults && fill_unspecified_defaults(&mut record) {
                debug!(line = index + 1, "filled unspecified tourism/transport defaults");
            }
            record
        })
        .collect()
}

/// Decode raw bytes, rejecting input that is not UTF-8.
pub fn decode_bytes(bytes: &[u8], options: ParseOptions) -> Result<Vec<Record>> {
    let text = std::str::from_utf8(bytes)?;
    Ok(decode_text(text, options))
}
