//! ROSS 1000 fixed-width format reader and writer.
//!
//! Each record is one 328-byte ASCII line made of 26 positional
//! fields, terminated by CR+LF.
//!
//! # Example
//!
//! ```
//! use ross_codec::{decode, encode};
//! use ross_model::{FieldId, Record};
//!
//! let record = Record::blank().with(FieldId::GuestType, "16");
//! let line = encode(&record);
//! assert_eq!(line.len(), ross_model::RECORD_LENGTH);
//! assert_eq!(decode(&line), record);
//! ```

mod error;
pub mod reader;
pub mod text;
pub mod writer;

pub use error::{CodecError, Result};
pub use reader::{decode, decode_bytes, decode_text, fill_unspecified_defaults};
pub use text::{LineEnding, TERMINATOR, detect_line_ending, is_ascii_only, parse};
pub use writer::{RecordWriter, encode, encode_records, fit, write_records};
