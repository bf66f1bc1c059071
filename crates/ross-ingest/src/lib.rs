//! Loading ROSS 1000 input from disk.
//!
//! Fixed-width text files are read as UTF-8 and handed to the codec
//! untouched, so line-ending checks still see the original terminators.
//! Movement XML documents can be turned back into records.

mod error;
pub mod text;
pub mod xml;

pub use error::{IngestError, Result};
pub use text::{read_records_file, read_text_file};
pub use xml::{parse_movements_xml, read_movements_file};
