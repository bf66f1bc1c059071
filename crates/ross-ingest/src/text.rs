//! Fixed-width text files.

use std::path::Path;

use ross_codec::{CodecError, decode_bytes};
use ross_model::{ParseOptions, Record};
use tracing::debug;

use crate::error::{IngestError, Result};

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::file_read(path, e))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read input file");
    Ok(bytes)
}

fn decode_error(path: &Path, source: CodecError) -> IngestError {
    IngestError::Decode {
        path: path.to_path_buf(),
        source,
    }
}

/// Read a file as UTF-8 text, keeping line terminators untouched.
pub fn read_text_file(path: &Path) -> Result<String> {
    let bytes = read_bytes(path)?;
    String::from_utf8(bytes).map_err(|e| decode_error(path, CodecError::from(e.utf8_error())))
}

/// Read and decode every record of a fixed-width file.
pub fn read_records_file(path: &Path, options: ParseOptions) -> Result<Vec<Record>> {
    let bytes = read_bytes(path)?;
    decode_bytes(&bytes, options).map_err(|e| decode_error(path, e))
}
