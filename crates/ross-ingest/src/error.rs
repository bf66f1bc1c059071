//! Error types for input loading.

use std::path::PathBuf;

use ross_codec::CodecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("malformed movement XML: {0}")]
    Xml(#[from] quick_xml::de::DeError),

    /// The document has no `movimento` element.
    #[error("no movement found in the XML document")]
    NoMovements,

    /// Movements were present but none produced a record.
    #[error("no record could be built from the XML document")]
    NoRecords,
}

impl IngestError {
    pub(crate) fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::FileNotFound { path };
        }
        Self::FileRead { path, source }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
