use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("input is not valid UTF-8 (first invalid byte at offset {offset})")]
    NotUtf8 { offset: usize },
}

impl From<std::str::Utf8Error> for CodecError {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::NotUtf8 {
            offset: e.valid_up_to(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
