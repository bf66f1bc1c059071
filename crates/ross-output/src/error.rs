use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("generated XML is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::string::FromUtf8Error),

    #[error("invalid submission: {0}")]
    InvalidSubmission(String),

    #[error("submission gateway failed: {0}")]
    Gateway(String),
}

impl OutputError {
    pub fn invalid_submission(message: impl Into<String>) -> Self {
        Self::InvalidSubmission(message.into())
    }

    pub fn gateway(message: impl Into<String>) -> Self {
        Self::Gateway(message.into())
    }
}

pub type Result<T> = std::result::Result<T, OutputError>;
