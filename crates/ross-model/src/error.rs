use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("field order {0} is outside 1..=26")]
    UnknownField(u8),
    #[error("unknown {kind} code: {value:?}")]
    UnknownCode { kind: &'static str, value: String },
}

impl ModelError {
    pub fn unknown_code(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownCode {
            kind,
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
