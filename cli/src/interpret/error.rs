use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InterpretError {
    #[error("invalid forecast input: {0}")]
    InvalidInput(String),
}

impl InterpretError {
    pub fn invalid(message: impl Into<String>) -> Self {
        InterpretError::InvalidInput(message.into())
    }
}
