//! Error types for the transaction handler
//!
//! Rule violations are never errors; they surface as
//! [`ValidationResult::Invalid`](crate::types::ValidationResult). These
//! variants cover the infrastructure around the core.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HandlerError>;
