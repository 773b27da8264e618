use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Duplicate serial number: {0}")]
    DuplicateSerialNumber(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Item not available: {0}")]
    ItemNotAvailable(String),

    #[error("Loan already returned: {0}")]
    AlreadyReturned(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Concurrent modification: {0}")]
    Conflict(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::StoreUnavailable(format!("I/O failure: {}", err))
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
