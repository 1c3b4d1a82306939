//! Application Errors
//!
//! One error type shared by both stores. Only `Validation` is ever returned to
//! a caller; the other kinds are logged or turned into a display message.

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// A required field was empty.
    #[error("{0}")]
    Validation(String),

    /// A referenced list or task id does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The identity endpoint failed or answered with a non-2xx status.
    #[error("{0}")]
    ExternalService(String),

    /// A persisted slot held something that is not valid JSON for its type.
    #[error("Corrupted state in '{key}': {message}")]
    CorruptedState { key: String, message: String },

    /// The durable key-value slot could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ExternalService(err.to_string())
    }
}
