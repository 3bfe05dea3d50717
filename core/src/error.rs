//! Error types for workout creation, storage and the application controller.

use thiserror::Error;

/// Rejected form input. Recovered locally: the message is shown to the user
/// and nothing in the collection or in storage changes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("input must be a number")]
    NotANumber { field: &'static str },

    #[error("input must be a positive number")]
    NotPositive { field: &'static str },

    #[error("input must be a whole number")]
    NotWholeNumber { field: &'static str },

    /// Inputs are individually valid but the derived metric overflows.
    #[error("input is out of range")]
    OutOfRange { field: &'static str },

    #[error("unknown workout type: {0}")]
    UnknownVariant(String),
}

impl ValidationError {
    /// Name of the offending form field, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::NotANumber { field }
            | ValidationError::NotPositive { field }
            | ValidationError::NotWholeNumber { field }
            | ValidationError::OutOfRange { field } => Some(field),
            ValidationError::UnknownVariant(_) => None,
        }
    }
}

/// Durable storage failure.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("stored workouts unreadable at {path}: {message}")]
    Unreadable { path: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeolocationError {
    #[error("position unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error at {path}: {message}")]
    Parse { path: String, message: String },
}

/// Error surfaced by the state manager and the application controller.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Could not get the current position")]
    GeolocationUnavailable,

    #[error("no location selected on the map")]
    NoLocationSelected,

    #[error("workout not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, AppError>;
