//! Common error types for intake components.

use thiserror::Error;

/// Common errors across intake components
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Employee store connection/operation error
    #[error("Store error: {0}")]
    Store(String),

    /// Invalid input/request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntakeError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Config(_) => 500,
            Self::Store(_) => 503,
            Self::InvalidInput(_) => 400,
            Self::NotFound(_) => 404,
            Self::Internal(_) => 500,
        }
    }
}
