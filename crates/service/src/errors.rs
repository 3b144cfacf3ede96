use std::time::Duration;

use thiserror::Error;

use crate::validate::ValidationError;

/// Coarse classification used by the transport layer to pick a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or non-conforming input (400).
    Client,
    /// Referenced `user_id` does not exist (404).
    NotFound,
    /// Anything unexpected: store failures, timeouts, unparsable envelopes (500).
    Internal,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("User ID is required")]
    MissingId,
    /// Delete issued without a key; reported as a server error.
    #[error("delete key user_id is missing")]
    MissingDeleteKey,
    #[error("User not found!")]
    NotFound,
    #[error("storage error: {0}")]
    Storage(String),
    #[error("storage call timed out after {0:?}")]
    Timeout(Duration),
    #[error("malformed request: {0}")]
    Envelope(String),
}

impl ServiceError {
    pub fn storage(e: impl std::fmt::Display) -> Self {
        Self::Storage(e.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_) | ServiceError::MissingId => ErrorKind::Client,
            ServiceError::NotFound => ErrorKind::NotFound,
            ServiceError::MissingDeleteKey
            | ServiceError::Storage(_)
            | ServiceError::Timeout(_)
            | ServiceError::Envelope(_) => ErrorKind::Internal,
        }
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(ValidationError::EmptyName) => 1001,
            ServiceError::Validation(ValidationError::InvalidMobile) => 1002,
            ServiceError::Validation(ValidationError::InvalidPan) => 1003,
            ServiceError::MissingId => 1004,
            ServiceError::NotFound => 1100,
            ServiceError::Storage(_) => 1200,
            ServiceError::MissingDeleteKey => 1202,
            ServiceError::Timeout(_) => 1201,
            ServiceError::Envelope(_) => 1300,
        }
    }
}
