//! Shared primitives for all Rust crates in GestorQ.

#![forbid(unsafe_code)]

/// Caller identity primitives shared across services.
pub mod auth;

use thiserror::Error;

pub use auth::UserIdentity;

/// Result type used across GestorQ crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state or an in-flight mutation.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Caller is not authenticated.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Caller is authenticated but blocked by access policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Reading from the external record store failed.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Writing to the external record store was rejected or failed.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// The external record store did not answer in time.
    #[error("timeout: {0}")]
    Timeout(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the message carried by the error without its category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message)
            | Self::NotFound(message)
            | Self::Conflict(message)
            | Self::Unauthorized(message)
            | Self::Forbidden(message)
            | Self::Fetch(message)
            | Self::Persistence(message)
            | Self::Timeout(message)
            | Self::Internal(message) => message.as_str(),
        }
    }
}
