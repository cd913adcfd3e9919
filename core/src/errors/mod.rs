//! Domain-specific error types and error handling.

mod types;

pub use types::{AccountError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    /// Infrastructure failure (storage unavailable, I/O error). Distinct
    /// from the authentication-specific kinds so callers can tell "you are
    /// not authenticated" apart from "the system is unavailable".
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Account(#[from] AccountError),
}

impl DomainError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
