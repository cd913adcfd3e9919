//! Error type definitions for token and account operations.
//!
//! Every variant is a terminal, user-visible failure. The transport layer
//! maps each kind to a status code; nothing in here is retried internally.

use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// No credential was presented at all
    #[error("Token is missing")]
    TokenMissing,

    /// Malformed token or bad signature against every candidate key
    #[error("Token is invalid")]
    TokenInvalid,

    /// Signature verified but the expiry has passed
    #[error("Token is expired")]
    TokenExpired,

    /// Refresh token is absent from the ledger, expired, or tampered with
    #[error("Refresh token is invalid or expired")]
    RefreshTokenInvalid,
}

/// Account-related errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountError {
    #[error("User does not exist")]
    UserNotExist,

    #[error("User is not verified")]
    UserNotVerified,

    #[error("User is already verified")]
    UserAlreadyVerified,

    #[error("Access to this resource is forbidden")]
    ForbiddenAccess,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,
}
