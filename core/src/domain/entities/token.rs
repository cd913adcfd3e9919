//! Token entities for asymmetrically signed authentication tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two classes of token the subsystem issues.
///
/// Access tokens are short-lived and stateless; refresh tokens are
/// long-lived and mirrored in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    Access,
    Refresh,
}

impl TokenClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenClass::Access => "access",
            TokenClass::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims structure carried by every signed token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Token class
    #[serde(rename = "type")]
    pub token_class: TokenClass,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims for a token of the given class
    pub fn new(user_id: Uuid, token_class: TokenClass, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: user_id.to_string(),
            token_class,
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Refresh token record mirrored in the ledger.
///
/// At most one live record exists per user; issuing a new refresh token
/// overwrites the previous record for that user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    /// User this token belongs to (unique per user)
    pub user_id: Uuid,

    /// The signed token string (unique)
    pub token: String,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Creates a new refresh token record
    pub fn new(user_id: Uuid, token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            token,
            created_at: Utc::now(),
            expires_at,
        }
    }

    /// Checks if the record has passed its expiry
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// A record is live while its expiry lies in the future.
    ///
    /// Expired rows may linger until garbage-collected; they are never
    /// considered valid.
    pub fn is_live(&self) -> bool {
        !self.is_expired()
    }
}

/// Token pair returned to the client on login or registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Signed refresh token
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}
