//! User entity for registered Matchday accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular account
    User,
    /// Administrative account, may trigger key rotation
    Admin,
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address, unique across accounts
    pub email: String,

    /// Optional display name
    pub fullname: Option<String>,

    /// bcrypt hash of the password
    pub password_hash: String,

    /// Whether the email address has been confirmed
    pub is_verified: bool,

    /// Account role
    pub role: UserRole,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unverified user with the regular role
    pub fn new(email: String, password_hash: String, fullname: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            fullname,
            password_hash,
            is_verified: false,
            role: UserRole::User,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the user as verified
    pub fn verify(&mut self) {
        self.is_verified = true;
        self.updated_at = Utc::now();
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// The outcome of a successful guard resolution.
///
/// Computed per request from the user store and never cached across
/// requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub user_id: Uuid,
    pub is_verified: bool,
    pub role: UserRole,
}

impl VerifiedIdentity {
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            is_verified: user.is_verified,
            role: user.role,
        }
    }
}
