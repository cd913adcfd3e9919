//! User store trait defining the interface for account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository contract for user accounts.
///
/// The authentication subsystem only reads identity, password hash, and
/// verification state; everything else about an account belongs to the rest
/// of the platform.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// Fails if the email address is already taken.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace the stored password hash
    ///
    /// Returns false if no such user exists.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DomainError>;

    /// Set the verification flag
    ///
    /// Returns false if no such user exists.
    async fn mark_verified(&self, id: Uuid) -> Result<bool, DomainError>;
}
