//! Ledger trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

/// Durable ledger of live refresh tokens, one row per user.
///
/// The ledger is the single source of truth for refresh token liveness:
/// validity is computed here and nowhere else. Implementations must make
/// `upsert` atomic with respect to concurrent calls for the same user, using
/// the storage layer's native insert-or-replace primitive rather than a
/// separate read-then-write pair.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Insert-or-replace the record keyed by its user id.
    ///
    /// Two concurrent upserts for the same user must leave exactly one final
    /// row; the last writer wins and the earlier token silently becomes
    /// invalid.
    async fn upsert(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, DomainError>;

    /// Find the record for a user, expired or not.
    async fn find_by_user(&self, user_id: Uuid)
        -> Result<Option<RefreshTokenRecord>, DomainError>;

    /// Find a record by its token string, expired or not.
    async fn find_by_token(&self, token: &str)
        -> Result<Option<RefreshTokenRecord>, DomainError>;

    /// Delete the record holding this token string.
    ///
    /// Idempotent; deleting a token that was never issued is not an error.
    async fn delete(&self, token: &str) -> Result<(), DomainError>;

    /// Remove rows whose expiry has passed.
    ///
    /// Expired rows are already invalid; this only reclaims storage.
    async fn delete_expired(&self) -> Result<usize, DomainError>;

    /// True iff a record exists for this token string and its expiry is in
    /// the future. An expired row that has not been garbage-collected yet is
    /// not valid.
    async fn is_valid(&self, token: &str) -> Result<bool, DomainError> {
        match self.find_by_token(token).await? {
            Some(record) => Ok(record.is_live()),
            None => Ok(false),
        }
    }
}
