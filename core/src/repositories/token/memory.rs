//! In-memory ledger used by tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

use super::r#trait::RefreshTokenRepository;

/// Ledger backed by a map keyed by user id.
///
/// The single write lock gives the same per-user upsert atomicity the
/// database implementation gets from its native insert-or-replace.
#[derive(Clone, Default)]
pub struct InMemoryRefreshTokenRepository {
    records: Arc<RwLock<HashMap<Uuid, RefreshTokenRecord>>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn upsert(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, DomainError> {
        let mut records = self.records.write().await;
        records.insert(record.user_id, record.clone());
        Ok(record)
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(&user_id).cloned())
    }

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.values().find(|r| r.token == token).cloned())
    }

    async fn delete(&self, token: &str) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records.retain(|_, r| r.token != token);
        Ok(())
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let initial = records.len();
        records.retain(|_, r| r.is_live());
        Ok(initial - records.len())
    }
}
