//! In-memory key material store used by tests.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::keys::KeyMaterial;
use crate::errors::DomainError;

use super::r#trait::KeyMaterialRepository;

#[derive(Clone, Default)]
pub struct InMemoryKeyMaterialRepository {
    slot: Arc<RwLock<Option<KeyMaterial>>>,
}

impl InMemoryKeyMaterialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current persisted blob, if any. Test convenience.
    pub async fn stored(&self) -> Option<KeyMaterial> {
        self.slot.read().await.clone()
    }
}

#[async_trait]
impl KeyMaterialRepository for InMemoryKeyMaterialRepository {
    async fn load(&self) -> Result<Option<KeyMaterial>, DomainError> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, material: &KeyMaterial) -> Result<(), DomainError> {
        *self.slot.write().await = Some(material.clone());
        Ok(())
    }
}
