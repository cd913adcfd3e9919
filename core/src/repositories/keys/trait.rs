//! Persistence contract for signing key material.

use async_trait::async_trait;

use crate::domain::entities::keys::KeyMaterial;
use crate::errors::DomainError;

/// Durable storage for the key configuration blob.
///
/// `save` must replace the whole blob atomically; a reader must never
/// observe a mix of old and new generations.
#[async_trait]
pub trait KeyMaterialRepository: Send + Sync {
    /// Load the persisted material, or None if none has been written yet.
    async fn load(&self) -> Result<Option<KeyMaterial>, DomainError>;

    /// Atomically replace the persisted material.
    async fn save(&self, material: &KeyMaterial) -> Result<(), DomainError>;
}
