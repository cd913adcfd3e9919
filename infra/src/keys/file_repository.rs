//! File-backed key material repository.
//!
//! The material lives in a single JSON document. Saves write a sibling
//! temporary file first and rename it over the target, so a crash mid-write
//! can never leave a half-rotated blob behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use md_core::domain::entities::keys::KeyMaterial;
use md_core::errors::DomainError;
use md_core::repositories::keys::KeyMaterialRepository;

pub struct FileKeyMaterialRepository {
    path: PathBuf,
}

impl FileKeyMaterialRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl KeyMaterialRepository for FileKeyMaterialRepository {
    async fn load(&self) -> Result<Option<KeyMaterial>, DomainError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DomainError::internal(format!(
                    "failed to read key material from {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let material = serde_json::from_slice(&bytes).map_err(|e| {
            DomainError::internal(format!(
                "corrupt key material in {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(Some(material))
    }

    async fn save(&self, material: &KeyMaterial) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    DomainError::internal(format!("failed to create key directory: {}", e))
                })?;
            }
        }

        let json = serde_json::to_vec_pretty(material)
            .map_err(|e| DomainError::internal(format!("failed to encode key material: {}", e)))?;

        let tmp_path = self.path.with_extension("tmp");
        tokio::fs::write(&tmp_path, &json).await.map_err(|e| {
            DomainError::internal(format!("failed to write key material: {}", e))
        })?;
        tokio::fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            DomainError::internal(format!("failed to commit key material: {}", e))
        })?;

        tracing::debug!(path = %self.path.display(), "key material persisted");
        Ok(())
    }
}
