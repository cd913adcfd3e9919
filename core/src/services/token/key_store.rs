//! ES256 key management for token signing and verification.
//!
//! The store holds the current signing pair for each token class and, after
//! a rotation, the previous public key for verification only. Readers take
//! a snapshot of the whole set, so a rotation in flight is never observed
//! half-applied.

use std::sync::Arc;

use jsonwebtoken::{DecodingKey, EncodingKey};
use p256::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rand::rngs::OsRng;
use tokio::sync::{Mutex, RwLock};

use crate::domain::entities::keys::{KeyMaterial, KeyPairPem};
use crate::domain::entities::token::TokenClass;
use crate::errors::DomainError;
use crate::repositories::keys::KeyMaterialRepository;

/// Parsed keys for one token class, verification candidates in priority
/// order (current first).
struct KeySlot {
    signing: EncodingKey,
    verification: Vec<DecodingKey>,
}

impl KeySlot {
    fn parse(
        private_pem: &str,
        public_pem: &str,
        previous_public_pem: Option<&str>,
    ) -> Result<Self, DomainError> {
        let signing = EncodingKey::from_ec_pem(private_pem.as_bytes())
            .map_err(|e| DomainError::internal(format!("invalid private key material: {}", e)))?;

        let mut verification = vec![DecodingKey::from_ec_pem(public_pem.as_bytes())
            .map_err(|e| DomainError::internal(format!("invalid public key material: {}", e)))?];
        if let Some(pem) = previous_public_pem {
            verification.push(DecodingKey::from_ec_pem(pem.as_bytes()).map_err(|e| {
                DomainError::internal(format!("invalid previous public key material: {}", e))
            })?);
        }

        Ok(Self {
            signing,
            verification,
        })
    }
}

/// One immutable generation of the full key set.
struct KeySet {
    material: KeyMaterial,
    access: KeySlot,
    refresh: KeySlot,
}

impl KeySet {
    fn from_material(material: KeyMaterial) -> Result<Self, DomainError> {
        let access = KeySlot::parse(
            &material.access_private_pem,
            &material.access_public_pem,
            material.previous_access_public_pem.as_deref(),
        )?;
        let refresh = KeySlot::parse(
            &material.refresh_private_pem,
            &material.refresh_public_pem,
            material.previous_refresh_public_pem.as_deref(),
        )?;
        Ok(Self {
            material,
            access,
            refresh,
        })
    }

    fn slot(&self, class: TokenClass) -> &KeySlot {
        match class {
            TokenClass::Access => &self.access,
            TokenClass::Refresh => &self.refresh,
        }
    }
}

/// Process-wide store of signing and verification key material.
///
/// Reads vastly outnumber writes: every request verifies against the
/// current snapshot, while rotation is an infrequent administrative
/// operation that replaces the snapshot wholesale.
pub struct KeyStore {
    keys: RwLock<Arc<KeySet>>,
    // Serializes rotations without blocking readers for their duration.
    rotation: Mutex<()>,
    repository: Arc<dyn KeyMaterialRepository>,
}

impl KeyStore {
    /// Builds a store from already-persisted material.
    pub fn new(
        material: KeyMaterial,
        repository: Arc<dyn KeyMaterialRepository>,
    ) -> Result<Self, DomainError> {
        let keys = KeySet::from_material(material)?;
        Ok(Self {
            keys: RwLock::new(Arc::new(keys)),
            rotation: Mutex::new(()),
            repository,
        })
    }

    /// Loads persisted material, generating and persisting a first
    /// generation if none exists yet.
    pub async fn load_or_init(
        repository: Arc<dyn KeyMaterialRepository>,
    ) -> Result<Self, DomainError> {
        let material = match repository.load().await? {
            Some(material) => material,
            None => {
                let material =
                    KeyMaterial::initial(generate_es256_pair()?, generate_es256_pair()?);
                repository.save(&material).await?;
                tracing::info!("generated initial signing key material");
                material
            }
        };
        Self::new(material, repository)
    }

    /// Current private key for the class. Signing always uses the current
    /// generation, never a previous one.
    pub async fn signing_key(&self, class: TokenClass) -> EncodingKey {
        self.keys.read().await.slot(class).signing.clone()
    }

    /// Verification candidates for the class: the current public key and,
    /// if a rotation has happened, the previous one, in that order.
    pub async fn verification_keys(&self, class: TokenClass) -> Vec<DecodingKey> {
        self.keys.read().await.slot(class).verification.clone()
    }

    /// Rotates both classes: fresh pairs become current, the old current
    /// public keys are kept for verification, anything older is discarded.
    ///
    /// All-or-nothing: the new material is generated and parsed up front,
    /// persisted, and only then swapped in. Any failure leaves the previous
    /// state untouched, in memory and on disk.
    pub async fn rotate(&self) -> Result<(), DomainError> {
        let _exclusive = self.rotation.lock().await;

        let access = generate_es256_pair()?;
        let refresh = generate_es256_pair()?;

        let current = Arc::clone(&*self.keys.read().await);
        let next = Arc::new(KeySet::from_material(
            current.material.rotated(access, refresh),
        )?);

        self.repository.save(&next.material).await?;
        *self.keys.write().await = next;

        tracing::info!("rotated signing keys for both token classes");
        Ok(())
    }
}

/// Generates a fresh P-256 pair, PEM-encoded for the JWT layer.
pub fn generate_es256_pair() -> Result<KeyPairPem, DomainError> {
    let secret = p256::SecretKey::random(&mut OsRng);

    let private_pem = secret
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| DomainError::internal(format!("key generation failed: {}", e)))?
        .to_string();
    let public_pem = secret
        .public_key()
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| DomainError::internal(format!("key generation failed: {}", e)))?;

    Ok(KeyPairPem {
        private_pem,
        public_pem,
    })
}
