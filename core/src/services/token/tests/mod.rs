//! Unit tests for the token subsystem.

mod codec_tests;
mod key_store_tests;

use std::sync::Arc;

use crate::repositories::keys::InMemoryKeyMaterialRepository;
use crate::repositories::token::InMemoryRefreshTokenRepository;
use crate::services::token::{KeyStore, TokenConfig, TokenService};

/// Key store over an in-memory blob, first generation freshly minted.
async fn test_key_store() -> Arc<KeyStore> {
    let repository = Arc::new(InMemoryKeyMaterialRepository::new());
    Arc::new(
        KeyStore::load_or_init(repository)
            .await
            .expect("key store init"),
    )
}

/// Token service sharing its ledger handle with the test.
async fn test_service() -> (
    TokenService<InMemoryRefreshTokenRepository>,
    InMemoryRefreshTokenRepository,
    Arc<KeyStore>,
) {
    let ledger = InMemoryRefreshTokenRepository::new();
    let keys = test_key_store().await;
    let service = TokenService::new(ledger.clone(), Arc::clone(&keys), TokenConfig::default());
    (service, ledger, keys)
}
