//! Key store tests: initialisation, rotation, and the verification window.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::TokenClass;
use crate::errors::{DomainError, TokenError};
use crate::repositories::keys::{InMemoryKeyMaterialRepository, KeyMaterialRepository};
use crate::services::token::codec;
use crate::services::token::KeyStore;

use super::test_key_store;

#[tokio::test]
async fn test_load_or_init_persists_first_generation() {
    let repository = Arc::new(InMemoryKeyMaterialRepository::new());
    let _store = KeyStore::load_or_init(Arc::clone(&repository) as Arc<dyn KeyMaterialRepository>)
        .await
        .unwrap();

    let material = repository.stored().await.expect("material persisted");
    assert!(material.previous_access_public_pem.is_none());
    assert!(material.previous_refresh_public_pem.is_none());
}

#[tokio::test]
async fn test_load_or_init_reuses_persisted_material() {
    let repository = Arc::new(InMemoryKeyMaterialRepository::new());
    let first = KeyStore::load_or_init(Arc::clone(&repository) as Arc<dyn KeyMaterialRepository>)
        .await
        .unwrap();

    // A token signed before a restart still verifies after reload.
    let token = codec::encode_token(
        Uuid::new_v4(),
        TokenClass::Access,
        Utc::now() + Duration::minutes(15),
        &first.signing_key(TokenClass::Access).await,
    )
    .unwrap();

    let reloaded =
        KeyStore::load_or_init(Arc::clone(&repository) as Arc<dyn KeyMaterialRepository>)
            .await
            .unwrap();
    let candidates = reloaded.verification_keys(TokenClass::Access).await;
    assert!(codec::decode_with_candidates(&token, &candidates).is_ok());
}

#[tokio::test]
async fn test_rotation_adds_previous_candidate() {
    let store = test_key_store().await;

    assert_eq!(store.verification_keys(TokenClass::Access).await.len(), 1);
    assert_eq!(store.verification_keys(TokenClass::Refresh).await.len(), 1);

    store.rotate().await.unwrap();

    assert_eq!(store.verification_keys(TokenClass::Access).await.len(), 2);
    assert_eq!(store.verification_keys(TokenClass::Refresh).await.len(), 2);
}

#[tokio::test]
async fn test_rotation_window_is_one_generation() {
    let store = test_key_store().await;

    let token = codec::encode_token(
        Uuid::new_v4(),
        TokenClass::Access,
        Utc::now() + Duration::minutes(15),
        &store.signing_key(TokenClass::Access).await,
    )
    .unwrap();

    // One rotation: the old public key sits in the previous slot.
    store.rotate().await.unwrap();
    let candidates = store.verification_keys(TokenClass::Access).await;
    assert!(codec::decode_with_candidates(&token, &candidates).is_ok());

    // Two rotations: the signing generation is gone entirely.
    store.rotate().await.unwrap();
    let candidates = store.verification_keys(TokenClass::Access).await;
    let err = codec::decode_with_candidates(&token, &candidates).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::TokenInvalid)
    ));
}

#[tokio::test]
async fn test_rotation_persists_demoted_public_key() {
    let repository = Arc::new(InMemoryKeyMaterialRepository::new());
    let store = KeyStore::load_or_init(Arc::clone(&repository) as Arc<dyn KeyMaterialRepository>)
        .await
        .unwrap();

    let before = repository.stored().await.unwrap();
    store.rotate().await.unwrap();
    let after = repository.stored().await.unwrap();

    assert_ne!(after.access_public_pem, before.access_public_pem);
    assert_eq!(
        after.previous_access_public_pem.as_deref(),
        Some(before.access_public_pem.as_str())
    );
    assert_eq!(
        after.previous_refresh_public_pem.as_deref(),
        Some(before.refresh_public_pem.as_str())
    );
}

#[tokio::test]
async fn test_new_tokens_sign_with_rotated_key() {
    let store = test_key_store().await;
    store.rotate().await.unwrap();

    let token = codec::encode_token(
        Uuid::new_v4(),
        TokenClass::Refresh,
        Utc::now() + Duration::days(7),
        &store.signing_key(TokenClass::Refresh).await,
    )
    .unwrap();

    // Signed with current material, so the first candidate verifies it.
    let candidates = store.verification_keys(TokenClass::Refresh).await;
    assert!(codec::decode_token(&token, &candidates[0]).is_ok());
}
