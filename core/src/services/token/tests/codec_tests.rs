//! Codec tests: pure sign and verify behaviour.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey};
use uuid::Uuid;

use crate::domain::entities::token::TokenClass;
use crate::errors::{DomainError, TokenError};
use crate::services::token::codec;
use crate::services::token::key_store::generate_es256_pair;

fn keys() -> (EncodingKey, DecodingKey) {
    let pair = generate_es256_pair().unwrap();
    (
        EncodingKey::from_ec_pem(pair.private_pem.as_bytes()).unwrap(),
        DecodingKey::from_ec_pem(pair.public_pem.as_bytes()).unwrap(),
    )
}

#[test]
fn test_encode_decode_round_trip() {
    let (signing, verification) = keys();
    let user_id = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::minutes(15);

    let token = codec::encode_token(user_id, TokenClass::Access, expires_at, &signing).unwrap();
    let claims = codec::decode_token(&token, &verification).unwrap();

    assert_eq!(claims.user_id().unwrap(), user_id);
    assert_eq!(claims.token_class, TokenClass::Access);
    assert_eq!(claims.exp, expires_at.timestamp());
}

#[test]
fn test_decode_rejects_wrong_key() {
    let (signing, _) = keys();
    let (_, other_verification) = keys();

    let token = codec::encode_token(
        Uuid::new_v4(),
        TokenClass::Access,
        Utc::now() + Duration::minutes(15),
        &signing,
    )
    .unwrap();

    let err = codec::decode_token(&token, &other_verification).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::TokenInvalid)
    ));
}

#[test]
fn test_decode_distinguishes_expiry_from_invalidity() {
    let (signing, verification) = keys();

    let token = codec::encode_token(
        Uuid::new_v4(),
        TokenClass::Access,
        Utc::now() - Duration::minutes(16),
        &signing,
    )
    .unwrap();

    let err = codec::decode_token(&token, &verification).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::TokenExpired)
    ));
}

#[test]
fn test_decode_rejects_garbage() {
    let (_, verification) = keys();
    let err = codec::decode_token("not-a-token", &verification).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::TokenInvalid)
    ));
}

#[test]
fn test_candidates_tried_in_order_until_success() {
    let (old_signing, old_verification) = keys();
    let (_, new_verification) = keys();

    let token = codec::encode_token(
        Uuid::new_v4(),
        TokenClass::Refresh,
        Utc::now() + Duration::days(7),
        &old_signing,
    )
    .unwrap();

    // Current key first, previous second: still verifies.
    let claims =
        codec::decode_with_candidates(&token, &[new_verification.clone(), old_verification])
            .unwrap();
    assert_eq!(claims.token_class, TokenClass::Refresh);

    // With only the new key the signature no longer matches anything.
    let err = codec::decode_with_candidates(&token, &[new_verification]).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::TokenInvalid)
    ));
}

#[test]
fn test_candidates_expired_token_fails_even_with_right_key() {
    let (signing, verification) = keys();
    let (_, other_verification) = keys();

    let token = codec::encode_token(
        Uuid::new_v4(),
        TokenClass::Access,
        Utc::now() - Duration::minutes(1),
        &signing,
    )
    .unwrap();

    let err =
        codec::decode_with_candidates(&token, &[other_verification, verification]).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::TokenExpired)
    ));
}

#[test]
fn test_no_candidates_means_invalid() {
    let (signing, _) = keys();
    let token = codec::encode_token(
        Uuid::new_v4(),
        TokenClass::Access,
        Utc::now() + Duration::minutes(15),
        &signing,
    )
    .unwrap();

    let err = codec::decode_with_candidates(&token, &[]).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::TokenInvalid)
    ));
}
