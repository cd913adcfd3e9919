//! Guard tests: credential resolution and transparent renewal.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::TokenClass;
use crate::domain::entities::user::{User, UserRole};
use crate::errors::{AccountError, DomainError, TokenError};
use crate::repositories::keys::InMemoryKeyMaterialRepository;
use crate::repositories::token::{InMemoryRefreshTokenRepository, RefreshTokenRepository};
use crate::repositories::user::InMemoryUserRepository;
use crate::services::auth::{AccessPolicy, AuthGuard, CredentialPair, IdentityResolver};
use crate::services::token::{codec, KeyStore, TokenConfig, TokenService};

struct Fixture {
    guard: AuthGuard<InMemoryRefreshTokenRepository, InMemoryUserRepository>,
    tokens: Arc<TokenService<InMemoryRefreshTokenRepository>>,
    ledger: InMemoryRefreshTokenRepository,
    users: InMemoryUserRepository,
    keys: Arc<KeyStore>,
}

async fn fixture() -> Fixture {
    let ledger = InMemoryRefreshTokenRepository::new();
    let users = InMemoryUserRepository::new();
    let keys = Arc::new(
        KeyStore::load_or_init(Arc::new(InMemoryKeyMaterialRepository::new()))
            .await
            .unwrap(),
    );
    let tokens = Arc::new(TokenService::new(
        ledger.clone(),
        Arc::clone(&keys),
        TokenConfig::default(),
    ));
    let guard = AuthGuard::new(Arc::clone(&tokens), Arc::new(users.clone()));
    Fixture {
        guard,
        tokens,
        ledger,
        users,
        keys,
    }
}

async fn seed_user(fixture: &Fixture, verified: bool, role: UserRole) -> User {
    let mut user = User::new("player@example.com".to_string(), "hash".to_string(), None);
    user.is_verified = verified;
    user.role = role;
    fixture.users.insert(user.clone()).await;
    user
}

/// An access token whose expiry already passed, signed with current keys.
async fn expired_access_token(fixture: &Fixture, user_id: Uuid) -> String {
    codec::encode_token(
        user_id,
        TokenClass::Access,
        Utc::now() - Duration::minutes(1),
        &fixture.keys.signing_key(TokenClass::Access).await,
    )
    .unwrap()
}

fn credentials(access: Option<String>, refresh: Option<String>) -> CredentialPair {
    CredentialPair {
        access_token: access,
        refresh_token: refresh,
    }
}

#[tokio::test]
async fn test_valid_access_token_resolves_directly() {
    let fixture = fixture().await;
    let user = seed_user(&fixture, true, UserRole::User).await;
    let pair = fixture.tokens.issue_token_pair(user.id).await.unwrap();

    let resolution = fixture
        .guard
        .resolve(
            credentials(Some(pair.access_token), Some(pair.refresh_token)),
            AccessPolicy::Authenticated,
        )
        .await
        .unwrap();

    assert_eq!(resolution.identity.user_id, user.id);
    assert!(resolution.renewed_access_token.is_none());
}

#[tokio::test]
async fn test_expired_access_heals_through_refresh_token() {
    let fixture = fixture().await;
    let user = seed_user(&fixture, true, UserRole::User).await;
    let pair = fixture.tokens.issue_token_pair(user.id).await.unwrap();
    let stale_access = expired_access_token(&fixture, user.id).await;

    let before = fixture.ledger.find_by_user(user.id).await.unwrap().unwrap();
    let resolution = fixture
        .guard
        .resolve(
            credentials(Some(stale_access), Some(pair.refresh_token)),
            AccessPolicy::Authenticated,
        )
        .await
        .unwrap();

    assert_eq!(resolution.identity.user_id, user.id);

    // A replacement access token was minted and verifies.
    let renewed = resolution.renewed_access_token.expect("renewed token");
    let claims = fixture.tokens.verify_access_token(&renewed).await.unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);

    // The refresh row was not rotated by renewal.
    let after = fixture.ledger.find_by_user(user.id).await.unwrap().unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_both_tokens_expired_fails_refresh_invalid() {
    let fixture = fixture().await;
    let user = seed_user(&fixture, true, UserRole::User).await;

    // Refresh row present but past its expiry, as after a long absence.
    let expires_at = Utc::now() - Duration::minutes(5);
    let refresh_token = codec::encode_token(
        user.id,
        TokenClass::Refresh,
        expires_at,
        &fixture.keys.signing_key(TokenClass::Refresh).await,
    )
    .unwrap();
    fixture
        .ledger
        .upsert(crate::domain::entities::token::RefreshTokenRecord::new(
            user.id,
            refresh_token.clone(),
            expires_at,
        ))
        .await
        .unwrap();

    let stale_access = expired_access_token(&fixture, user.id).await;
    let err = fixture
        .guard
        .resolve(
            credentials(Some(stale_access), Some(refresh_token)),
            AccessPolicy::Authenticated,
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::Token(TokenError::RefreshTokenInvalid)
    ));
}

#[tokio::test]
async fn test_no_credentials_fails_token_missing() {
    let fixture = fixture().await;

    let err = fixture
        .guard
        .resolve(credentials(None, None), AccessPolicy::Authenticated)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::TokenMissing)
    ));
}

#[tokio::test]
async fn test_expired_access_without_refresh_fails_token_missing() {
    let fixture = fixture().await;
    let user = seed_user(&fixture, true, UserRole::User).await;
    let stale_access = expired_access_token(&fixture, user.id).await;

    let err = fixture
        .guard
        .resolve(
            credentials(Some(stale_access), None),
            AccessPolicy::Authenticated,
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::TokenMissing)
    ));
}

#[tokio::test]
async fn test_tampered_access_token_is_not_healed() {
    let fixture = fixture().await;
    let user = seed_user(&fixture, true, UserRole::User).await;
    let pair = fixture.tokens.issue_token_pair(user.id).await.unwrap();

    let err = fixture
        .guard
        .resolve(
            credentials(Some("garbage".to_string()), Some(pair.refresh_token)),
            AccessPolicy::Authenticated,
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::TokenInvalid)
    ));
}

#[tokio::test]
async fn test_unknown_subject_fails_user_not_exist() {
    let fixture = fixture().await;

    // Tokens for an account the user store has never seen.
    let ghost = Uuid::new_v4();
    let pair = fixture.tokens.issue_token_pair(ghost).await.unwrap();

    let err = fixture
        .guard
        .resolve(
            credentials(Some(pair.access_token), Some(pair.refresh_token)),
            AccessPolicy::Authenticated,
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Account(AccountError::UserNotExist)
    ));
}

#[tokio::test]
async fn test_verified_policy_rejects_unverified_user() {
    let fixture = fixture().await;
    let user = seed_user(&fixture, false, UserRole::User).await;
    let pair = fixture.tokens.issue_token_pair(user.id).await.unwrap();

    let err = fixture
        .guard
        .resolve(
            credentials(Some(pair.access_token), None),
            AccessPolicy::Verified,
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Account(AccountError::UserNotVerified)
    ));
}

#[tokio::test]
async fn test_admin_policy_gates_on_role() {
    let fixture = fixture().await;
    let user = seed_user(&fixture, true, UserRole::User).await;
    let pair = fixture.tokens.issue_token_pair(user.id).await.unwrap();

    let err = fixture
        .guard
        .resolve(
            credentials(Some(pair.access_token.clone()), None),
            AccessPolicy::Admin,
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Account(AccountError::ForbiddenAccess)
    ));

    let mut admin = User::new("coach@example.com".to_string(), "hash".to_string(), None);
    admin.role = UserRole::Admin;
    fixture.users.insert(admin.clone()).await;
    let admin_pair = fixture.tokens.issue_token_pair(admin.id).await.unwrap();

    let resolution = fixture
        .guard
        .resolve(
            credentials(Some(admin_pair.access_token), None),
            AccessPolicy::Admin,
        )
        .await
        .unwrap();
    assert_eq!(resolution.identity.role, UserRole::Admin);
}
