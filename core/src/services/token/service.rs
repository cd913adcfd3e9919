//! Token issuance, refresh, and revocation.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::{RefreshTokenRecord, TokenClass, TokenPair};
use crate::errors::{DomainError, TokenError};
use crate::repositories::token::RefreshTokenRepository;

use super::codec;
use super::config::TokenConfig;
use super::key_store::KeyStore;

/// Orchestrates the token lifecycle over the codec, the key store, and the
/// refresh token ledger.
///
/// Access tokens are stateless; refresh tokens are mirrored in the ledger,
/// which enforces a single live refresh token per user.
pub struct TokenService<R: RefreshTokenRepository> {
    ledger: R,
    keys: Arc<KeyStore>,
    config: TokenConfig,
}

impl<R: RefreshTokenRepository> TokenService<R> {
    pub fn new(ledger: R, keys: Arc<KeyStore>, config: TokenConfig) -> Self {
        Self {
            ledger,
            keys,
            config,
        }
    }

    /// Issues a short-lived access token. Stateless; nothing is recorded.
    pub async fn issue_access_token(&self, user_id: Uuid) -> Result<String, DomainError> {
        let expires_at = Utc::now() + Duration::minutes(self.config.access_token_ttl_minutes);
        let key = self.keys.signing_key(TokenClass::Access).await;
        codec::encode_token(user_id, TokenClass::Access, expires_at, &key)
    }

    /// Returns the user's live refresh token, minting one only when none
    /// exists or the existing record has expired.
    ///
    /// Reuse avoids refresh token churn on rapid re-login while the ledger
    /// upsert still guarantees at most one live token per user.
    pub async fn issue_or_reuse_refresh_token(
        &self,
        user_id: Uuid,
    ) -> Result<String, DomainError> {
        if let Some(record) = self.ledger.find_by_user(user_id).await? {
            if record.is_live() {
                tracing::debug!(%user_id, "reusing live refresh token");
                return Ok(record.token);
            }
        }

        let expires_at = Utc::now() + Duration::days(self.config.refresh_token_ttl_days);
        let key = self.keys.signing_key(TokenClass::Refresh).await;
        let token = codec::encode_token(user_id, TokenClass::Refresh, expires_at, &key)?;

        self.ledger
            .upsert(RefreshTokenRecord::new(user_id, token.clone(), expires_at))
            .await?;
        tracing::debug!(%user_id, "minted refresh token");
        Ok(token)
    }

    /// Issues the access/refresh pair handed out on login and registration.
    pub async fn issue_token_pair(&self, user_id: Uuid) -> Result<TokenPair, DomainError> {
        let access_token = self.issue_access_token(user_id).await?;
        let refresh_token = self.issue_or_reuse_refresh_token(user_id).await?;
        Ok(TokenPair::new(access_token, refresh_token))
    }

    /// Verifies an access token against the current and previous public
    /// keys, returning its claims.
    pub async fn verify_access_token(
        &self,
        token: &str,
    ) -> Result<crate::domain::entities::token::Claims, DomainError> {
        let keys = self.keys.verification_keys(TokenClass::Access).await;
        let claims = codec::decode_with_candidates(token, &keys)?;
        if claims.token_class != TokenClass::Access {
            return Err(TokenError::TokenInvalid.into());
        }
        Ok(claims)
    }

    /// Validates a refresh token and returns its subject.
    ///
    /// The ledger decides liveness; the signature check merely proves the
    /// string was ours. Absent, expired, or tampered tokens all surface as
    /// `RefreshTokenInvalid`.
    pub async fn verify_refresh_token(&self, token: &str) -> Result<Uuid, DomainError> {
        if !self.ledger.is_valid(token).await? {
            return Err(TokenError::RefreshTokenInvalid.into());
        }

        let keys = self.keys.verification_keys(TokenClass::Refresh).await;
        let claims = codec::decode_with_candidates(token, &keys)
            .map_err(|_| TokenError::RefreshTokenInvalid)?;
        if claims.token_class != TokenClass::Refresh {
            return Err(TokenError::RefreshTokenInvalid.into());
        }
        claims
            .user_id()
            .map_err(|_| TokenError::RefreshTokenInvalid.into())
    }

    /// Mints a fresh access token from a valid refresh token.
    ///
    /// The refresh token itself is left untouched; it is reused until it
    /// expires or is revoked.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, DomainError> {
        let user_id = self.verify_refresh_token(refresh_token).await?;
        tracing::debug!(%user_id, "renewing access token from refresh token");
        self.issue_access_token(user_id).await
    }

    /// Removes the ledger record for this refresh token. Idempotent.
    pub async fn revoke(&self, refresh_token: &str) -> Result<(), DomainError> {
        self.ledger.delete(refresh_token).await?;
        tracing::debug!("revoked refresh token");
        Ok(())
    }

    /// Reclaims expired ledger rows.
    pub async fn cleanup_expired(&self) -> Result<usize, DomainError> {
        self.ledger.delete_expired().await
    }
}
