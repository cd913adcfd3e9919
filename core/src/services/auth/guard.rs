//! Resolution of a verified identity from request credentials.
//!
//! The guard is a single pass over the credential pair: use the access
//! token while it verifies, fall back to the ledger-validated refresh token
//! when it has expired, and surface the freshly minted access token so the
//! transport can re-deliver it to the client.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::VerifiedIdentity;
use crate::errors::{AccountError, DomainError, TokenError};
use crate::repositories::token::RefreshTokenRepository;
use crate::repositories::user::UserRepository;
use crate::services::token::TokenService;

/// The two opaque bearer strings carried by the transport.
#[derive(Debug, Clone, Default)]
pub struct CredentialPair {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

/// How strict an endpoint is about who may pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Any authenticated account
    Authenticated,
    /// Only accounts with a confirmed email address
    Verified,
    /// Only administrative accounts
    Admin,
}

/// Successful guard outcome.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The identity resolved for this request
    pub identity: VerifiedIdentity,
    /// Replacement access token minted during resolution, to be handed back
    /// to the client by the transport layer
    pub renewed_access_token: Option<String>,
}

/// Object-safe entry point the transport layer drives.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(
        &self,
        credentials: CredentialPair,
        policy: AccessPolicy,
    ) -> Result<Resolution, DomainError>;
}

/// Guard over the token service and the user store.
pub struct AuthGuard<R, U>
where
    R: RefreshTokenRepository,
    U: UserRepository,
{
    tokens: Arc<TokenService<R>>,
    users: Arc<U>,
}

impl<R, U> AuthGuard<R, U>
where
    R: RefreshTokenRepository,
    U: UserRepository,
{
    pub fn new(tokens: Arc<TokenService<R>>, users: Arc<U>) -> Self {
        Self { tokens, users }
    }

    /// Renewal path: validate the refresh token through the ledger and mint
    /// a replacement access token for its subject.
    async fn renew(
        &self,
        refresh_token: Option<&str>,
    ) -> Result<(Uuid, Option<String>), DomainError> {
        let token = refresh_token.ok_or(TokenError::TokenMissing)?;
        let user_id = self.tokens.verify_refresh_token(token).await?;
        let access_token = self.tokens.issue_access_token(user_id).await?;
        tracing::debug!(%user_id, "healed expired access token");
        Ok((user_id, Some(access_token)))
    }
}

#[async_trait]
impl<R, U> IdentityResolver for AuthGuard<R, U>
where
    R: RefreshTokenRepository + 'static,
    U: UserRepository + 'static,
{
    async fn resolve(
        &self,
        credentials: CredentialPair,
        policy: AccessPolicy,
    ) -> Result<Resolution, DomainError> {
        let (user_id, renewed_access_token) = match credentials.access_token.as_deref() {
            Some(token) => match self.tokens.verify_access_token(token).await {
                Ok(claims) => {
                    let user_id = claims.user_id().map_err(|_| TokenError::TokenInvalid)?;
                    (user_id, None)
                }
                // Expired is the only failure the refresh token may heal;
                // a bad signature stays an error.
                Err(DomainError::Token(TokenError::TokenExpired)) => {
                    self.renew(credentials.refresh_token.as_deref()).await?
                }
                Err(e) => return Err(e),
            },
            None => self.renew(credentials.refresh_token.as_deref()).await?,
        };

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotExist)?;

        match policy {
            AccessPolicy::Authenticated => {}
            AccessPolicy::Verified => {
                if !user.is_verified {
                    return Err(AccountError::UserNotVerified.into());
                }
            }
            AccessPolicy::Admin => {
                if !user.is_admin() {
                    return Err(AccountError::ForbiddenAccess.into());
                }
            }
        }

        Ok(Resolution {
            identity: VerifiedIdentity::from_user(&user),
            renewed_access_token,
        })
    }
}
