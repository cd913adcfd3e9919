//! Authentication middleware for protected endpoints.
//!
//! Reads the two bearer cookies, drives the core guard, and injects the
//! resolved identity into request extensions. When the guard minted a
//! replacement access token, the middleware appends it to the response so
//! the client's cookie heals transparently.

use actix_web::{
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use md_core::domain::entities::user::VerifiedIdentity;
use md_core::errors::{DomainError, TokenError};
use md_core::services::auth::{AccessPolicy, CredentialPair, IdentityResolver};
use md_shared::config::AuthConfig;

use crate::cookies;
use crate::handlers::ApiError;

/// Guard wiring shared through application data.
pub struct GuardContext {
    resolver: Arc<dyn IdentityResolver>,
    config: AuthConfig,
}

impl GuardContext {
    pub fn new(resolver: Arc<dyn IdentityResolver>, config: AuthConfig) -> Self {
        Self { resolver, config }
    }
}

/// Identity resolved by the guard, available to wrapped handlers.
#[derive(Debug, Clone, Copy)]
pub struct CurrentIdentity(pub VerifiedIdentity);

impl FromRequest for CurrentIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<VerifiedIdentity>()
                .copied()
                .map(CurrentIdentity)
                .ok_or_else(|| ApiError::from(DomainError::from(TokenError::TokenMissing)).into()),
        )
    }
}

/// Middleware factory gating a route on an access policy.
pub struct RequireAuth {
    policy: AccessPolicy,
}

impl RequireAuth {
    /// Any authenticated account may pass
    pub fn authenticated() -> Self {
        Self {
            policy: AccessPolicy::Authenticated,
        }
    }

    /// Only accounts with a confirmed email address
    pub fn verified() -> Self {
        Self {
            policy: AccessPolicy::Verified,
        }
    }

    /// Only administrative accounts
    pub fn admin() -> Self {
        Self {
            policy: AccessPolicy::Admin,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthMiddleware {
            service: Rc::new(service),
            policy: self.policy,
        }))
    }
}

pub struct RequireAuthMiddleware<S> {
    service: Rc<S>,
    policy: AccessPolicy,
}

impl<S, B> Service<ServiceRequest> for RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let policy = self.policy;

        Box::pin(async move {
            let guard = match req.app_data::<web::Data<GuardContext>>() {
                Some(guard) => guard.clone(),
                None => {
                    return Err(ApiError::from(DomainError::internal(
                        "authentication guard not configured",
                    ))
                    .into())
                }
            };

            let credentials = CredentialPair {
                access_token: req
                    .cookie(&guard.config.cookies.access_name)
                    .map(|c| c.value().to_string()),
                refresh_token: req
                    .cookie(&guard.config.cookies.refresh_name)
                    .map(|c| c.value().to_string()),
            };

            let resolution = guard
                .resolver
                .resolve(credentials, policy)
                .await
                .map_err(ApiError::from)?;

            req.extensions_mut().insert(resolution.identity);

            let renewed = resolution.renewed_access_token;
            let mut res = service.call(req).await?;

            // Re-deliver the healed access token to the client.
            if let Some(token) = renewed {
                let cookie = cookies::access_cookie(&guard.config, &token);
                if let Err(e) = res.response_mut().add_cookie(&cookie) {
                    tracing::warn!(error = %e, "failed to attach renewed access cookie");
                }
            }

            Ok(res)
        })
    }
}
