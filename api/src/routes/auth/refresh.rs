//! Handler for POST /auth/refresh
//!
//! Mints a fresh access token from the refresh cookie. The refresh token is
//! validated against the ledger and left in place.

use actix_web::{web, HttpRequest, HttpResponse};

use md_core::errors::TokenError;
use md_core::repositories::{RefreshTokenRepository, UserRepository};

use crate::cookies;
use crate::dto::AccessTokenResponse;
use crate::handlers::ApiError;

use super::AppState;

pub async fn refresh<R, U>(
    state: web::Data<AppState<R, U>>,
    request: HttpRequest,
) -> Result<HttpResponse, ApiError>
where
    R: RefreshTokenRepository + 'static,
    U: UserRepository + 'static,
{
    let refresh_token = request
        .cookie(&state.auth.cookies.refresh_name)
        .map(|c| c.value().to_string())
        .ok_or(TokenError::TokenMissing)
        .map_err(md_core::errors::DomainError::from)?;

    let access_token = state.tokens.refresh_access_token(&refresh_token).await?;

    Ok(HttpResponse::Ok()
        .cookie(cookies::access_cookie(&state.auth, &access_token))
        .json(AccessTokenResponse { access_token }))
}
