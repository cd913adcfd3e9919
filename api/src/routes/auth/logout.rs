//! Handler for POST /auth/logout
//!
//! Revokes the refresh token and clears both cookies. Requires an
//! authenticated caller; revocation itself is idempotent.

use actix_web::{web, HttpRequest, HttpResponse};

use md_core::repositories::{RefreshTokenRepository, UserRepository};

use crate::cookies;
use crate::dto::MessageResponse;
use crate::handlers::ApiError;
use crate::middleware::CurrentIdentity;

use super::AppState;

pub async fn logout<R, U>(
    state: web::Data<AppState<R, U>>,
    request: HttpRequest,
    _identity: CurrentIdentity,
) -> Result<HttpResponse, ApiError>
where
    R: RefreshTokenRepository + 'static,
    U: UserRepository + 'static,
{
    if let Some(cookie) = request.cookie(&state.auth.cookies.refresh_name) {
        state.tokens.revoke(cookie.value()).await?;
    }

    Ok(HttpResponse::Ok()
        .cookie(cookies::clear_cookie(&state.auth.cookies.access_name))
        .cookie(cookies::clear_cookie(&state.auth.cookies.refresh_name))
        .json(MessageResponse::new("User logged out successfully")))
}
