//! Handler for POST /auth/login
//!
//! Authenticates with email and password. Returns the token pair and sets
//! both cookies; a live refresh token is reused rather than rotated.

use actix_web::{web, HttpResponse};

use md_core::repositories::{RefreshTokenRepository, UserRepository};

use crate::cookies;
use crate::dto::{LoginRequest, TokensResponse};
use crate::handlers::ApiError;

use super::AppState;

pub async fn login<R, U>(
    state: web::Data<AppState<R, U>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    R: RefreshTokenRepository + 'static,
    U: UserRepository + 'static,
{
    let user = state.accounts.login(&request.email, &request.password).await?;
    let pair = state.tokens.issue_token_pair(user.id).await?;

    Ok(HttpResponse::Ok()
        .cookie(cookies::access_cookie(&state.auth, &pair.access_token))
        .cookie(cookies::refresh_cookie(&state.auth, &pair.refresh_token))
        .json(TokensResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            message: "Login successful".to_string(),
        }))
}
