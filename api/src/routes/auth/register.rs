//! Handler for POST /auth/register
//!
//! Creates a new account, sends the verification email, and hands out the
//! first token pair, both in the body and as cookies.

use actix_web::{web, HttpResponse};

use md_core::repositories::{RefreshTokenRepository, UserRepository};

use crate::cookies;
use crate::dto::{RegisterRequest, TokensResponse};
use crate::handlers::ApiError;

use super::AppState;

pub async fn register<R, U>(
    state: web::Data<AppState<R, U>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError>
where
    R: RefreshTokenRepository + 'static,
    U: UserRepository + 'static,
{
    let user = state
        .accounts
        .register(&request.email, &request.password, request.fullname.clone())
        .await?;
    let pair = state.tokens.issue_token_pair(user.id).await?;

    Ok(HttpResponse::Ok()
        .cookie(cookies::access_cookie(&state.auth, &pair.access_token))
        .cookie(cookies::refresh_cookie(&state.auth, &pair.refresh_token))
        .json(TokensResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            message: "Registration successful. Please verify your email".to_string(),
        }))
}
