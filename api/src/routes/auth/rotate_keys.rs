//! Handler for POST /auth/rotate-keys
//!
//! Administrative trigger for signing key rotation. Tokens signed with the
//! outgoing keys keep verifying for one more generation.

use actix_web::{web, HttpResponse};

use md_core::repositories::{RefreshTokenRepository, UserRepository};

use crate::dto::MessageResponse;
use crate::handlers::ApiError;
use crate::middleware::CurrentIdentity;

use super::AppState;

pub async fn rotate_keys<R, U>(
    state: web::Data<AppState<R, U>>,
    _identity: CurrentIdentity,
) -> Result<HttpResponse, ApiError>
where
    R: RefreshTokenRepository + 'static,
    U: UserRepository + 'static,
{
    state.keys.rotate().await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Signing keys rotated")))
}
