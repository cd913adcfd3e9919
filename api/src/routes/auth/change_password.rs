//! Handler for POST /auth/change-password
//!
//! Replaces the password for a verified caller. The current password must
//! be supplied.

use actix_web::{web, HttpResponse};

use md_core::repositories::{RefreshTokenRepository, UserRepository};

use crate::dto::{ChangePasswordRequest, MessageResponse};
use crate::handlers::ApiError;
use crate::middleware::CurrentIdentity;

use super::AppState;

pub async fn change_password<R, U>(
    state: web::Data<AppState<R, U>>,
    identity: CurrentIdentity,
    request: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, ApiError>
where
    R: RefreshTokenRepository + 'static,
    U: UserRepository + 'static,
{
    state
        .accounts
        .change_password(
            identity.0.user_id,
            &request.current_password,
            &request.new_password,
        )
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Password changed successfully")))
}
