//! Handler for GET /auth/session
//!
//! Probe endpoint returning the identity the guard resolved for this
//! request. Exercises the transparent renewal path: an expired access
//! cookie comes back healed alongside this response.

use actix_web::HttpResponse;

use md_core::domain::entities::user::UserRole;

use crate::dto::SessionResponse;
use crate::handlers::ApiError;
use crate::middleware::CurrentIdentity;

pub async fn session(identity: CurrentIdentity) -> Result<HttpResponse, ApiError> {
    let role = match identity.0.role {
        UserRole::Admin => "admin",
        UserRole::User => "user",
    };

    Ok(HttpResponse::Ok().json(SessionResponse {
        user_id: identity.0.user_id,
        is_verified: identity.0.is_verified,
        role: role.to_string(),
    }))
}
