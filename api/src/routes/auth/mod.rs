//! Authentication routes.

mod change_password;
mod login;
mod logout;
mod refresh;
mod register;
mod rotate_keys;
mod session;

use std::sync::Arc;

use actix_web::web;

use md_core::repositories::{RefreshTokenRepository, UserRepository};
use md_core::services::{AccountService, KeyStore, TokenService};
use md_shared::config::AuthConfig;

use crate::middleware::RequireAuth;

/// Application state shared by the auth handlers.
pub struct AppState<R, U>
where
    R: RefreshTokenRepository,
    U: UserRepository,
{
    pub accounts: AccountService<U>,
    pub tokens: Arc<TokenService<R>>,
    pub keys: Arc<KeyStore>,
    pub auth: AuthConfig,
}

/// Registers the auth scope.
pub fn configure<R, U>(cfg: &mut web::ServiceConfig)
where
    R: RefreshTokenRepository + 'static,
    U: UserRepository + 'static,
{
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register::register::<R, U>))
            .route("/login", web::post().to(login::login::<R, U>))
            .route("/refresh", web::post().to(refresh::refresh::<R, U>))
            .route(
                "/logout",
                web::post()
                    .to(logout::logout::<R, U>)
                    .wrap(RequireAuth::authenticated()),
            )
            .route(
                "/change-password",
                web::post()
                    .to(change_password::change_password::<R, U>)
                    .wrap(RequireAuth::verified()),
            )
            .route(
                "/session",
                web::get()
                    .to(session::session)
                    .wrap(RequireAuth::authenticated()),
            )
            .route(
                "/rotate-keys",
                web::post()
                    .to(rotate_keys::rotate_keys::<R, U>)
                    .wrap(RequireAuth::admin()),
            ),
    );
}
