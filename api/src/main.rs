//! Server entry point: configuration, wiring, and startup.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use md_api::middleware::GuardContext;
use md_api::routes::{self, auth::AppState};
use md_core::services::auth::{AuthGuard, IdentityResolver};
use md_core::services::{AccountService, KeyStore, TokenConfig, TokenService};
use md_infra::{
    FileKeyMaterialRepository, LoggingEmailSender, MySqlRefreshTokenRepository, MySqlUserRepository,
};
use md_shared::config::AppConfig;

fn startup_error(e: md_core::errors::DomainError) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!(address = %config.server.bind_address(), "starting Matchday API server");

    let pool = md_infra::database::connect(&config.database)
        .await
        .map_err(startup_error)?;

    let key_repository = Arc::new(FileKeyMaterialRepository::new(&config.auth.keys_file));
    let keys = Arc::new(
        KeyStore::load_or_init(key_repository)
            .await
            .map_err(startup_error)?,
    );

    let users = Arc::new(MySqlUserRepository::new(pool.clone()));
    let ledger = MySqlRefreshTokenRepository::new(pool.clone());
    let tokens = Arc::new(TokenService::new(
        ledger,
        Arc::clone(&keys),
        TokenConfig::from(&config.auth),
    ));
    let accounts = AccountService::new(Arc::clone(&users), Arc::new(LoggingEmailSender::new()));
    let resolver: Arc<dyn IdentityResolver> =
        Arc::new(AuthGuard::new(Arc::clone(&tokens), Arc::clone(&users)));

    let state = web::Data::new(AppState {
        accounts,
        tokens,
        keys,
        auth: config.auth.clone(),
    });
    let guard = web::Data::new(GuardContext::new(resolver, config.auth.clone()));
    let bind_address = config.server.bind_address();

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(guard.clone())
            .wrap(TracingLogger::default())
            .route("/health", web::get().to(routes::health_check))
            .service(web::scope("/api/v1").configure(
                routes::auth::configure::<MySqlRefreshTokenRepository, MySqlUserRepository>,
            ))
    })
    .bind(bind_address)?
    .run()
    .await
}
