//! Database connectivity and repository implementations.

pub mod mysql;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

use md_core::errors::DomainError;
use md_shared::config::DatabaseConfig;

/// Builds the shared connection pool from configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<MySqlPool, DomainError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(config.connect_timeout))
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::internal(format!("database connection failed: {}", e)))?;

    tracing::info!(max_connections = config.max_connections, "database pool ready");
    Ok(pool)
}
