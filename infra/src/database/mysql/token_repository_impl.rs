//! MySQL implementation of the refresh token ledger.
//!
//! Expected schema, one row per user:
//!
//! ```sql
//! CREATE TABLE refresh_tokens (
//!     user_id    CHAR(36)     NOT NULL UNIQUE,
//!     token      VARCHAR(512) NOT NULL UNIQUE,
//!     created_at TIMESTAMP    NOT NULL,
//!     expires_at TIMESTAMP    NOT NULL
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use md_core::domain::entities::token::RefreshTokenRecord;
use md_core::errors::DomainError;
use md_core::repositories::token::RefreshTokenRepository;

/// Ledger backed by MySQL.
pub struct MySqlRefreshTokenRepository {
    pool: MySqlPool,
}

impl MySqlRefreshTokenRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<RefreshTokenRecord, DomainError> {
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| DomainError::internal(format!("failed to get user_id: {}", e)))?;

        Ok(RefreshTokenRecord {
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::internal(format!("invalid user UUID: {}", e)))?,
            token: row
                .try_get("token")
                .map_err(|e| DomainError::internal(format!("failed to get token: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::internal(format!("failed to get created_at: {}", e)))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::internal(format!("failed to get expires_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl RefreshTokenRepository for MySqlRefreshTokenRepository {
    async fn upsert(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, DomainError> {
        // The unique key on user_id makes this a single atomic statement;
        // concurrent writers for the same user serialize in the engine and
        // the last one wins.
        let query = r#"
            INSERT INTO refresh_tokens (user_id, token, created_at, expires_at)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                token = VALUES(token),
                created_at = VALUES(created_at),
                expires_at = VALUES(expires_at)
        "#;

        sqlx::query(query)
            .bind(record.user_id.to_string())
            .bind(&record.token)
            .bind(record.created_at)
            .bind(record.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("failed to upsert refresh token: {}", e)))?;

        Ok(record)
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let query = r#"
            SELECT user_id, token, created_at, expires_at
            FROM refresh_tokens
            WHERE user_id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("failed to find token by user: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let query = r#"
            SELECT user_id, token, created_at, expires_at
            FROM refresh_tokens
            WHERE token = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("failed to find refresh token: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, token: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM refresh_tokens WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("failed to delete refresh token: {}", e)))?;
        Ok(())
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("failed to delete expired tokens: {}", e)))?;
        Ok(result.rows_affected() as usize)
    }
}
