//! MySQL implementation of the user store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use md_core::domain::entities::user::{User, UserRole};
use md_core::errors::{AccountError, DomainError};
use md_core::repositories::user::UserRepository;

/// User store backed by MySQL.
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("failed to get id: {}", e)))?;
        let role: String = row
            .try_get("role")
            .map_err(|e| DomainError::internal(format!("failed to get role: {}", e)))?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("invalid user UUID: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::internal(format!("failed to get email: {}", e)))?,
            fullname: row
                .try_get("fullname")
                .map_err(|e| DomainError::internal(format!("failed to get fullname: {}", e)))?,
            password_hash: row.try_get("password_hash").map_err(|e| {
                DomainError::internal(format!("failed to get password_hash: {}", e))
            })?,
            is_verified: row
                .try_get("is_verified")
                .map_err(|e| DomainError::internal(format!("failed to get is_verified: {}", e)))?,
            role: match role.as_str() {
                "admin" => UserRole::Admin,
                _ => UserRole::User,
            },
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::internal(format!("failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::internal(format!("failed to get updated_at: {}", e)))?,
        })
    }

    fn role_to_str(role: UserRole) -> &'static str {
        match role {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }
}

const USER_COLUMNS: &str =
    "id, email, fullname, password_hash, is_verified, role, created_at, updated_at";

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ? LIMIT 1");

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("failed to find user by id: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ? LIMIT 1");

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("failed to find user by email: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (id, email, fullname, password_hash, is_verified, role, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.fullname)
            .bind(&user.password_hash)
            .bind(user.is_verified)
            .bind(Self::role_to_str(user.role))
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e.as_database_error() {
                Some(db_err) if db_err.is_unique_violation() => {
                    AccountError::UserAlreadyExists.into()
                }
                _ => DomainError::internal(format!("failed to create user: {}", e)),
            })?;

        Ok(user)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("failed to update password: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_verified(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE users SET is_verified = TRUE, updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("failed to mark user verified: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
