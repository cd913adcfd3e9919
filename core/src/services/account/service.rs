//! Account service implementation.

use std::sync::Arc;

use rand::Rng;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AccountError, DomainError};
use crate::repositories::user::UserRepository;
use crate::services::email::EmailSender;

/// Registration, login, and password management over the user store.
pub struct AccountService<U: UserRepository> {
    users: Arc<U>,
    email: Arc<dyn EmailSender>,
}

impl<U: UserRepository> AccountService<U> {
    pub fn new(users: Arc<U>, email: Arc<dyn EmailSender>) -> Self {
        Self { users, email }
    }

    /// Creates a new account and kicks off email verification.
    ///
    /// The verification email is fire-and-forget: a delivery failure is
    /// logged and registration still succeeds.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        fullname: Option<String>,
    ) -> Result<User, DomainError> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AccountError::UserAlreadyExists.into());
        }

        let password_hash = hash_password(password)?;
        let user = self
            .users
            .create(User::new(email.to_string(), password_hash, fullname))
            .await?;
        tracing::info!(user_id = %user.id, "registered new account");

        let code = generate_verification_code();
        if let Err(e) = self.email.send_verification(&user.email, &code).await {
            tracing::warn!(user_id = %user.id, error = %e, "verification email failed to send");
        }

        Ok(user)
    }

    /// Checks email and password, yielding the account on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AccountError::InvalidCredentials.into());
        }
        Ok(user)
    }

    /// Replaces the password after checking the current one.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotExist)?;

        if !verify_password(current_password, &user.password_hash)? {
            return Err(AccountError::InvalidCredentials.into());
        }

        let password_hash = hash_password(new_password)?;
        self.users.update_password(user_id, &password_hash).await?;
        tracing::info!(%user_id, "password changed");
        Ok(())
    }

    /// Flags the account as verified once email confirmation completes.
    pub async fn mark_verified(&self, user_id: Uuid) -> Result<(), DomainError> {
        if !self.users.mark_verified(user_id).await? {
            return Err(AccountError::UserNotExist.into());
        }
        tracing::info!(%user_id, "account verified");
        Ok(())
    }
}

fn hash_password(password: &str) -> Result<String, DomainError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| DomainError::internal(format!("password hashing failed: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> Result<bool, DomainError> {
    bcrypt::verify(password, hash)
        .map_err(|e| DomainError::internal(format!("password verification failed: {}", e)))
}

/// Six digit code delivered by email.
fn generate_verification_code() -> String {
    let code: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{:06}", code)
}
