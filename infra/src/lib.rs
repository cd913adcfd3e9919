//! # Matchday Infrastructure
//!
//! Concrete implementations of the core repository and service contracts:
//! MySQL persistence for the refresh token ledger and the user store, the
//! file-backed key material blob, and the development email sender.

pub mod database;
pub mod email;
pub mod keys;

pub use database::mysql::{MySqlRefreshTokenRepository, MySqlUserRepository};
pub use email::LoggingEmailSender;
pub use keys::FileKeyMaterialRepository;
