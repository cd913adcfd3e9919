//! Repository interfaces for persistence operations.
//!
//! The traits in this module define the contracts between the domain layer
//! and whatever storage backs it. Concrete implementations live in the
//! infrastructure crate; in-memory versions are provided here for tests and
//! local development.

pub mod keys;
pub mod token;
pub mod user;

pub use keys::{InMemoryKeyMaterialRepository, KeyMaterialRepository};
pub use token::{InMemoryRefreshTokenRepository, RefreshTokenRepository};
pub use user::{InMemoryUserRepository, UserRepository};
