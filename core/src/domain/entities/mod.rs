//! Domain entities for the authentication subsystem.

pub mod keys;
pub mod token;
pub mod user;

pub use keys::{KeyMaterial, KeyPairPem};
pub use token::{Claims, RefreshTokenRecord, TokenClass, TokenPair};
pub use user::{User, UserRole, VerifiedIdentity};
