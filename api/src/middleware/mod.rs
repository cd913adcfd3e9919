//! Actix middleware.

pub mod auth;

pub use auth::{CurrentIdentity, GuardContext, RequireAuth};
