//! Shared configuration for the Matchday backend
//!
//! This crate provides the configuration values loaded once at startup and
//! passed explicitly into the services that need them. Nothing in here holds
//! mutable global state.

pub mod config;

// Re-export commonly used items at crate root
pub use config::{AppConfig, AuthConfig, CookieConfig, DatabaseConfig, ServerConfig};
