//! Configuration for the token service

/// Token lifetimes, one per class. The access lifetime is expected to be
/// far shorter than the refresh lifetime.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Access token expiry in minutes
    pub access_token_ttl_minutes: i64,
    /// Refresh token expiry in days
    pub refresh_token_ttl_days: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_token_ttl_minutes: 15,
            refresh_token_ttl_days: 7,
        }
    }
}

impl From<&md_shared::config::AuthConfig> for TokenConfig {
    fn from(config: &md_shared::config::AuthConfig) -> Self {
        Self {
            access_token_ttl_minutes: config.access_token_ttl_minutes,
            refresh_token_ttl_days: config.refresh_token_ttl_days,
        }
    }
}
