//! Authentication configuration

use serde::{Deserialize, Serialize};

/// Token lifetime and key-material configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Access token lifetime in minutes
    pub access_token_ttl_minutes: i64,

    /// Refresh token lifetime in days
    pub refresh_token_ttl_days: i64,

    /// Path to the persisted signing key material
    pub keys_file: String,

    /// Cookie settings for the token carrier
    #[serde(default)]
    pub cookies: CookieConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_ttl_minutes: 15,
            refresh_token_ttl_days: 7,
            keys_file: String::from("config/auth_keys.json"),
            cookies: CookieConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_token_ttl_minutes: std::env::var("ACCESS_TOKEN_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.access_token_ttl_minutes),
            refresh_token_ttl_days: std::env::var("REFRESH_TOKEN_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_token_ttl_days),
            keys_file: std::env::var("AUTH_KEYS_FILE").unwrap_or(defaults.keys_file),
            cookies: CookieConfig::from_env(),
        }
    }

    /// Access token lifetime in seconds
    pub fn access_token_ttl_seconds(&self) -> i64 {
        self.access_token_ttl_minutes * 60
    }

    /// Refresh token lifetime in seconds
    pub fn refresh_token_ttl_seconds(&self) -> i64 {
        self.refresh_token_ttl_days * 24 * 60 * 60
    }
}

/// Cookie settings for the two bearer cookies
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Name of the access token cookie
    pub access_name: String,

    /// Name of the refresh token cookie
    pub refresh_name: String,

    /// Require HTTPS for the cookies
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            access_name: String::from("access_token"),
            refresh_name: String::from("refresh_token"),
            secure: true,
        }
    }
}

impl CookieConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secure: std::env::var("COOKIE_SECURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.secure),
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_default() {
        let config = AuthConfig::default();
        assert_eq!(config.access_token_ttl_minutes, 15);
        assert_eq!(config.refresh_token_ttl_days, 7);
        assert_eq!(config.access_token_ttl_seconds(), 900);
        assert_eq!(config.refresh_token_ttl_seconds(), 604800);
    }

    #[test]
    fn test_cookie_config_default() {
        let config = CookieConfig::default();
        assert_eq!(config.access_name, "access_token");
        assert_eq!(config.refresh_name, "refresh_token");
        assert!(config.secure);
    }
}
