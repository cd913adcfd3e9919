//! Builders for the two bearer cookies.
//!
//! Both cookies are HttpOnly, SameSite=Strict, and live as long as the
//! refresh token; the access token inside expires on its own schedule.

use actix_web::cookie::{time::Duration, Cookie, SameSite};

use md_shared::config::AuthConfig;

fn bearer_cookie(name: &str, value: &str, config: &AuthConfig) -> Cookie<'static> {
    Cookie::build(name.to_string(), value.to_string())
        .http_only(true)
        .secure(config.cookies.secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(Duration::seconds(config.refresh_token_ttl_seconds()))
        .finish()
}

/// Cookie carrying the access token.
pub fn access_cookie(config: &AuthConfig, token: &str) -> Cookie<'static> {
    bearer_cookie(&config.cookies.access_name, token, config)
}

/// Cookie carrying the refresh token.
pub fn refresh_cookie(config: &AuthConfig, token: &str) -> Cookie<'static> {
    bearer_cookie(&config.cookies.refresh_name, token, config)
}

/// Expired cookie that removes the named one from the client.
pub fn clear_cookie(name: &str) -> Cookie<'static> {
    Cookie::build(name.to_string(), "")
        .http_only(true)
        .path("/")
        .max_age(Duration::ZERO)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_cookie_attributes() {
        let config = AuthConfig::default();
        let cookie = access_cookie(&config, "abc");

        assert_eq!(cookie.name(), "access_token");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(
            cookie.max_age(),
            Some(Duration::seconds(config.refresh_token_ttl_seconds()))
        );
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_cookie("refresh_token");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
