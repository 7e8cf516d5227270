//! Application Configuration
//!
//! Configuration for the Auth application layer. Covers only what this
//! service decides itself: how pool tokens ride in browser cookies.
//! Token lifetimes, password policy, and lockouts are the pool's.

use std::time::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

use platform::cookie::CookieConfig;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Cookie carrying the pool access token
    pub access_cookie_name: String,
    /// Cookie carrying the pool refresh token
    pub refresh_cookie_name: String,
    /// Cookie carrying the last signed-in username (needed to refresh
    /// tokens on pools configured with a client secret)
    pub user_cookie_name: String,
    /// Max-Age for refresh/user cookies. The pool enforces the real
    /// refresh-token validity; this only bounds how long browsers keep it.
    pub refresh_cookie_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Cookie path
    pub cookie_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_cookie_name: "auth_token".to_string(),
            refresh_cookie_name: "auth_refresh".to_string(),
            user_cookie_name: "auth_user".to_string(),
            refresh_cookie_ttl: Duration::from_secs(30 * 24 * 3600), // 30 days
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            cookie_path: "/".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Cookie settings for the access token
    ///
    /// Max-Age comes from the pool's reported token lifetime, so it is a
    /// per-response value rather than part of this config.
    pub fn access_cookie(&self, max_age_secs: i64) -> CookieConfig {
        self.cookie(&self.access_cookie_name, Some(max_age_secs))
    }

    /// Cookie settings for the refresh token
    pub fn refresh_cookie(&self) -> CookieConfig {
        self.cookie(
            &self.refresh_cookie_name,
            Some(self.refresh_cookie_ttl.as_secs() as i64),
        )
    }

    /// Cookie settings for the last-user marker
    pub fn user_cookie(&self) -> CookieConfig {
        self.cookie(
            &self.user_cookie_name,
            Some(self.refresh_cookie_ttl.as_secs() as i64),
        )
    }

    fn cookie(&self, name: &str, max_age_secs: Option<i64>) -> CookieConfig {
        CookieConfig {
            name: name.to_string(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: self.cookie_path.clone(),
            max_age_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_cookie_uses_pool_lifetime() {
        let config = AuthConfig::default();
        let cookie = config.access_cookie(3600);
        assert_eq!(cookie.name, "auth_token");
        assert_eq!(cookie.max_age_secs, Some(3600));
        assert!(cookie.http_only);
        assert!(cookie.secure);
    }

    #[test]
    fn test_development_is_insecure_only() {
        let config = AuthConfig::development();
        assert!(!config.cookie_secure);
        assert!(config.refresh_cookie().http_only);
    }
}
