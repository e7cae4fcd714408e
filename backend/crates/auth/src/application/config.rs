//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::{CookieConfig, SameSite};

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub cookie_session_name: String,
    /// Nonce cookie name
    pub cookie_nonce_name: String,
    /// Session TTL (also bounds the nonce cookie, 7 days)
    pub session_max_age: Duration,
    /// TTL for cached device location entries (1 hour)
    pub location_max_age: Duration,
    /// Whether to require Secure cookies
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Identity provider client id
    pub client_id: String,
    /// Identity provider client secret
    pub client_secret: String,
    /// Redirect URI registered with the identity provider
    pub redirect_uri: String,
    /// Identity provider token endpoint
    pub token_endpoint: String,
    /// Identity provider authorize endpoint
    pub authorize_endpoint: String,
    /// Application base URL used for the post-callback redirect
    pub server_base_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_session_name: "worldAuthSession".to_string(),
            cookie_nonce_name: "nonce".to_string(),
            session_max_age: Duration::from_secs(7 * 24 * 3600), // 7 days
            location_max_age: Duration::from_secs(3600),         // 1 hour
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: String::new(),
            token_endpoint: "https://id.worldcoin.org/token".to_string(),
            authorize_endpoint: "https://id.worldcoin.org/authorize".to_string(),
            server_base_url: String::new(),
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookies)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Session TTL in whole seconds (cookie Max-Age)
    pub fn session_max_age_secs(&self) -> i64 {
        self.session_max_age.as_secs() as i64
    }

    /// Cookie shape for the session cookie
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.cookie_session_name.clone(),
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            max_age_secs: Some(self.session_max_age_secs()),
            ..CookieConfig::default()
        }
    }

    /// Cookie shape for the nonce cookie (same lifetime bound as the session)
    pub fn nonce_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.cookie_nonce_name.clone(),
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            max_age_secs: Some(self.session_max_age_secs()),
            ..CookieConfig::default()
        }
    }
}
