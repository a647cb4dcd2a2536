//! Injected configuration.
//!
//! Nothing here is read from ambient global state: the process secret,
//! session lifetime, and cookie attributes are constructed by the
//! caller and handed to the actions and the HTTP layer, so every piece
//! is unit-testable with arbitrary values.

use chrono::Duration;

use crate::SecretString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    None,
    #[default]
    Lax,
    Strict,
}

/// Attributes of the session cookie: `auth_token` on the root path,
/// HttpOnly, Secure, SameSite=Lax.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub path: String,
    pub domain: Option<String>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "auth_token".to_owned(),
            path: "/".to_owned(),
            domain: None,
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
        }
    }
}

/// Authentication service configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Process-wide hashing secret. Loaded once at startup, never
    /// logged, never transmitted.
    pub secret: SecretString,
    /// Absolute session lifetime, fixed at creation. No sliding
    /// renewal.
    pub session_lifetime: Duration,
    /// Pre-shared bearer secret accepted by the machine-to-machine
    /// guard. `None` disables that credential kind.
    pub api_token: Option<SecretString>,
    pub cookie: CookieConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: SecretString::new(""),
            session_lifetime: Duration::days(7),
            api_token: None,
            cookie: CookieConfig::default(),
        }
    }
}

impl AuthConfig {
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.secret.is_empty() {
            return Err("secret must not be empty");
        }
        if self.secret.len() < 32 {
            return Err("secret should be at least 32 bytes");
        }
        Ok(())
    }
}
