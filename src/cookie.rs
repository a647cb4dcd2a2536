//! Session cookie construction and extraction.
//!
//! The cookie carries the bearer token itself; possession of the value
//! is the whole credential. Issuance sets `Max-Age` to the session
//! lifetime; clearing keeps the same security attributes with
//! `Max-Age=0`.

use chrono::Duration;
use cookie::time::Duration as CookieDuration;
use cookie::{Cookie, SameSite as RawSameSite};

use crate::config::{CookieConfig, SameSite};

fn same_site(value: SameSite) -> RawSameSite {
    match value {
        SameSite::None => RawSameSite::None,
        SameSite::Lax => RawSameSite::Lax,
        SameSite::Strict => RawSameSite::Strict,
    }
}

fn base_cookie(value: String, config: &CookieConfig) -> Cookie<'static> {
    let mut cookie = Cookie::new(config.name.clone(), value);
    cookie.set_path(config.path.clone());
    cookie.set_secure(config.secure);
    cookie.set_http_only(config.http_only);
    cookie.set_same_site(same_site(config.same_site));
    if let Some(ref domain) = config.domain {
        cookie.set_domain(domain.clone());
    }
    cookie
}

/// Builds the issuance cookie for a freshly created session.
pub fn session_cookie(token: &str, lifetime: Duration, config: &CookieConfig) -> Cookie<'static> {
    let mut cookie = base_cookie(token.to_owned(), config);
    cookie.set_max_age(CookieDuration::seconds(lifetime.num_seconds()));
    cookie
}

/// Builds the clearing cookie sent on sign-out.
pub fn removal_cookie(config: &CookieConfig) -> Cookie<'static> {
    let mut cookie = base_cookie(String::new(), config);
    cookie.set_max_age(CookieDuration::ZERO);
    cookie
}

/// Pulls the session token out of a raw `Cookie` request header.
pub fn extract_session_token(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key.trim() == name {
            Some(value.trim().to_owned())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issuance_cookie_carries_contract_attributes() {
        let config = CookieConfig::default();
        let rendered = session_cookie("tok123", Duration::days(7), &config).to_string();

        assert!(rendered.starts_with("auth_token=tok123"));
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("Secure"));
        assert!(rendered.contains("SameSite=Lax"));
        assert!(rendered.contains("Max-Age=604800"));
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let config = CookieConfig::default();
        let rendered = removal_cookie(&config).to_string();

        assert!(rendered.starts_with("auth_token="));
        assert!(rendered.contains("Max-Age=0"));
        // Clearing keeps the security attributes.
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("Secure"));
        assert!(rendered.contains("SameSite=Lax"));
    }

    #[test]
    fn extracts_token_from_header() {
        assert_eq!(
            extract_session_token("auth_token=abc123", "auth_token"),
            Some("abc123".to_owned())
        );
        assert_eq!(
            extract_session_token("theme=dark; auth_token=abc123; lang=en", "auth_token"),
            Some("abc123".to_owned())
        );
    }

    #[test]
    fn missing_cookie_yields_none() {
        assert_eq!(extract_session_token("theme=dark", "auth_token"), None);
        assert_eq!(extract_session_token("", "auth_token"), None);
    }

    #[test]
    fn does_not_match_name_prefixes() {
        assert_eq!(
            extract_session_token("xauth_token=abc", "auth_token"),
            None
        );
    }
}
