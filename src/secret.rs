//! Redacting wrapper for sensitive strings.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A string whose `Debug` and `Display` output is `[REDACTED]`.
///
/// Used for the process secret, the gateway bearer token, and issued
/// session tokens so none of them leak through logging.
///
/// ```rust
/// use anteroom::SecretString;
///
/// let secret = SecretString::new("hunter2");
/// assert_eq!(format!("{secret:?}"), "SecretString([REDACTED])");
/// assert_eq!(secret.expose_secret(), "hunter2");
/// ```
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Exposes the underlying value. Call only at the point of use
    /// (hashing input, outbound Authorization header, response body).
    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecretString {}

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialization exposes the value: issued tokens travel in API
        // responses.
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_is_redacted() {
        let secret = SecretString::new("my_password");
        assert_eq!(format!("{secret:?}"), "SecretString([REDACTED])");
    }

    #[test]
    fn display_is_redacted() {
        let secret = SecretString::new("my_password");
        assert_eq!(format!("{secret}"), "[REDACTED]");
    }

    #[test]
    fn expose_returns_value() {
        let secret = SecretString::new("my_password");
        assert_eq!(secret.expose_secret(), "my_password");
    }

    #[test]
    fn serializes_as_plain_string() {
        let secret = SecretString::new("issued_token");
        let json = serde_json::to_string(&secret).unwrap();
        assert_eq!(json, "\"issued_token\"");
    }

    #[test]
    fn deserializes_from_plain_string() {
        let secret: SecretString = serde_json::from_str("\"issued_token\"").unwrap();
        assert_eq!(secret.expose_secret(), "issued_token");
    }
}
