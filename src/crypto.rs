//! Credential hashing and token/id generation.
//!
//! The password digest is the scheme the account store was created
//! with: SHA-256 over the password concatenated with a process-wide
//! secret, base64-encoded. The secret acts as a global pepper; there is
//! no per-user salt and no iterated key derivation, so identical
//! passwords produce identical digests and an offline attacker with the
//! hash store and the secret can brute-force cheaply. Changing the
//! scheme would invalidate every stored credential, so it stays.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::SecretString;

/// Random bytes behind each bearer token (256 bits).
pub const TOKEN_BYTES: usize = 32;

/// Digests a password with the process secret.
///
/// Deterministic: the same `(password, secret)` pair always produces
/// the same stored value.
pub fn hash_password(password: &str, secret: &SecretString) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(secret.expose_secret().as_bytes());
    STANDARD.encode(hasher.finalize())
}

/// Verifies a candidate password against a stored digest.
///
/// Re-hashes and compares. A wrong password is `false`, never an error.
pub fn verify_password(password: &str, stored: &str, secret: &SecretString) -> bool {
    hash_password(password, secret) == stored
}

/// Generates an opaque bearer token: 32 bytes from the OS CSPRNG,
/// base64url-encoded without padding (43 characters).
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Generates a row identifier (UUID v4 string).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn secret() -> SecretString {
        SecretString::new("a-test-secret-that-is-long-enough!!")
    }

    #[test]
    fn hash_is_deterministic() {
        let s = secret();
        assert_eq!(hash_password("pw123", &s), hash_password("pw123", &s));
    }

    #[test]
    fn round_trip_verifies() {
        let s = secret();
        let stored = hash_password("pw123", &s);
        assert!(verify_password("pw123", &stored, &s));
    }

    #[test]
    fn wrong_password_fails() {
        let s = secret();
        let stored = hash_password("pw123", &s);
        assert!(!verify_password("pw124", &stored, &s));
        assert!(!verify_password("", &stored, &s));
    }

    #[test]
    fn wrong_secret_fails() {
        let stored = hash_password("pw123", &secret());
        assert!(!verify_password(
            "pw123",
            &stored,
            &SecretString::new("some-other-secret-also-long-enough")
        ));
    }

    #[test]
    fn same_password_same_digest_across_users() {
        // No per-user salt: two accounts with the same password store
        // the same value. Documented property of the scheme.
        let s = secret();
        assert_eq!(hash_password("shared", &s), hash_password("shared", &s));
    }

    #[test]
    fn token_decodes_to_256_bits() {
        let token = generate_token();
        let bytes = URL_SAFE_NO_PAD.decode(&token).unwrap();
        assert_eq!(bytes.len(), TOKEN_BYTES);
    }

    #[test]
    fn tokens_do_not_collide() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(generate_token()));
        }
    }

    #[test]
    fn token_is_cookie_safe() {
        let token = generate_token();
        assert_eq!(token.len(), 43);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(generate_id(), generate_id());
    }
}
