//! Security-property suite.
//!
//! Exercises the documented guarantees of the credential scheme, the
//! bearer tokens, and the cookie contract through the public API.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::collections::HashSet;

use anteroom::cookie::{removal_cookie, session_cookie};
use anteroom::crypto::{generate_token, hash_password, verify_password, TOKEN_BYTES};
use anteroom::{AuthError, CookieConfig, SecretString};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Duration;

// =============================================================================
// Credential scheme
// =============================================================================

#[test]
fn digest_round_trip_verifies() {
    let secret = SecretString::new("process-secret-used-for-all-hashing!");
    let stored = hash_password("pw123", &secret);

    assert!(verify_password("pw123", &stored, &secret));
    assert!(!verify_password("pw124", &stored, &secret));
}

#[test]
fn digest_is_deterministic_per_secret() {
    let secret = SecretString::new("process-secret-used-for-all-hashing!");
    assert_eq!(
        hash_password("pw123", &secret),
        hash_password("pw123", &secret)
    );

    // A different process secret invalidates every stored digest.
    let rotated = SecretString::new("a-rotated-secret-breaks-verification");
    assert!(!verify_password(
        "pw123",
        &hash_password("pw123", &secret),
        &rotated
    ));
}

#[test]
fn digest_is_printable_and_fixed_length() {
    let secret = SecretString::new("process-secret-used-for-all-hashing!");
    let stored = hash_password("pw123", &secret);

    // base64 of a 256-bit digest.
    assert_eq!(stored.len(), 44);
    assert!(stored.chars().all(|c| c.is_ascii_graphic()));
}

#[test]
fn wrong_password_is_false_not_an_error() {
    let secret = SecretString::new("process-secret-used-for-all-hashing!");
    let stored = hash_password("correct", &secret);

    // Any garbage candidate just fails to verify.
    assert!(!verify_password("", &stored, &secret));
    assert!(!verify_password("\0\0\0", &stored, &secret));
    assert!(!verify_password(&"x".repeat(10_000), &stored, &secret));
}

// =============================================================================
// Bearer tokens
// =============================================================================

#[test]
fn tokens_carry_256_bits_of_randomness() {
    for _ in 0..100 {
        let token = generate_token();
        let bytes = URL_SAFE_NO_PAD.decode(&token).unwrap();
        assert_eq!(bytes.len(), TOKEN_BYTES);
    }
}

#[test]
fn ten_thousand_tokens_do_not_collide() {
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        assert!(seen.insert(generate_token()));
    }
}

// =============================================================================
// Cookie contract
// =============================================================================

#[test]
fn issued_cookie_is_locked_down() {
    let rendered =
        session_cookie("tok", Duration::days(7), &CookieConfig::default()).to_string();

    assert!(rendered.contains("HttpOnly"));
    assert!(rendered.contains("Secure"));
    assert!(rendered.contains("SameSite=Lax"));
    assert!(rendered.contains("Path=/"));
    assert!(rendered.contains("Max-Age=604800"));
}

#[test]
fn clearing_cookie_keeps_security_attributes() {
    let rendered = removal_cookie(&CookieConfig::default()).to_string();

    assert!(rendered.contains("Max-Age=0"));
    assert!(rendered.contains("HttpOnly"));
    assert!(rendered.contains("Secure"));
    assert!(rendered.contains("SameSite=Lax"));
}

// =============================================================================
// Information leaks
// =============================================================================

#[test]
fn secrets_redact_in_debug_and_display() {
    let secret = SecretString::new("the-process-secret");
    assert!(!format!("{secret:?}").contains("the-process-secret"));
    assert!(!format!("{secret}").contains("the-process-secret"));
}

#[test]
fn credential_error_does_not_name_a_cause() {
    let message = AuthError::InvalidCredentials.to_string();
    assert_eq!(message, "Invalid credentials");
    assert!(!message.to_lowercase().contains("email"));
    assert!(!message.to_lowercase().contains("password"));
    assert!(!message.to_lowercase().contains("user"));
}
