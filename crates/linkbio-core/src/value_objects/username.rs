//! Username rules - validation, sanitization, and provisioning derivation

use thiserror::Error;
use uuid::Uuid;

/// Minimum username length
pub const MIN_USERNAME_LEN: usize = 3;
/// Maximum username length
pub const MAX_USERNAME_LEN: usize = 30;

/// Usernames that collide with routes or branding and can never be claimed
pub const RESERVED_USERNAMES: &[&str] = &[
    "admin",
    "demo",
    "test",
    "user",
    "help",
    "support",
    "about",
    "blog",
    "api",
    "app",
    "www",
    "mail",
    "dashboard",
    "auth",
    "pricing",
    "privacy",
    "terms",
];

/// Reason a username is not acceptable
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username must be {MIN_USERNAME_LEN}-{MAX_USERNAME_LEN} characters")]
    InvalidLength,

    #[error("Username may only contain a-z, 0-9, '_' and '-'")]
    InvalidCharacters,

    #[error("Username is reserved")]
    Reserved,
}

#[inline]
fn is_allowed_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'
}

/// Validate a username against length, charset, and the reserved list
pub fn validate_username(username: &str) -> Result<(), UsernameError> {
    if username.len() < MIN_USERNAME_LEN || username.len() > MAX_USERNAME_LEN {
        return Err(UsernameError::InvalidLength);
    }
    if !username.chars().all(is_allowed_char) {
        return Err(UsernameError::InvalidCharacters);
    }
    if RESERVED_USERNAMES.contains(&username) {
        return Err(UsernameError::Reserved);
    }
    Ok(())
}

/// Strip a candidate down to the allowed character set (lowercasing first)
pub fn sanitize_username(candidate: &str) -> String {
    candidate
        .to_lowercase()
        .chars()
        .filter(|c| is_allowed_char(*c))
        .collect()
}

/// Derive a username for a freshly provisioned profile.
///
/// Priority order: explicit username claim, then the sanitized local part of
/// the email, then a generated fallback from the identity id.
pub fn derive_username(claim: Option<&str>, email: Option<&str>, identity_id: Uuid) -> String {
    if let Some(claim) = claim {
        if !claim.is_empty() {
            return claim.to_string();
        }
    }

    if let Some(email) = email {
        let local_part = email.split('@').next().unwrap_or("");
        let sanitized = sanitize_username(local_part);
        if !sanitized.is_empty() {
            return sanitized;
        }
    }

    let id = identity_id.simple().to_string();
    format!("user_{}", &id[..8])
}
