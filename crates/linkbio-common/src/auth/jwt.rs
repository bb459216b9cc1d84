//! JWT verification for identity tokens
//!
//! Tokens are minted by the external identity provider; this server only
//! validates them and extracts the identity claims used for provisioning.

use chrono::Utc;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use linkbio_core::{Identity, IdentityMetadata};

use crate::error::AppError;

/// Claims carried by an identity token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject (identity id)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl IdentityClaims {
    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Assemble the domain identity from the claims
    ///
    /// # Errors
    /// Returns an error if the subject is not a valid identity id
    pub fn identity(&self) -> Result<Identity, AppError> {
        let id = Uuid::parse_str(&self.sub).map_err(|_| AppError::InvalidToken)?;
        Ok(Identity::new(
            id,
            IdentityMetadata {
                username: self.username.clone(),
                email: self.email.clone(),
                full_name: self.full_name.clone(),
                avatar_url: self.avatar_url.clone(),
            },
        ))
    }
}

/// Verifier for identity tokens
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier for the shared-secret scheme
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    /// Validate a token and return its claims
    ///
    /// # Errors
    /// Returns `AppError::InvalidToken` on any signature/shape failure and
    /// `AppError::TokenExpired` when the token is past its expiry.
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, AppError> {
        let data = decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })?;
        Ok(data.claims)
    }
}
