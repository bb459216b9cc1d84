//! Authentication extractor
//!
//! Extracts and validates identity tokens from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use linkbio_core::Identity;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated identity extracted from the bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Identity assembled from the token claims
    pub identity: Identity,
}

impl AuthUser {
    /// Create a new AuthUser
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the Authorization header
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        // Validate the token
        let claims = app_state
            .token_verifier()
            .verify(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid identity token");
                ApiError::App(e)
            })?;

        // Assemble the domain identity from the claims
        let identity = claims.identity().map_err(|e| {
            tracing::warn!(error = %e, "Invalid subject in token");
            ApiError::App(e)
        })?;

        Ok(AuthUser::new(identity))
    }
}
