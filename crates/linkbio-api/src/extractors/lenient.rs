//! Lenient JSON extractor for beacon-style requests
//!
//! Browsers sending tracking beacons on page unload cannot always set a
//! content type, so the body may arrive as `text/plain` (or nothing at
//! all). This extractor ignores the content type and parses the raw bytes
//! as JSON.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// JSON extractor that ignores the request content type
#[derive(Debug, Clone)]
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for LenientJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::invalid_query("Unreadable request body"))?;

        let value = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Ok(LenientJson(value))
    }
}
