//! Username availability handler

use axum::extract::{Query, State};

use linkbio_core::traits::ProfileRepository;
use linkbio_core::value_objects::username::validate_username;
use linkbio_service::dto::{UsernameCheckQuery, UsernameCheckResponse};

use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Check whether a username is valid and free
///
/// GET /api/v1/username-check?username=alex
pub async fn check_username(
    State(state): State<AppState>,
    Query(query): Query<UsernameCheckQuery>,
) -> ApiResult<ApiJson<UsernameCheckResponse>> {
    if let Err(e) = validate_username(&query.username) {
        return Ok(ApiJson(UsernameCheckResponse {
            available: false,
            reason: Some(e.to_string()),
        }));
    }

    let taken = state
        .service_context()
        .profile_repo()
        .username_exists(&query.username)
        .await?;

    Ok(ApiJson(UsernameCheckResponse {
        available: !taken,
        reason: taken.then(|| "Username is already taken".to_string()),
    }))
}
