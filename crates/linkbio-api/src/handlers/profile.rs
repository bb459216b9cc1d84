//! Profile handlers
//!
//! Optimistic profile mutations: the persisted variant applies locally and
//! pushes best-effort, the local variant never touches the store (used for
//! staged edits the client has not committed yet).

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
};

use linkbio_core::traits::ProfilePatch;
use linkbio_core::value_objects::username::validate_username;
use linkbio_core::value_objects::Theme;
use linkbio_service::dto::{AvatarResponse, ProfileResponse, UpdateProfileRequest};
use linkbio_service::ServiceError;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiJson, ApiResult};
use crate::state::AppState;

fn profile_patch(req: UpdateProfileRequest) -> ApiResult<ProfilePatch> {
    if let Some(username) = &req.username {
        validate_username(username)
            .map_err(|e| ApiError::Service(ServiceError::validation(e.to_string())))?;
    }

    Ok(ProfilePatch {
        username: req.username,
        display_name: req.display_name,
        bio: req.bio,
        avatar_url: req.avatar_url,
        theme: req.theme.map(|t| Theme::from_parts(&t.name, t.colors)),
        plan: None,
    })
}

/// Apply a partial profile update locally and push it to the store
///
/// PATCH /api/v1/profile
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<ApiJson<ProfileResponse>> {
    let patch = profile_patch(req)?;
    let sync = state.session(user.identity.id);
    sync.ensure_loaded(user.identity).await;

    let profile = sync.update_profile(patch).await?;
    Ok(ApiJson(ProfileResponse::from(&profile)))
}

/// Apply a partial profile update to local state only
///
/// PATCH /api/v1/profile/local
pub async fn update_profile_local(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<ApiJson<ProfileResponse>> {
    let patch = profile_patch(req)?;
    let sync = state.session(user.identity.id);
    sync.ensure_loaded(user.identity).await;

    let profile = sync.update_profile_local(&patch)?;
    Ok(ApiJson(ProfileResponse::from(&profile)))
}

/// Upload an avatar image as raw bytes under the identity's fixed key
///
/// PUT /api/v1/profile/avatar
pub async fn upload_avatar(
    State(state): State<AppState>,
    user: AuthUser,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<ApiJson<AvatarResponse>> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
        .ok_or_else(|| ApiError::invalid_query("Missing content-type header"))?;

    let max_bytes = u64::from(state.config().storage.max_file_size_mb) * 1024 * 1024;
    if body.len() as u64 > max_bytes {
        return Err(ServiceError::validation(format!(
            "Avatar exceeds the {} MB limit",
            state.config().storage.max_file_size_mb
        ))
        .into());
    }

    let sync = state.session(user.identity.id);
    sync.ensure_loaded(user.identity).await;

    let avatar_url = sync.upload_avatar(&body, &content_type).await?;
    Ok(ApiJson(AvatarResponse { avatar_url }))
}
