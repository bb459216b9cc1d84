//! Session handlers
//!
//! The session endpoints expose the synchronizer's lifecycle: load on
//! first request, explicit refresh, and sign-out.

use axum::extract::State;

use linkbio_service::dto::{LinkResponse, ProfileResponse, SessionResponse};
use linkbio_service::SessionSnapshot;

use crate::extractors::AuthUser;
use crate::response::{ApiJson, ApiResult, NoContent};
use crate::state::AppState;

/// Render a snapshot in its wire shape
pub fn session_response(snapshot: &SessionSnapshot) -> SessionResponse {
    SessionResponse {
        phase: snapshot.phase.as_str().to_string(),
        profile: ProfileResponse::from(&snapshot.profile),
        links: snapshot.links.iter().map(LinkResponse::from).collect(),
        avatar_preview: snapshot.avatar_preview.clone(),
    }
}

/// Get the current session snapshot, loading (and provisioning) on first call
///
/// GET /api/v1/session
pub async fn get_session(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<ApiJson<SessionResponse>> {
    let sync = state.session(user.identity.id);
    let snapshot = sync.ensure_loaded(user.identity).await;
    Ok(ApiJson(session_response(&snapshot)))
}

/// Re-fetch profile and links, keeping current data on failure
///
/// POST /api/v1/session/refresh
pub async fn refresh_session(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<ApiJson<SessionResponse>> {
    let sync = state.session(user.identity.id);
    sync.ensure_loaded(user.identity).await;
    let snapshot = sync.refresh_data().await;
    Ok(ApiJson(session_response(&snapshot)))
}

/// Sign out: best-effort remote invalidation, unconditional local reset
///
/// POST /api/v1/session/sign-out
pub async fn sign_out(State(state): State<AppState>, user: AuthUser) -> ApiResult<NoContent> {
    let sync = state.session(user.identity.id);
    sync.sign_out().await;
    state.drop_session(user.identity.id);
    Ok(NoContent)
}
