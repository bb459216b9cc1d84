//! Account deletion handler

use axum::extract::State;

use linkbio_service::dto::DeletionResponse;
use linkbio_service::AccountService;

use crate::extractors::AuthUser;
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Delete the authenticated account: avatar, links, profile row, remote
/// session. Partial failures are reported, not hidden.
///
/// DELETE /api/v1/account
pub async fn delete_account(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<ApiJson<DeletionResponse>> {
    let outcome = AccountService::new(state.service_context())
        .delete_account(user.identity.id)
        .await;
    state.drop_session(user.identity.id);

    let status = if outcome.is_complete() {
        "complete"
    } else {
        "partial"
    };

    Ok(ApiJson(DeletionResponse {
        status: status.to_string(),
        failed: outcome
            .failed_steps()
            .iter()
            .map(ToString::to_string)
            .collect(),
    }))
}
