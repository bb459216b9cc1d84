//! Click and page view tracking handlers
//!
//! Unauthenticated, lenient-body endpoints for the public page. Both
//! answer 200 whether or not the count landed; `counted` in the body
//! reports the actual outcome.

use axum::extract::State;

use linkbio_service::dto::{TrackClickRequest, TrackResponse, TrackViewRequest};
use linkbio_service::CounterService;

use crate::extractors::LenientJson;
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Record one click against a link
///
/// POST /api/v1/track/click
pub async fn track_click(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<TrackClickRequest>,
) -> ApiResult<ApiJson<TrackResponse>> {
    let outcome = CounterService::new(state.service_context())
        .track_click(req.link_id)
        .await;

    Ok(ApiJson(TrackResponse {
        success: true,
        counted: outcome.counted,
    }))
}

/// Record one page view against a profile
///
/// POST /api/v1/track/view
pub async fn track_view(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<TrackViewRequest>,
) -> ApiResult<ApiJson<TrackResponse>> {
    let outcome = CounterService::new(state.service_context())
        .track_view(&req.username)
        .await;

    Ok(ApiJson(TrackResponse {
        success: true,
        counted: outcome.counted,
    }))
}
