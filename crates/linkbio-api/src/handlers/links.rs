//! Link handlers
//!
//! Link CRUD over the optimistic collection. Plan gating happens here, at
//! the caller side: the link ceiling on create, and the scheduled-links
//! capability on create and update. The synchronizer itself only refuses
//! empty fields.

use std::str::FromStr;

use axum::{
    extract::{Path, State},
    Json,
};

use linkbio_core::plan::{plan_limits, required_plan, Capability, Plan};
use linkbio_core::traits::LinkPatch;
use linkbio_core::value_objects::LinkKey;
use linkbio_service::dto::{
    CreateLinkRequest, LinkResponse, ReorderLinksRequest, UpdateLinkRequest,
};
use linkbio_service::ServiceError;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiJson, ApiResult, Created, NoContent};
use crate::state::AppState;

fn parse_key(raw: &str) -> ApiResult<LinkKey> {
    LinkKey::from_str(raw).map_err(|e| ApiError::invalid_path(e.to_string()))
}

/// Lowest tier whose link ceiling admits one more link
fn plan_for_more_links(count: u32) -> &'static str {
    Plan::ALL
        .iter()
        .find(|plan| plan_limits(**plan).max_links > count)
        .map_or(Plan::Business.as_str(), |plan| plan.as_str())
}

/// Create a link (optimistic draft, persisted in the background)
///
/// POST /api/v1/links
pub async fn create_link(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateLinkRequest>,
) -> ApiResult<Created<ApiJson<LinkResponse>>> {
    let sync = state.session(user.identity.id);
    let snapshot = sync.ensure_loaded(user.identity).await;

    let limits = plan_limits(snapshot.profile.plan);
    let count = u32::try_from(snapshot.links.len()).unwrap_or(u32::MAX);
    if count >= limits.max_links {
        return Err(ServiceError::plan_denied(plan_for_more_links(count)).into());
    }
    if req.scheduled_at.is_some() && !limits.has_scheduled_links {
        let required = required_plan(Capability::ScheduledLinks);
        return Err(ServiceError::plan_denied(required.as_str()).into());
    }

    let link = sync.add_link(&req.title, &req.url, req.scheduled_at).await?;
    Ok(Created(ApiJson(LinkResponse::from(&link))))
}

/// Apply a partial update to a link
///
/// PATCH /api/v1/links/{key}
pub async fn update_link(
    State(state): State<AppState>,
    user: AuthUser,
    Path(raw_key): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateLinkRequest>,
) -> ApiResult<ApiJson<LinkResponse>> {
    let key = parse_key(&raw_key)?;
    let sync = state.session(user.identity.id);
    let snapshot = sync.ensure_loaded(user.identity).await;

    if req.scheduled_at.is_some() && !plan_limits(snapshot.profile.plan).has_scheduled_links {
        let required = required_plan(Capability::ScheduledLinks);
        return Err(ServiceError::plan_denied(required.as_str()).into());
    }

    let patch = LinkPatch {
        title: req.title,
        url: req.url,
        icon: req.icon,
        position: req.position,
        is_active: req.is_active,
        scheduled_at: req.scheduled_at,
        clear_schedule: req.clear_schedule,
    };

    let link = sync.update_link(&key, &patch).await?;
    Ok(ApiJson(LinkResponse::from(&link)))
}

/// Remove a link
///
/// DELETE /api/v1/links/{key}
pub async fn delete_link(
    State(state): State<AppState>,
    user: AuthUser,
    Path(raw_key): Path<String>,
) -> ApiResult<NoContent> {
    let key = parse_key(&raw_key)?;
    let sync = state.session(user.identity.id);
    sync.ensure_loaded(user.identity).await;

    if sync.remove_link(&key).await {
        Ok(NoContent)
    } else {
        Err(ServiceError::not_found("Link", key.to_string()).into())
    }
}

/// Reorder links to the given key order
///
/// PUT /api/v1/links/reorder
pub async fn reorder_links(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<ReorderLinksRequest>,
) -> ApiResult<ApiJson<Vec<LinkResponse>>> {
    let sync = state.session(user.identity.id);
    sync.ensure_loaded(user.identity).await;

    let links = sync.reorder_links(&req.keys).await;
    Ok(ApiJson(links.iter().map(LinkResponse::from).collect()))
}
