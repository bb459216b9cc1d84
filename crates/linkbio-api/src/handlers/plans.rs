//! Plan policy handlers
//!
//! Read-only views over the static plan table, used by the client to
//! render gates and upsell prompts without hardcoding the policy.

use std::str::FromStr;

use axum::extract::Query;
use serde::Deserialize;

use linkbio_core::plan::{plan_limits, required_plan, Capability, Plan};
use linkbio_service::dto::{PlanLimitsResponse, RequiredPlanResponse};

use crate::response::{ApiError, ApiJson, ApiResult};

/// Query for the plan limits endpoint; unknown or absent plans fall back
/// to the free tier
#[derive(Debug, Deserialize)]
pub struct PlanLimitsQuery {
    pub plan: Option<String>,
}

/// Query for the required plan endpoint
#[derive(Debug, Deserialize)]
pub struct RequiredPlanQuery {
    pub capability: String,
}

/// Get the limit table for a plan tier
///
/// GET /api/v1/plans/limits?plan=pro
pub async fn get_plan_limits(
    Query(query): Query<PlanLimitsQuery>,
) -> ApiResult<ApiJson<PlanLimitsResponse>> {
    let plan = query
        .plan
        .as_deref()
        .map_or(Plan::Free, Plan::from_str_lossy);

    Ok(ApiJson(PlanLimitsResponse::new(plan, &plan_limits(plan))))
}

/// Get the lowest tier that grants a capability
///
/// GET /api/v1/plans/required?capability=scheduled_links
pub async fn get_required_plan(
    Query(query): Query<RequiredPlanQuery>,
) -> ApiResult<ApiJson<RequiredPlanResponse>> {
    let capability = Capability::from_str(&query.capability).map_err(|()| {
        ApiError::invalid_query(format!("Unknown capability: {}", query.capability))
    })?;

    Ok(ApiJson(RequiredPlanResponse {
        capability: capability.as_str().to_string(),
        required_plan: required_plan(capability).as_str().to_string(),
    }))
}
