//! Promo code redemption handler

use axum::{extract::State, Json};

use linkbio_service::dto::{PromoResponse, RedeemPromoRequest};
use linkbio_service::PromoService;

use crate::extractors::AuthUser;
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Redeem a promo code for the authenticated profile. Backend failure is a
/// soft outcome, not an error; clients refresh the session afterwards to
/// pick up the plan change.
///
/// POST /api/v1/promo/redeem
pub async fn redeem_promo(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<RedeemPromoRequest>,
) -> ApiResult<ApiJson<PromoResponse>> {
    let outcome = PromoService::new(state.service_context())
        .redeem(&req.code, user.identity.id)
        .await?;

    Ok(ApiJson(PromoResponse {
        success: outcome.success,
        plan: outcome.plan.map(|p| p.as_str().to_string()),
        message: outcome.message,
    }))
}
