//! Promo code redemption
//!
//! Thin wrapper over the opaque payment-side RPC. The only synchronous
//! rejection is an empty code; everything else, including RPC failure,
//! comes back as a soft outcome so the HTTP layer can answer 200. The
//! caller refreshes its session afterwards to pick up the server-computed
//! plan change.

use tracing::{info, instrument, warn};
use uuid::Uuid;

use linkbio_core::traits::PromoOutcome;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Promo redemption service
pub struct PromoService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PromoService<'a> {
    /// Create a new PromoService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Redeem a promo code for a profile. The code is trimmed and
    /// uppercased before hitting the backend.
    #[instrument(skip(self, code))]
    pub async fn redeem(&self, code: &str, profile_id: Uuid) -> ServiceResult<PromoOutcome> {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            return Err(ServiceError::validation("Promo code must not be empty"));
        }

        match self.ctx.promo_redeemer().redeem(&code, profile_id).await {
            Ok(outcome) => {
                if outcome.success {
                    info!(plan = ?outcome.plan, "promo code redeemed");
                }
                Ok(outcome)
            }
            Err(e) => {
                warn!(error = %e, "promo redemption backend failed");
                Ok(PromoOutcome {
                    success: false,
                    plan: None,
                    message: Some("Could not redeem the code, try again later".to_string()),
                })
            }
        }
    }
}
