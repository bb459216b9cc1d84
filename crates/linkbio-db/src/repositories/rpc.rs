//! PostgreSQL-backed adapters for the identity and promo ports
//!
//! Both collaborators are opaque server-side procedures living next to the
//! data, same shape as the counter RPC: a missing function surfaces as
//! `RpcUnavailable` and callers degrade per their own contract.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use linkbio_core::error::DomainError;
use linkbio_core::plan::Plan;
use linkbio_core::traits::{IdentityProvider, PromoOutcome, PromoRedeemer, RepoResult};

fn map_rpc_error(e: sqlx::Error) -> DomainError {
    // 42883 is "undefined function"; the deployment simply lacks the RPC
    if let Some(db_err) = e.as_database_error() {
        if db_err.code().as_deref() == Some("42883") {
            return DomainError::RpcUnavailable(db_err.message().to_string());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Identity provider adapter backed by a server-side revocation function
#[derive(Clone)]
pub struct PgIdentityProvider {
    pool: PgPool,
}

impl PgIdentityProvider {
    /// Create a new PgIdentityProvider
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityProvider for PgIdentityProvider {
    #[instrument(skip(self))]
    async fn sign_out(&self, identity_id: Uuid) -> RepoResult<()> {
        sqlx::query(
            r"
            SELECT revoke_identity_sessions($1)
            ",
        )
        .bind(identity_id)
        .execute(&self.pool)
        .await
        .map_err(map_rpc_error)?;

        Ok(())
    }
}

/// Promo redemption adapter backed by a payment-side stored function.
///
/// The function validates the code, applies the plan change server-side,
/// and reports the outcome; this adapter never interprets codes itself.
#[derive(Clone)]
pub struct PgPromoRedeemer {
    pool: PgPool,
}

impl PgPromoRedeemer {
    /// Create a new PgPromoRedeemer
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromoRedeemer for PgPromoRedeemer {
    #[instrument(skip(self, code))]
    async fn redeem(&self, code: &str, profile_id: Uuid) -> RepoResult<PromoOutcome> {
        let row: (bool, Option<String>, Option<String>) = sqlx::query_as(
            r"
            SELECT success, plan, message
            FROM redeem_promo_code($1, $2)
            ",
        )
        .bind(code)
        .bind(profile_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_rpc_error)?;

        let (success, plan, message) = row;
        Ok(PromoOutcome {
            success,
            plan: plan.as_deref().map(Plan::from_str_lossy),
            message,
        })
    }
}
