//! PostgreSQL implementation of CounterRpc
//!
//! Calls the server-side increment functions. These are optional in a given
//! deployment; a missing function surfaces as `RpcUnavailable` and callers
//! fall through to their next strategy.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use linkbio_core::error::DomainError;
use linkbio_core::traits::{CounterRpc, RepoResult};

/// PostgreSQL implementation of CounterRpc backed by stored functions
#[derive(Clone)]
pub struct PgCounterRpc {
    pool: PgPool,
}

impl PgCounterRpc {
    /// Create a new PgCounterRpc
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_rpc_error(e: sqlx::Error) -> DomainError {
    // 42883 is "undefined function"; the deployment simply lacks the RPC
    if let Some(db_err) = e.as_database_error() {
        if db_err.code().as_deref() == Some("42883") {
            return DomainError::RpcUnavailable(db_err.message().to_string());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

#[async_trait]
impl CounterRpc for PgCounterRpc {
    #[instrument(skip(self))]
    async fn increment_click(&self, link_id: Uuid) -> RepoResult<()> {
        sqlx::query(
            r"
            SELECT increment_click_count($1)
            ",
        )
        .bind(link_id)
        .execute(&self.pool)
        .await
        .map_err(map_rpc_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn increment_page_views(&self, username: &str) -> RepoResult<()> {
        sqlx::query(
            r"
            SELECT increment_page_views($1)
            ",
        )
        .bind(username)
        .execute(&self.pool)
        .await
        .map_err(map_rpc_error)?;

        Ok(())
    }
}
