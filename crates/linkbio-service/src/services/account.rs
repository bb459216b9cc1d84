//! Account deletion
//!
//! Sub-steps run in a fixed order and failures are collected rather than
//! aborting: a half-deleted account is reported as Partial with the names
//! of the failed sub-resources so the caller can retry or surface it.

use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::context::ServiceContext;

/// Result of an account deletion attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    /// Every sub-step succeeded
    Complete,
    /// Some sub-resources could not be removed
    Partial { failed: Vec<&'static str> },
}

impl DeletionOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Names of the failed sub-steps, empty when complete
    pub fn failed_steps(&self) -> &[&'static str] {
        match self {
            Self::Complete => &[],
            Self::Partial { failed } => failed,
        }
    }
}

/// Account deletion service
pub struct AccountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountService<'a> {
    /// Create a new AccountService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Delete everything owned by an identity: avatar blob, links, profile
    /// row, then the remote session. Steps run in order; a failed step is
    /// recorded and the remaining steps still run.
    #[instrument(skip(self))]
    pub async fn delete_account(&self, identity_id: Uuid) -> DeletionOutcome {
        let mut failed = Vec::new();

        let avatar_key = identity_id.simple().to_string();
        if let Err(e) = self.ctx.blob_store().delete(&avatar_key).await {
            warn!(error = %e, "avatar deletion failed");
            failed.push("avatar");
        }

        match self.ctx.link_repo().delete_by_profile(identity_id).await {
            Ok(count) => info!(count, "links deleted"),
            Err(e) => {
                warn!(error = %e, "link deletion failed");
                failed.push("links");
            }
        }

        match self.ctx.profile_repo().delete(identity_id).await {
            Ok(()) => {}
            // A missing row means there is nothing left to delete
            Err(e) if e.is_not_found() => {}
            Err(e) => {
                warn!(error = %e, "profile deletion failed");
                failed.push("profile");
            }
        }

        if let Err(e) = self.ctx.identity_provider().sign_out(identity_id).await {
            warn!(error = %e, "identity sign-out failed");
            failed.push("identity");
        }

        if failed.is_empty() {
            info!(%identity_id, "account deleted");
            DeletionOutcome::Complete
        } else {
            warn!(%identity_id, ?failed, "account deletion incomplete");
            DeletionOutcome::Partial { failed }
        }
    }
}
