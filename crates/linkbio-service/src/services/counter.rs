//! Best-effort click/view counter
//!
//! Strict fallback chain, one attempt per strategy:
//!
//! 1. read-modify-write through the public-credential repository
//! 2. the same read-modify-write through the privileged repository
//! 3. the server-side atomic increment RPC
//! 4. all failed: soft outcome, never an error
//!
//! A missing target row is a no-op success at whichever step discovers it.
//! No retries and no locking; concurrent increments race by contract.

use tracing::{debug, instrument, warn};
use uuid::Uuid;

use linkbio_core::traits::{LinkRepository, ProfileRepository};

use super::context::ServiceContext;

/// Outcome of a tracking attempt. The HTTP layer answers 200 either way;
/// `counted` reports whether any strategy landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackOutcome {
    pub counted: bool,
}

/// One read-modify-write attempt
enum Rmw {
    Applied,
    Missing,
    Failed,
}

/// Click/view counter service
pub struct CounterService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CounterService<'a> {
    /// Create a new CounterService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record one click against a link
    #[instrument(skip(self))]
    pub async fn track_click(&self, link_id: Uuid) -> TrackOutcome {
        match rmw_click(self.ctx.link_repo(), link_id).await {
            Rmw::Applied | Rmw::Missing => return TrackOutcome { counted: true },
            Rmw::Failed => {}
        }

        if let Some(repo) = self.ctx.privileged_link_repo() {
            match rmw_click(repo, link_id).await {
                Rmw::Applied | Rmw::Missing => return TrackOutcome { counted: true },
                Rmw::Failed => {}
            }
        }

        if let Some(rpc) = self.ctx.counter_rpc() {
            match rpc.increment_click(link_id).await {
                Ok(()) => return TrackOutcome { counted: true },
                Err(e) => debug!(error = %e, "click increment RPC unavailable"),
            }
        }

        warn!(%link_id, "click not counted, all strategies failed");
        TrackOutcome { counted: false }
    }

    /// Record one page view against a profile, by username
    #[instrument(skip(self))]
    pub async fn track_view(&self, username: &str) -> TrackOutcome {
        match rmw_view(self.ctx.profile_repo(), username).await {
            Rmw::Applied | Rmw::Missing => return TrackOutcome { counted: true },
            Rmw::Failed => {}
        }

        if let Some(repo) = self.ctx.privileged_profile_repo() {
            match rmw_view(repo, username).await {
                Rmw::Applied | Rmw::Missing => return TrackOutcome { counted: true },
                Rmw::Failed => {}
            }
        }

        if let Some(rpc) = self.ctx.counter_rpc() {
            match rpc.increment_page_views(username).await {
                Ok(()) => return TrackOutcome { counted: true },
                Err(e) => debug!(error = %e, "view increment RPC unavailable"),
            }
        }

        warn!(username, "page view not counted, all strategies failed");
        TrackOutcome { counted: false }
    }
}

async fn rmw_click(repo: &dyn LinkRepository, link_id: Uuid) -> Rmw {
    match repo.get_click_count(link_id).await {
        Ok(Some(current)) => match repo.set_click_count(link_id, current + 1).await {
            Ok(true) => Rmw::Applied,
            Ok(false) => Rmw::Missing,
            Err(e) => {
                debug!(error = %e, "click counter write failed");
                Rmw::Failed
            }
        },
        Ok(None) => Rmw::Missing,
        Err(e) => {
            debug!(error = %e, "click counter read failed");
            Rmw::Failed
        }
    }
}

async fn rmw_view(repo: &dyn ProfileRepository, username: &str) -> Rmw {
    match repo.get_page_views(username).await {
        Ok(Some(current)) => match repo.set_page_views(username, current + 1).await {
            Ok(true) => Rmw::Applied,
            Ok(false) => Rmw::Missing,
            Err(e) => {
                debug!(error = %e, "view counter write failed");
                Rmw::Failed
            }
        },
        Ok(None) => Rmw::Missing,
        Err(e) => {
            debug!(error = %e, "view counter read failed");
            Rmw::Failed
        }
    }
}
