//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. External collaborators (identity provider,
//! blob store, counter RPC, promo backend) are ports too - thin contracts,
//! never concrete clients.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{Link, NewLink, NewProfile, Profile};
use crate::error::DomainError;
use crate::plan::Plan;
use crate::value_objects::Theme;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Profile Repository
// ============================================================================

/// Partial update payload for a profile row.
///
/// `None` means "leave unchanged". For nullable text fields an empty string
/// clears the column. The id and created_at are immutable and deliberately
/// absent from this type.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub theme: Option<Theme>,
    pub plan: Option<Plan>,
}

impl ProfilePatch {
    /// Check whether the patch changes anything at all
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.display_name.is_none()
            && self.bio.is_none()
            && self.avatar_url.is_none()
            && self.theme.is_none()
            && self.plan.is_none()
    }
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find profile by identity id
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Profile>>;

    /// Find profile by unique username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Profile>>;

    /// Check if a username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Insert-or-keep a profile keyed by identity id.
    ///
    /// Idempotent: racing with another provisioning path (e.g. a server-side
    /// signup callback) must not fail on the id conflict.
    async fn upsert(&self, profile: &NewProfile) -> RepoResult<()>;

    /// Apply a partial update to a profile row
    async fn update(&self, id: Uuid, patch: &ProfilePatch) -> RepoResult<()>;

    /// Delete a profile row
    async fn delete(&self, id: Uuid) -> RepoResult<()>;

    /// Read the current page view counter, by username.
    /// Returns `None` when no such profile exists.
    async fn get_page_views(&self, username: &str) -> RepoResult<Option<i64>>;

    /// Write the page view counter, by username.
    /// Returns `false` when no row was updated.
    async fn set_page_views(&self, username: &str, value: i64) -> RepoResult<bool>;
}

// ============================================================================
// Link Repository
// ============================================================================

/// Partial update payload for a link row.
///
/// Same conventions as [`ProfilePatch`]; id, profile_id and created_at are
/// immutable and absent. `clear_schedule` removes the visibility gate.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub position: Option<i32>,
    pub is_active: Option<bool>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub clear_schedule: bool,
}

impl LinkPatch {
    /// Check whether the patch changes anything at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.icon.is_none()
            && self.position.is_none()
            && self.is_active.is_none()
            && self.scheduled_at.is_none()
            && !self.clear_schedule
    }
}

#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// List all links for a profile, ordered by position ascending
    async fn find_by_profile(&self, profile_id: Uuid) -> RepoResult<Vec<Link>>;

    /// List only active links for a profile, ordered by position ascending
    async fn find_active_by_profile(&self, profile_id: Uuid) -> RepoResult<Vec<Link>>;

    /// Insert a new link and return the persisted row (with its real id)
    async fn insert(&self, link: &NewLink) -> RepoResult<Link>;

    /// Apply a partial update. Returns `false` when no row was updated.
    async fn update(&self, id: Uuid, patch: &LinkPatch) -> RepoResult<bool>;

    /// Rewrite the position of one link
    async fn set_position(&self, id: Uuid, position: i32) -> RepoResult<()>;

    /// Delete a link row
    async fn delete(&self, id: Uuid) -> RepoResult<()>;

    /// Delete all links owned by a profile, returning the row count
    async fn delete_by_profile(&self, profile_id: Uuid) -> RepoResult<u64>;

    /// Read the current click counter.
    /// Returns `None` when no such link exists.
    async fn get_click_count(&self, id: Uuid) -> RepoResult<Option<i64>>;

    /// Write the click counter. Returns `false` when no row was updated.
    async fn set_click_count(&self, id: Uuid, value: i64) -> RepoResult<bool>;
}

// ============================================================================
// Counter RPC (optional collaborator)
// ============================================================================

/// Server-side atomic increment procedures.
///
/// May not exist in a given deployment, or may be rejected by access policy;
/// callers treat it as opportunistic, never as the primary path.
#[async_trait]
pub trait CounterRpc: Send + Sync {
    /// Atomically increment a link's click counter
    async fn increment_click(&self, link_id: Uuid) -> RepoResult<()>;

    /// Atomically increment a profile's page view counter
    async fn increment_page_views(&self, username: &str) -> RepoResult<()>;
}

// ============================================================================
// Identity Provider
// ============================================================================

/// Opaque identity source. Resolution happens at the transport edge; the
/// synchronizer only needs the best-effort sign-out call.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Invalidate the remote session. Best-effort: callers reset local state
    /// whether or not this succeeds.
    async fn sign_out(&self, identity_id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Blob Store
// ============================================================================

/// Object storage for avatar images, keyed by identity id with a fixed,
/// extension-less key so re-uploads overwrite in place.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under a key and return the public URL
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> RepoResult<String>;

    /// Remove a stored object. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> RepoResult<()>;
}

// ============================================================================
// Promo Redeemer (opaque RPC)
// ============================================================================

/// Result of a promo-code redemption attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoOutcome {
    pub success: bool,
    pub plan: Option<Plan>,
    pub message: Option<String>,
}

/// Opaque payment-side RPC that validates a code and upgrades the plan
#[async_trait]
pub trait PromoRedeemer: Send + Sync {
    /// Redeem a (normalized) promo code for a profile
    async fn redeem(&self, code: &str, profile_id: Uuid) -> RepoResult<PromoOutcome>;
}
