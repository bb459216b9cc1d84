//! Link entity - one outbound URL entry on a profile page

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::LinkKey;

/// Link entity owned by exactly one profile
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub key: LinkKey,
    pub profile_id: Uuid,
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
    /// Dense 0..N-1 ordering key within one profile's link set. Advisory for
    /// ordering; transient gaps or duplicates are tolerated.
    pub position: i32,
    /// Controls public visibility
    pub is_active: bool,
    /// Monotonically non-decreasing click counter
    pub click_count: i64,
    /// Optional timestamp gating visibility until it has passed
    pub scheduled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Create a draft entry for optimistic insertion
    pub fn new_draft(
        draft_seq: u64,
        profile_id: Uuid,
        title: String,
        url: String,
        scheduled_at: Option<DateTime<Utc>>,
        position: i32,
    ) -> Self {
        Self {
            key: LinkKey::Draft(draft_seq),
            profile_id,
            title,
            url,
            icon: None,
            position,
            is_active: true,
            click_count: 0,
            scheduled_at,
            created_at: Utc::now(),
        }
    }

    /// Check whether this entry is still awaiting remote confirmation
    #[inline]
    pub fn is_draft(&self) -> bool {
        self.key.is_draft()
    }

    /// Check whether the link shows on the public page at `now`
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.scheduled_at.is_none_or(|at| at <= now)
    }
}

/// Payload for persisting a new link row
#[derive(Debug, Clone)]
pub struct NewLink {
    pub profile_id: Uuid,
    pub title: String,
    pub url: String,
    pub position: i32,
    pub is_active: bool,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl NewLink {
    /// Build the persistence payload for a draft entry
    pub fn from_draft(draft: &Link) -> Self {
        Self {
            profile_id: draft.profile_id,
            title: draft.title.clone(),
            url: draft.url.clone(),
            position: draft.position,
            is_active: draft.is_active,
            scheduled_at: draft.scheduled_at,
        }
    }
}
