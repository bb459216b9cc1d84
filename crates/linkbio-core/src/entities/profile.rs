//! Profile entity - the identity-owned record behind a public page

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::plan::Plan;
use crate::value_objects::Theme;

/// Profile entity describing one user's public page
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Identity id from the auth provider, also the primary key
    pub id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub theme: Theme,
    pub plan: Plan,
    /// Monotonically non-decreasing view counter
    pub page_views: i64,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Create a new Profile with required fields
    pub fn new(id: Uuid, username: String) -> Self {
        Self {
            id,
            username,
            display_name: None,
            bio: None,
            email: None,
            avatar_url: None,
            theme: Theme::default(),
            plan: Plan::default(),
            page_views: 0,
            created_at: Utc::now(),
        }
    }

    /// Empty placeholder shown while unauthenticated or after a failed fetch
    pub fn placeholder() -> Self {
        Self::new(Uuid::nil(), String::new())
    }

    /// Check whether this is the placeholder (no backing row)
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.id.is_nil()
    }
}

/// Payload for the provisioning upsert (keyed by identity id)
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub theme: Theme,
}
