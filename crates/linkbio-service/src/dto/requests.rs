//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input
//! validation. Link keys arrive in their wire form (`draft_<n>` or a uuid)
//! and deserialize through `LinkKey`.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use linkbio_core::value_objects::{LinkKey, Palette};

// ============================================================================
// Profile Requests
// ============================================================================

/// Theme selection: a named theme, optionally with a custom palette when
/// the name is "custom"
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeDto {
    pub name: String,
    pub colors: Option<Palette>,
}

/// Partial profile update request. Absent fields are left unchanged; an
/// empty string clears a nullable field.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 30, message = "Username must be 3-30 characters"))]
    pub username: Option<String>,

    #[validate(length(max = 100, message = "Display name must be at most 100 characters"))]
    pub display_name: Option<String>,

    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,

    pub avatar_url: Option<String>,

    pub theme: Option<ThemeDto>,
}

// ============================================================================
// Link Requests
// ============================================================================

/// Create link request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(url(message = "Invalid URL"))]
    pub url: String,

    /// Gate public visibility until this timestamp has passed
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// Partial link update request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,

    #[validate(url(message = "Invalid URL"))]
    pub url: Option<String>,

    pub icon: Option<String>,

    pub position: Option<i32>,

    pub is_active: Option<bool>,

    pub scheduled_at: Option<DateTime<Utc>>,

    /// Remove the visibility gate entirely
    #[serde(default)]
    pub clear_schedule: bool,
}

/// Reorder request carrying the complete key list in the desired order
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderLinksRequest {
    pub keys: Vec<LinkKey>,
}

// ============================================================================
// Tracking Requests
// ============================================================================

/// Click tracking request (lenient body, may arrive as raw text)
#[derive(Debug, Clone, Deserialize)]
pub struct TrackClickRequest {
    pub link_id: Uuid,
}

/// Page view tracking request (lenient body, may arrive as raw text)
#[derive(Debug, Clone, Deserialize)]
pub struct TrackViewRequest {
    pub username: String,
}

// ============================================================================
// Misc Requests
// ============================================================================

/// Promo code redemption request
#[derive(Debug, Clone, Deserialize)]
pub struct RedeemPromoRequest {
    pub code: String,
}

/// Username availability query
#[derive(Debug, Clone, Deserialize)]
pub struct UsernameCheckQuery {
    pub username: String,
}
