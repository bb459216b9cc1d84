//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Link keys are
//! serialized in their wire form (`draft_<n>` or a uuid).

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use linkbio_core::value_objects::Palette;

// ============================================================================
// Profile Responses
// ============================================================================

/// Theme in its wire shape
#[derive(Debug, Clone, Serialize)]
pub struct ThemeResponse {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Palette>,
}

/// Profile response
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub theme: ThemeResponse,
    pub plan: String,
    pub page_views: i64,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Link Responses
// ============================================================================

/// Link response
#[derive(Debug, Clone, Serialize)]
pub struct LinkResponse {
    /// Wire key: `draft_<n>` while awaiting confirmation, uuid once persisted
    pub key: String,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub position: i32,
    pub is_active: bool,
    pub click_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub is_draft: bool,
}

// ============================================================================
// Session Responses
// ============================================================================

/// Full session snapshot for the authenticated identity
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub phase: String,
    pub profile: ProfileResponse,
    pub links: Vec<LinkResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_preview: Option<String>,
}

// ============================================================================
// Tracking Responses
// ============================================================================

/// Tracking outcome. `success` is always true; `counted` reports whether
/// any persistence strategy landed.
#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub success: bool,
    pub counted: bool,
}

// ============================================================================
// Plan Responses
// ============================================================================

/// Plan limits in wire shape; unlimited renders as null
#[derive(Debug, Serialize)]
pub struct PlanLimitsResponse {
    pub plan: String,
    pub display_name: String,
    pub price_monthly: f64,
    pub price_yearly: f64,
    pub max_links: Option<u32>,
    pub max_themes: Option<u32>,
    pub has_full_analytics: bool,
    pub has_csv_export: bool,
    pub has_qr_code: bool,
    pub has_custom_og: bool,
    pub has_scheduled_links: bool,
    pub has_remove_branding: bool,
    pub has_short_username: bool,
}

/// Minimum plan tier granting a capability
#[derive(Debug, Serialize)]
pub struct RequiredPlanResponse {
    pub capability: String,
    pub required_plan: String,
}

// ============================================================================
// Misc Responses
// ============================================================================

/// Username availability response
#[derive(Debug, Serialize)]
pub struct UsernameCheckResponse {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Promo redemption response (soft outcome, HTTP 200 either way)
#[derive(Debug, Serialize)]
pub struct PromoResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Account deletion response
#[derive(Debug, Serialize)]
pub struct DeletionResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<String>,
}

/// Avatar upload response carrying the new public URL
#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    pub avatar_url: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
