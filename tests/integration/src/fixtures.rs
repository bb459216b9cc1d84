//! Test fixtures and data generators
//!
//! Identity tokens are normally minted by the external identity provider;
//! tests mint their own with the shared secret from `JWT_SECRET`.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A freshly generated test identity with a signed token
pub struct TestIdentity {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

impl TestIdentity {
    /// Mint an identity with a unique email, signed with `JWT_SECRET`
    pub fn unique() -> Self {
        let id = Uuid::new_v4();
        let suffix = unique_suffix();
        let email = format!("visitor{suffix}{}@example.com", &id.simple().to_string()[..6]);

        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: id.to_string(),
            iat: now,
            exp: now + 3600,
            email: Some(email.clone()),
            username: None,
            full_name: Some(format!("Visitor {suffix}")),
            avatar_url: None,
        };

        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET not set");
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("token encoding failed");

        Self { id, email, token }
    }
}

/// Claims in the shape the server verifies
#[derive(Debug, Serialize)]
struct TokenClaims {
    sub: String,
    iat: i64,
    exp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar_url: Option<String>,
}

// ============================================================================
// Wire-shape response mirrors
// ============================================================================

/// Session snapshot body
#[derive(Debug, Deserialize)]
pub struct SessionBody {
    pub phase: String,
    pub profile: ProfileBody,
    pub links: Vec<LinkBody>,
}

/// Profile body
#[derive(Debug, Deserialize)]
pub struct ProfileBody {
    pub id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub plan: String,
    pub page_views: i64,
}

/// Link body
#[derive(Debug, Deserialize)]
pub struct LinkBody {
    pub key: String,
    pub title: String,
    pub url: String,
    pub position: i32,
    pub is_active: bool,
    pub is_draft: bool,
}

/// Tracking outcome body
#[derive(Debug, Deserialize)]
pub struct TrackBody {
    pub success: bool,
    pub counted: bool,
}

/// Username availability body
#[derive(Debug, Deserialize)]
pub struct UsernameCheckBody {
    pub available: bool,
    pub reason: Option<String>,
}

/// Plan limits body
#[derive(Debug, Deserialize)]
pub struct PlanLimitsBody {
    pub plan: String,
    pub max_links: Option<u32>,
    pub max_themes: Option<u32>,
    pub has_scheduled_links: bool,
}

/// Required plan body
#[derive(Debug, Deserialize)]
pub struct RequiredPlanBody {
    pub capability: String,
    pub required_plan: String,
}

/// Error body mirror
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail mirror
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Account deletion body
#[derive(Debug, Deserialize)]
pub struct DeletionBody {
    pub status: String,
    #[serde(default)]
    pub failed: Vec<String>,
}

// ============================================================================
// Request payload builders
// ============================================================================

/// Create link payload
#[derive(Debug, Serialize)]
pub struct CreateLinkPayload {
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
}

impl CreateLinkPayload {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Link {suffix}"),
            url: format!("https://example.com/{suffix}"),
            scheduled_at: None,
        }
    }
}
