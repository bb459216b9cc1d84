//! API integration tests
//!
//! These tests require:
//! - Running PostgreSQL instance with the migrations applied
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Plan Policy Tests (unauthenticated)
// ============================================================================

#[tokio::test]
async fn test_plan_limits_default_to_free() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/plans/limits").await.unwrap();
    let limits: PlanLimitsBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(limits.plan, "free");
    assert_eq!(limits.max_links, Some(5));
    assert!(!limits.has_scheduled_links);
}

#[tokio::test]
async fn test_plan_limits_unlimited_is_null() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/plans/limits?plan=business").await.unwrap();
    let limits: PlanLimitsBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(limits.plan, "business");
    assert_eq!(limits.max_links, None);
    assert_eq!(limits.max_themes, None);
}

#[tokio::test]
async fn test_required_plan_for_scheduled_links() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/api/v1/plans/required?capability=scheduled_links")
        .await
        .unwrap();
    let body: RequiredPlanBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body.capability, "scheduled_links");
    assert_eq!(body.required_plan, "pro");
}

#[tokio::test]
async fn test_required_plan_unknown_capability() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/api/v1/plans/required?capability=time_travel")
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Username Check Tests
// ============================================================================

#[tokio::test]
async fn test_username_check_rejects_invalid() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/username-check?username=ab").await.unwrap();
    let body: UsernameCheckBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!body.available);
    assert!(body.reason.is_some());

    let response = server
        .get("/api/v1/username-check?username=admin")
        .await
        .unwrap();
    let body: UsernameCheckBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!body.available);
}

#[tokio::test]
async fn test_username_check_reports_taken_after_provisioning() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let identity = TestIdentity::unique();

    let response = server.get_auth("/api/v1/session", &identity.token).await.unwrap();
    let session: SessionBody = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/username-check?username={}", session.profile.username),
            &identity.token,
        )
        .await
        .unwrap();
    let body: UsernameCheckBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!body.available);
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_session_requires_auth() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/session").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get_auth("/api/v1/session", "not-a-token").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_session_provisions_profile_on_first_load() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let identity = TestIdentity::unique();

    let response = server.get_auth("/api/v1/session", &identity.token).await.unwrap();
    let session: SessionBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(session.phase, "ready");
    assert_eq!(session.profile.id, identity.id);
    // Username derives from the email local part
    let local_part = identity.email.split('@').next().unwrap();
    assert_eq!(session.profile.username, local_part);
    assert_eq!(session.profile.plan, "free");
    assert!(session.links.is_empty());
}

#[tokio::test]
async fn test_session_refresh_keeps_state() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let identity = TestIdentity::unique();

    server.get_auth("/api/v1/session", &identity.token).await.unwrap();
    let response = server
        .post_auth_empty("/api/v1/session/refresh", &identity.token)
        .await
        .unwrap();
    let session: SessionBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(session.phase, "ready");
    assert_eq!(session.profile.id, identity.id);
}

#[tokio::test]
async fn test_sign_out() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let identity = TestIdentity::unique();

    server.get_auth("/api/v1/session", &identity.token).await.unwrap();
    let response = server
        .post_auth_empty("/api/v1/session/sign-out", &identity.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_profile_update_roundtrip() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let identity = TestIdentity::unique();
    server.get_auth("/api/v1/session", &identity.token).await.unwrap();

    let response = server
        .patch_auth(
            "/api/v1/profile",
            &identity.token,
            &json!({"display_name": "Alex", "bio": "Hello there"}),
        )
        .await
        .unwrap();
    let profile: ProfileBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.display_name.as_deref(), Some("Alex"));
    assert_eq!(profile.bio.as_deref(), Some("Hello there"));

    // The session snapshot reflects the change
    let response = server.get_auth("/api/v1/session", &identity.token).await.unwrap();
    let session: SessionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(session.profile.display_name.as_deref(), Some("Alex"));
}

#[tokio::test]
async fn test_profile_update_rejects_reserved_username() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let identity = TestIdentity::unique();
    server.get_auth("/api/v1/session", &identity.token).await.unwrap();

    let response = server
        .patch_auth("/api/v1/profile", &identity.token, &json!({"username": "admin"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_profile_local_update_does_not_require_store() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let identity = TestIdentity::unique();
    server.get_auth("/api/v1/session", &identity.token).await.unwrap();

    let response = server
        .patch_auth(
            "/api/v1/profile/local",
            &identity.token,
            &json!({"display_name": "Staged"}),
        )
        .await
        .unwrap();
    let profile: ProfileBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.display_name.as_deref(), Some("Staged"));
}

// ============================================================================
// Link Tests
// ============================================================================

#[tokio::test]
async fn test_link_crud() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let identity = TestIdentity::unique();
    server.get_auth("/api/v1/session", &identity.token).await.unwrap();

    // Create
    let payload = CreateLinkPayload::unique();
    let response = server.post_auth("/api/v1/links", &identity.token, &payload).await.unwrap();
    let link: LinkBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(link.title, payload.title);
    assert_eq!(link.position, 0);
    assert!(!link.is_draft, "link should confirm against a live store");

    // Update
    let response = server
        .patch_auth(
            &format!("/api/v1/links/{}", link.key),
            &identity.token,
            &json!({"title": "Renamed"}),
        )
        .await
        .unwrap();
    let updated: LinkBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Renamed");

    // Delete
    let response = server
        .delete_auth(&format!("/api/v1/links/{}", link.key), &identity.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Deleting again is a 404
    let response = server
        .delete_auth(&format!("/api/v1/links/{}", link.key), &identity.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_link_reorder() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let identity = TestIdentity::unique();
    server.get_auth("/api/v1/session", &identity.token).await.unwrap();

    let mut keys = Vec::new();
    for _ in 0..3 {
        let payload = CreateLinkPayload::unique();
        let response = server.post_auth("/api/v1/links", &identity.token, &payload).await.unwrap();
        let link: LinkBody = assert_json(response, StatusCode::CREATED).await.unwrap();
        keys.push(link.key);
    }

    keys.reverse();
    let response = server
        .put_auth("/api/v1/links/reorder", &identity.token, &json!({"keys": &keys}))
        .await
        .unwrap();
    let links: Vec<LinkBody> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(links.len(), 3);
    let positions: Vec<i32> = links.iter().map(|l| l.position).collect();
    assert_eq!(positions, vec![0, 1, 2]);
    assert_eq!(links[0].key, keys[0]);
}

#[tokio::test]
async fn test_link_ceiling_enforced_on_free_plan() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let identity = TestIdentity::unique();
    server.get_auth("/api/v1/session", &identity.token).await.unwrap();

    for _ in 0..5 {
        let payload = CreateLinkPayload::unique();
        let response = server.post_auth("/api/v1/links", &identity.token, &payload).await.unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let payload = CreateLinkPayload::unique();
    let response = server.post_auth("/api/v1/links", &identity.token, &payload).await.unwrap();
    let status = response.status();
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body.error.code, "INSUFFICIENT_PLAN");
}

#[tokio::test]
async fn test_scheduled_links_gated_on_free_plan() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let identity = TestIdentity::unique();
    server.get_auth("/api/v1/session", &identity.token).await.unwrap();

    let mut payload = CreateLinkPayload::unique();
    payload.scheduled_at = Some("2030-01-01T00:00:00Z".to_string());

    let response = server.post_auth("/api/v1/links", &identity.token, &payload).await.unwrap();
    let status = response.status();
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body.error.code, "INSUFFICIENT_PLAN");
}

#[tokio::test]
async fn test_link_validation() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let identity = TestIdentity::unique();
    server.get_auth("/api/v1/session", &identity.token).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/links",
            &identity.token,
            &json!({"title": "", "url": "https://example.com"}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/links",
            &identity.token,
            &json!({"title": "Site", "url": "not a url"}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Tracking Tests
// ============================================================================

#[tokio::test]
async fn test_track_click_missing_target_is_soft_success() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/v1/track/click", &json!({"link_id": Uuid::new_v4()}))
        .await
        .unwrap();
    let body: TrackBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(body.success);
    assert!(body.counted, "missing target counts as a no-op success");
}

#[tokio::test]
async fn test_track_view_accepts_text_plain_beacon() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post_text(
            "/api/v1/track/view",
            json!({"username": "nobody-here"}).to_string(),
        )
        .await
        .unwrap();
    let body: TrackBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(body.success);
}

#[tokio::test]
async fn test_track_click_lands_on_real_link() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let identity = TestIdentity::unique();
    server.get_auth("/api/v1/session", &identity.token).await.unwrap();

    let payload = CreateLinkPayload::unique();
    let response = server.post_auth("/api/v1/links", &identity.token, &payload).await.unwrap();
    let link: LinkBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post("/api/v1/track/click", &json!({"link_id": link.key}))
        .await
        .unwrap();
    let body: TrackBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.counted);
}

// ============================================================================
// Promo Tests
// ============================================================================

#[tokio::test]
async fn test_promo_empty_code_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let identity = TestIdentity::unique();
    server.get_auth("/api/v1/session", &identity.token).await.unwrap();

    let response = server
        .post_auth("/api/v1/promo/redeem", &identity.token, &json!({"code": "   "}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_promo_unknown_code_is_soft_failure() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let identity = TestIdentity::unique();
    server.get_auth("/api/v1/session", &identity.token).await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/promo/redeem",
            &identity.token,
            &json!({"code": "NO-SUCH-CODE"}),
        )
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["success"], serde_json::Value::Bool(false));
}

// ============================================================================
// Account Deletion Tests
// ============================================================================

#[tokio::test]
async fn test_account_deletion() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let identity = TestIdentity::unique();
    server.get_auth("/api/v1/session", &identity.token).await.unwrap();

    let payload = CreateLinkPayload::unique();
    server.post_auth("/api/v1/links", &identity.token, &payload).await.unwrap();

    let response = server.delete_auth("/api/v1/account", &identity.token).await.unwrap();
    let body: DeletionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.status, "complete");
    assert!(body.failed.is_empty());

    // A fresh session re-provisions from scratch
    let response = server.get_auth("/api/v1/session", &identity.token).await.unwrap();
    let session: SessionBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(session.links.is_empty());
}
