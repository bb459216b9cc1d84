//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{account, health, links, plans, profile, promo, session, track, username};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(session_routes())
        .merge(profile_routes())
        .merge(link_routes())
        .merge(public_routes())
}

/// Session lifecycle routes
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/session", get(session::get_session))
        .route("/session/refresh", post(session::refresh_session))
        .route("/session/sign-out", post(session::sign_out))
        .route("/account", delete(account::delete_account))
}

/// Profile routes
fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", patch(profile::update_profile))
        .route("/profile/local", patch(profile::update_profile_local))
        .route("/profile/avatar", put(profile::upload_avatar))
        .route("/promo/redeem", post(promo::redeem_promo))
}

/// Link routes
fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(links::create_link))
        .route("/links/reorder", put(links::reorder_links))
        .route("/links/:key", patch(links::update_link))
        .route("/links/:key", delete(links::delete_link))
}

/// Unauthenticated routes for the public page
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/track/click", post(track::track_click))
        .route("/track/view", post(track::track_view))
        .route("/username-check", get(username::check_username))
        .route("/plans/limits", get(plans::get_plan_limits))
        .route("/plans/required", get(plans::get_required_plan))
}
