//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! the token verifier, and the per-identity session registry.

use std::sync::Arc;

use dashmap::DashMap;
use sqlx::PgPool;
use uuid::Uuid;

use linkbio_common::{AppConfig, TokenVerifier};
use linkbio_service::{ProfileSync, ServiceContext};

/// Application state shared across all handlers
///
/// Each authenticated identity gets its own [`ProfileSync`] instance,
/// created lazily on first request and dropped on sign-out or account
/// deletion. The registry hands out clones of the shared instance so
/// concurrent requests for one identity operate on the same local state.
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    /// Identity token verifier
    token_verifier: TokenVerifier,
    /// Public-credential pool, kept for readiness probes
    pool: PgPool,
    /// Per-identity profile synchronizers
    sessions: Arc<DashMap<Uuid, Arc<ProfileSync>>>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, pool: PgPool, config: AppConfig) -> Self {
        let token_verifier = TokenVerifier::new(&config.jwt.secret);
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            token_verifier,
            pool,
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the identity token verifier
    pub fn token_verifier(&self) -> &TokenVerifier {
        &self.token_verifier
    }

    /// Get the public-credential database pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get or create the synchronizer for an identity
    pub fn session(&self, identity_id: Uuid) -> Arc<ProfileSync> {
        self.sessions
            .entry(identity_id)
            .or_insert_with(|| Arc::new(ProfileSync::new((*self.service_context).clone())))
            .clone()
    }

    /// Drop the synchronizer for an identity, if one exists
    pub fn drop_session(&self, identity_id: Uuid) {
        self.sessions.remove(&identity_id);
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("sessions", &self.sessions.len())
            .finish()
    }
}
