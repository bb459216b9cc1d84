//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use linkbio_common::{AppConfig, AppError};
use linkbio_db::{
    create_pool, LocalBlobStore, PgCounterRpc, PgIdentityProvider, PgLinkRepository,
    PgProfileRepository, PgPromoRedeemer,
};
use linkbio_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes bypass the rate limiter and the rest of the stack.
pub fn create_app(state: AppState) -> Router {
    let api = apply_middleware_with_config(
        create_router(),
        &state.config().rate_limit,
        &state.config().cors,
        state.config().app.env.is_production(),
    );
    health_routes().merge(api).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool (public credentials)
    info!("Connecting to PostgreSQL...");
    let db_config = linkbio_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Optional privileged pool for the counter fallback path
    let privileged_pool = match &config.database.privileged_url {
        Some(url) => {
            info!("Connecting privileged PostgreSQL credential...");
            let pool = create_pool(&db_config.with_url(url.as_str()))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            Some(pool)
        }
        None => None,
    };

    // Create repositories and port adapters
    let profile_repo = Arc::new(PgProfileRepository::new(pool.clone()));
    let link_repo = Arc::new(PgLinkRepository::new(pool.clone()));
    let counter_rpc = Arc::new(PgCounterRpc::new(pool.clone()));
    let identity_provider = Arc::new(PgIdentityProvider::new(pool.clone()));
    let promo_redeemer = Arc::new(PgPromoRedeemer::new(pool.clone()));
    let blob_store = Arc::new(LocalBlobStore::new(
        config.storage.upload_dir.clone(),
        config.storage.public_base_url.clone(),
    ));

    // Build service context
    let mut builder = ServiceContextBuilder::new()
        .profile_repo(profile_repo)
        .link_repo(link_repo)
        .counter_rpc(counter_rpc)
        .identity_provider(identity_provider)
        .blob_store(blob_store)
        .promo_redeemer(promo_redeemer);

    if let Some(privileged) = privileged_pool {
        builder = builder
            .privileged_profile_repo(Arc::new(PgProfileRepository::new(privileged.clone())))
            .privileged_link_repo(Arc::new(PgLinkRepository::new(privileged)));
    }

    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, pool, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
