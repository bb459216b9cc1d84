//! # linkbio-db
//!
//! Infrastructure layer implementing the ports defined in `linkbio-core`:
//!
//! - Connection pool management (public plus optional privileged credentials)
//! - Database models with SQLx `FromRow` derives
//! - Entity <-> model mappers
//! - Repository implementations
//! - Counter RPC (server-side atomic increments, when the procedures exist)
//! - Local filesystem blob store for avatars

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod storage;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgCounterRpc, PgIdentityProvider, PgLinkRepository, PgProfileRepository, PgPromoRedeemer,
};
pub use storage::LocalBlobStore;
