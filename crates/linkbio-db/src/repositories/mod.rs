//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! linkbio-core. Each repository handles database operations for a specific
//! domain entity.

mod counter;
mod error;
mod link;
mod profile;
mod rpc;

pub use counter::PgCounterRpc;
pub use link::PgLinkRepository;
pub use profile::PgProfileRepository;
pub use rpc::{PgIdentityProvider, PgPromoRedeemer};
