//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod account;
pub mod context;
pub mod counter;
pub mod error;
pub mod links;
pub mod promo;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use account::{AccountService, DeletionOutcome};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use counter::{CounterService, TrackOutcome};
pub use error::{ServiceError, ServiceResult};
pub use links::LinkCollection;
pub use promo::PromoService;
pub use sync::{ProfileSync, SessionPhase, SessionSnapshot};
