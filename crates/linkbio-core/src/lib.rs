//! # linkbio-core
//!
//! Domain layer containing entities, value objects, plan policy, repository
//! traits, and identity events. This crate has zero dependencies on
//! infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod plan;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Link, NewLink, NewProfile, Profile};
pub use error::DomainError;
pub use events::{Identity, IdentityEvent, IdentityMetadata};
pub use plan::{plan_limits, required_plan, Capability, Plan, PlanLimits, UNLIMITED};
pub use traits::{
    BlobStore, CounterRpc, IdentityProvider, LinkPatch, LinkRepository, ProfilePatch,
    ProfileRepository, PromoOutcome, PromoRedeemer, RepoResult,
};
pub use value_objects::{LinkKey, LinkKeyParseError, NamedTheme, Palette, Theme};
