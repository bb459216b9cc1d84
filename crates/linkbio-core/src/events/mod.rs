//! Identity events from the external auth provider

pub mod identity_event;

pub use identity_event::{Identity, IdentityEvent, IdentityMetadata};
