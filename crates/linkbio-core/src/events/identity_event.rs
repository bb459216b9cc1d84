//! Identity events - auth-state transitions consumed by the synchronizer
//!
//! The auth provider is an opaque identity source; it yields an id plus
//! whatever metadata it holds, and signals session transitions as events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata carried alongside an identity, used for profile provisioning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityMetadata {
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// A resolved identity from the auth provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub metadata: IdentityMetadata,
}

impl Identity {
    pub fn new(id: Uuid, metadata: IdentityMetadata) -> Self {
        Self { id, metadata }
    }
}

/// Auth-state transition emitted by the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
    SignedIn(Identity),
    SignedOut,
    TokenRefreshed(Identity),
}
