//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

use crate::value_objects::username::UsernameError;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Profile not found: {0}")]
    ProfileNotFound(Uuid),

    #[error("Profile not found: @{0}")]
    ProfileNotFoundByUsername(String),

    #[error("Link not found: {0}")]
    LinkNotFound(Uuid),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Identity provider error: {0}")]
    IdentityError(String),

    #[error("Remote procedure unavailable: {0}")]
    RpcUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::ProfileNotFound(_) | Self::ProfileNotFoundByUsername(_) => "UNKNOWN_PROFILE",
            Self::LinkNotFound(_) => "UNKNOWN_LINK",
            Self::ValidationError(_) | Self::EmptyField { .. } => "VALIDATION_ERROR",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::UsernameTaken(_) => "USERNAME_TAKEN",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::IdentityError(_) => "IDENTITY_ERROR",
            Self::RpcUnavailable(_) => "RPC_UNAVAILABLE",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProfileNotFound(_) | Self::ProfileNotFoundByUsername(_) | Self::LinkNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::EmptyField { .. } | Self::InvalidUsername(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::UsernameTaken(_))
    }
}
