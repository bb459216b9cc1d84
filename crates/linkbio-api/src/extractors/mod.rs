//! Axum extractors for request handling
//!
//! Custom extractors for authentication and body validation.

mod auth;
mod lenient;
mod validated;

pub use auth::AuthUser;
pub use lenient::LenientJson;
pub use validated::ValidatedJson;
