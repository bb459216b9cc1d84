//! Identity token verification

mod jwt;

pub use jwt::{IdentityClaims, TokenVerifier};
