//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod account;
pub mod health;
pub mod links;
pub mod plans;
pub mod profile;
pub mod promo;
pub mod session;
pub mod track;
pub mod username;
