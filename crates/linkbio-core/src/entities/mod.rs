//! Domain entities

pub mod link;
pub mod profile;

pub use link::{Link, NewLink};
pub use profile::{NewProfile, Profile};
