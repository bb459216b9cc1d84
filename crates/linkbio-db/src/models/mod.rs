//! Database models

mod link;
mod profile;

pub use link::LinkModel;
pub use profile::ProfileModel;
