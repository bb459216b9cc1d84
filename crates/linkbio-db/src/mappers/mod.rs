//! Entity <-> model mappers

mod link;
mod profile;

pub use profile::theme_columns;
