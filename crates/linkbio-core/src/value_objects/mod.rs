//! Value objects - immutable domain types with validation

pub mod link_key;
pub mod theme;
pub mod username;

pub use link_key::{LinkKey, LinkKeyParseError};
pub use theme::{NamedTheme, Palette, Theme};
