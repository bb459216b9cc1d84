//! Theme - named theme catalog plus the custom-palette escape hatch
//!
//! Stored as a theme name column and an optional color record; in the domain
//! the two collapse into a tagged union so "custom without a palette" is
//! unrepresentable.

use serde::{Deserialize, Serialize};

/// Named themes from the built-in catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamedTheme {
    #[default]
    Light,
    Dark,
    Gradient,
    Ocean,
    Sunset,
    Forest,
    Midnight,
    Rose,
    Cyber,
    Minimal,
}

impl NamedTheme {
    /// All named themes, in catalog order
    pub const ALL: [Self; 10] = [
        Self::Light,
        Self::Dark,
        Self::Gradient,
        Self::Ocean,
        Self::Sunset,
        Self::Forest,
        Self::Midnight,
        Self::Rose,
        Self::Cyber,
        Self::Minimal,
    ];

    /// Stable lowercase name used in storage and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Gradient => "gradient",
            Self::Ocean => "ocean",
            Self::Sunset => "sunset",
            Self::Forest => "forest",
            Self::Midnight => "midnight",
            Self::Rose => "rose",
            Self::Cyber => "cyber",
            Self::Minimal => "minimal",
        }
    }

    /// Look up a named theme by its stored name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == name)
    }
}

/// Four-color palette for custom themes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub bg: String,
    pub text: String,
    pub button_bg: String,
    pub button_text: String,
}

/// Profile theme - either a catalog entry or a custom palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Theme {
    Named(NamedTheme),
    Custom(Palette),
}

impl Default for Theme {
    fn default() -> Self {
        Self::Named(NamedTheme::default())
    }
}

impl Theme {
    /// Stored/wire name; "custom" for palette themes
    pub fn name(&self) -> &'static str {
        match self {
            Self::Named(t) => t.as_str(),
            Self::Custom(_) => "custom",
        }
    }

    /// The custom palette, if any
    pub fn palette(&self) -> Option<&Palette> {
        match self {
            Self::Custom(p) => Some(p),
            Self::Named(_) => None,
        }
    }

    /// Reassemble a theme from its stored parts.
    ///
    /// A "custom" name without a stored palette, or an unknown name,
    /// degrades to the default named theme.
    pub fn from_parts(name: &str, palette: Option<Palette>) -> Self {
        if name == "custom" {
            return match palette {
                Some(p) => Self::Custom(p),
                None => Self::default(),
            };
        }
        NamedTheme::from_name(name).map_or_else(Self::default, Self::Named)
    }
}
