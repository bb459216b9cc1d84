//! Link key - tagged identifier distinguishing drafts from persisted links
//!
//! A link added locally starts life as a `Draft` with a locally generated
//! sequence number. Once the remote store confirms the insert, the entry is
//! rekeyed to `Persisted` with the real row id. Keeping the distinction in
//! the type avoids string-prefix checks scattered through the mutation code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

/// Prefix used when rendering draft keys as strings (wire format)
const DRAFT_PREFIX: &str = "draft_";

/// Identifier for a link in the local collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKey {
    /// Locally created, not yet confirmed by the remote store
    Draft(u64),
    /// Confirmed by the remote store, carries the real row id
    Persisted(Uuid),
}

impl LinkKey {
    /// Check whether this key refers to an unconfirmed draft
    #[inline]
    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft(_))
    }

    /// Get the persisted row id, if confirmed
    pub fn persisted_id(&self) -> Option<Uuid> {
        match self {
            Self::Persisted(id) => Some(*id),
            Self::Draft(_) => None,
        }
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft(seq) => write!(f, "{DRAFT_PREFIX}{seq}"),
            Self::Persisted(id) => write!(f, "{id}"),
        }
    }
}

/// Error parsing a link key from its string form
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid link key: {0}")]
pub struct LinkKeyParseError(pub String);

impl FromStr for LinkKey {
    type Err = LinkKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(seq) = s.strip_prefix(DRAFT_PREFIX) {
            return seq
                .parse::<u64>()
                .map(Self::Draft)
                .map_err(|_| LinkKeyParseError(s.to_string()));
        }
        Uuid::parse_str(s)
            .map(Self::Persisted)
            .map_err(|_| LinkKeyParseError(s.to_string()))
    }
}

impl Serialize for LinkKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LinkKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
