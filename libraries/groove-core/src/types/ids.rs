/// ID and locator types for Groove Player entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// Track identifier
///
/// Unique within a playlist. Catalog providers that number tracks by
/// position use the integer conversion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a new track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for TrackId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque playable source reference
///
/// Only the output adapter interprets it (file path, URL, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceLocator(String);

impl SourceLocator {
    /// Create a new source locator
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SourceLocator {
    fn from(locator: &str) -> Self {
        Self(locator.to_string())
    }
}

impl fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
