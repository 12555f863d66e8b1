//! ID types for Encore entities

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Song identifier
///
/// Opaque and unique. Generated ids are UUID v4, so two songs added in the
/// same tick never collide. Ids written by older builds (timestamp plus a
/// random fraction) are accepted as-is when state is hydrated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(String);

impl SongId {
    /// Create a song ID from an existing string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random song ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SongId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SongId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// History entry identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Create an entry ID from an existing string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random entry ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn song_id_generation_creates_unique_ids() {
        let ids: HashSet<SongId> = (0..1_000).map(|_| SongId::generate()).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn song_id_serializes_as_plain_string() {
        let id = SongId::new("1700000000000.123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1700000000000.123\"");
    }

    #[test]
    fn entry_id_display() {
        let id = EntryId::new("entry-456");
        assert_eq!(format!("{}", id), "entry-456");
    }
}
