//! Core types for the playlist editor

use crate::stack::SnapshotStack;
use encore_core::{EntryId, SongId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A song in the playlist
///
/// Immutable once created; the title is already trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Unique song identifier
    pub id: SongId,

    /// Song title
    pub title: String,
}

impl Song {
    /// Create a song with a freshly generated id
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: SongId::generate(),
            title: title.into(),
        }
    }
}

/// One committed playlist mutation
///
/// Serialized with a `type` tag (`ADD`, `REMOVE`, `CLEAR`) so persisted
/// state stays readable by earlier versions of the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryEntry {
    /// A song was added
    Add {
        /// Entry identifier
        id: EntryId,
        /// Title of the added song
        title: String,
        /// Milliseconds since the Unix epoch
        timestamp: i64,
    },

    /// A removal was requested
    ///
    /// `title` is empty when the requested id was not in the playlist.
    Remove {
        /// Entry identifier
        id: EntryId,
        /// Title of the removed song, or empty
        title: String,
        /// Milliseconds since the Unix epoch
        timestamp: i64,
    },

    /// The playlist was emptied
    Clear {
        /// Entry identifier
        id: EntryId,
        /// Number of songs removed
        count: usize,
        /// Milliseconds since the Unix epoch
        timestamp: i64,
    },
}

impl HistoryEntry {
    /// New `Add` entry stamped now
    pub fn add(title: impl Into<String>) -> Self {
        Self::Add {
            id: EntryId::generate(),
            title: title.into(),
            timestamp: now_millis(),
        }
    }

    /// New `Remove` entry stamped now
    pub fn remove(title: impl Into<String>) -> Self {
        Self::Remove {
            id: EntryId::generate(),
            title: title.into(),
            timestamp: now_millis(),
        }
    }

    /// New `Clear` entry stamped now
    pub fn clear(count: usize) -> Self {
        Self::Clear {
            id: EntryId::generate(),
            count,
            timestamp: now_millis(),
        }
    }

    /// Entry identifier
    pub fn id(&self) -> &EntryId {
        match self {
            Self::Add { id, .. } | Self::Remove { id, .. } | Self::Clear { id, .. } => id,
        }
    }

    /// When the mutation was committed (ms since epoch)
    pub fn timestamp(&self) -> i64 {
        match self {
            Self::Add { timestamp, .. }
            | Self::Remove { timestamp, .. }
            | Self::Clear { timestamp, .. } => *timestamp,
        }
    }

    /// Song title for add/remove entries
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Add { title, .. } | Self::Remove { title, .. } => Some(title.as_str()),
            Self::Clear { .. } => None,
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add { title, .. } => write!(f, "Added \"{}\"", title),
            Self::Remove { title, .. } if title.is_empty() => write!(f, "Removed (unknown song)"),
            Self::Remove { title, .. } => write!(f, "Removed \"{}\"", title),
            Self::Clear { count, .. } => write!(f, "Cleared {} songs", count),
        }
    }
}

/// The visible part of the playlist at one instant
///
/// The unit of undo/redo. Both sequences are newest-first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Songs, newest first
    pub songs: Vec<Song>,

    /// Committed mutations, newest first
    pub history: Vec<HistoryEntry>,
}

/// Full playlist editor state
///
/// This is also the persisted document. Every field is required when
/// deserializing; a payload missing one is treated as malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistState {
    /// Songs, newest first
    pub songs: Vec<Song>,

    /// Committed mutations, newest first
    pub history: Vec<HistoryEntry>,

    /// Undo stack
    pub past: SnapshotStack,

    /// Redo stack
    pub future: SnapshotStack,
}

impl PlaylistState {
    /// Empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current songs and history
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            songs: self.songs.clone(),
            history: self.history.clone(),
        }
    }

    /// Install `snapshot` as the current songs and history
    ///
    /// Returns the snapshot that was current before.
    pub fn restore(&mut self, snapshot: Snapshot) -> Snapshot {
        Snapshot {
            songs: std::mem::replace(&mut self.songs, snapshot.songs),
            history: std::mem::replace(&mut self.history, snapshot.history),
        }
    }

    /// Find a song by id
    pub fn song(&self, id: &SongId) -> Option<&Song> {
        self.songs.iter().find(|s| &s.id == id)
    }

    /// Whether `undo` would change anything
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether `redo` would change anything
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_entry_wire_format() {
        let entry = HistoryEntry::Clear {
            id: EntryId::new("e1"),
            count: 3,
            timestamp: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "CLEAR", "id": "e1", "count": 3, "timestamp": 1_700_000_000_000_i64 })
        );
    }

    #[test]
    fn reads_state_written_by_earlier_versions() {
        let raw = r#"{
            "songs": [{ "id": "1700000000001.42", "title": "Song B" }],
            "history": [
                { "id": "1700000000002.1", "type": "REMOVE", "title": "Song A", "timestamp": 1700000000002 },
                { "id": "1700000000001.9", "type": "ADD", "title": "Song B", "timestamp": 1700000000001 }
            ],
            "past": [{ "songs": [], "history": [] }],
            "future": []
        }"#;

        let state: PlaylistState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.songs[0].title, "Song B");
        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[0].title(), Some("Song A"));
        assert_eq!(state.past.len(), 1);
        assert!(state.future.is_empty());
    }

    #[test]
    fn missing_fields_are_rejected() {
        let raw = r#"{ "songs": [] }"#;
        assert!(serde_json::from_str::<PlaylistState>(raw).is_err());
    }

    #[test]
    fn restore_swaps_snapshots() {
        let mut state = PlaylistState::new();
        state.songs.push(Song::new("A"));

        let previous = state.restore(Snapshot::default());
        assert_eq!(previous.songs.len(), 1);
        assert!(state.songs.is_empty());
    }

    #[test]
    fn history_entry_display() {
        assert_eq!(HistoryEntry::add("A").to_string(), "Added \"A\"");
        assert_eq!(HistoryEntry::remove("").to_string(), "Removed (unknown song)");
        assert_eq!(HistoryEntry::clear(2).to_string(), "Cleared 2 songs");
    }
}
