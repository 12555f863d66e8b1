//! Playlist Events
//!
//! Emitted once per committed transition, for observers that care about what
//! happened rather than the resulting state. No-op dispatches emit nothing.

use encore_core::SongId;
use serde::{Deserialize, Serialize};

/// Events emitted by the playlist store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaylistEvent {
    /// A song was added at the top of the playlist
    SongAdded {
        /// ID of the new song
        id: SongId,
        /// Trimmed title
        title: String,
    },

    /// A removal was committed
    SongRemoved {
        /// Requested ID
        id: SongId,
        /// Title of the removed song, `None` if the id was not present
        title: Option<String>,
    },

    /// Playlist emptied
    Cleared {
        /// Number of songs removed
        count: usize,
    },

    /// Previous snapshot restored
    Undone {
        /// Remaining undo depth
        remaining: usize,
    },

    /// Undone snapshot re-applied
    Redone {
        /// Remaining redo depth
        remaining: usize,
    },

    /// State replaced from persistence
    Hydrated {
        /// Number of songs loaded
        songs: usize,
    },
}
