//! Encore - Playlist Editor
//!
//! Reducer-driven playlist state with bounded undo/redo and a
//! hydrate-once, persist-on-every-change lifecycle.
//!
//! This crate provides:
//! - Songs and a newest-first history log of committed mutations
//! - Undo/redo over full snapshots (undo depth capped at 50 on forward actions)
//! - A pure reducer (`reduce`) that never fails
//! - `PlaylistStore` with separate read (`PlaylistQuery`) and write
//!   (`PlaylistActions`) facets
//! - Events for every committed transition
//!
//! # Example: Pure reducer
//!
//! ```rust
//! use encore_playlist::{reduce, PlaylistAction, PlaylistState};
//!
//! let mut state = PlaylistState::new();
//! reduce(&mut state, PlaylistAction::Add { title: "Song A".into() });
//! reduce(&mut state, PlaylistAction::Add { title: "Song B".into() });
//! assert_eq!(state.songs[0].title, "Song B");
//!
//! reduce(&mut state, PlaylistAction::Undo);
//! assert_eq!(state.songs.len(), 1);
//! assert!(state.can_redo());
//! ```
//!
//! # Example: Store
//!
//! ```rust
//! use encore_core::SharedStore;
//! use encore_playlist::PlaylistStore;
//! use encore_storage::MemoryStore;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let backend: SharedStore = Arc::new(MemoryStore::new());
//! let store = PlaylistStore::new(backend);
//! store.hydrate().await;
//!
//! let actions = store.actions();
//! let query = store.query();
//!
//! actions.add_song("Song A");
//! assert_eq!(query.songs().len(), 1);
//! assert!(query.is_hydrated());
//!
//! store.flush().await;
//! # }
//! ```

mod events;
mod reducer;
mod stack;
mod store;
pub mod types;

// Public exports
pub use events::PlaylistEvent;
pub use reducer::{reduce, PlaylistAction, MAX_UNDO_DEPTH};
pub use stack::SnapshotStack;
pub use store::{PlaylistActions, PlaylistQuery, PlaylistStore};
pub use types::{HistoryEntry, PlaylistState, Snapshot, Song};
