//! Playlist store
//!
//! Wraps the reducer with the store lifecycle:
//! - starts empty and `Uninitialized`
//! - `hydrate()` loads persisted state once, then marks the store `Ready`
//! - every committed transition after that is written in full, fire-and-forget
//!
//! The state lives in a single `watch` cell. Every transition runs inside
//! `send_if_modified`, so transitions never interleave, and the persistence
//! request is queued inside the same critical section so writes land in
//! transition order.

use crate::events::PlaylistEvent;
use crate::reducer::{self, PlaylistAction};
use crate::types::{HistoryEntry, PlaylistState, Song};
use encore_core::storage::PLAYLIST_STATE_KEY;
use encore_core::{Lifecycle, LifecycleFlag, SharedStore, SongId};
use encore_storage::{load_json, to_json, PersistenceWriter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

const EVENT_CAPACITY: usize = 64;

struct Shared {
    state: watch::Sender<PlaylistState>,
    lifecycle: LifecycleFlag,
    hydration_started: AtomicBool,
    backend: SharedStore,
    writer: PersistenceWriter,
    events: broadcast::Sender<PlaylistEvent>,
}

/// The shared playlist store
///
/// Construct once in the composition root and hand out the `query()` and
/// `actions()` facets. Clones share the same state.
#[derive(Clone)]
pub struct PlaylistStore {
    shared: Arc<Shared>,
}

impl PlaylistStore {
    /// Create a store with its own persistence writer
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn new(backend: SharedStore) -> Self {
        let writer = PersistenceWriter::spawn(backend.clone());
        Self::with_writer(backend, writer)
    }

    /// Create a store that shares an existing persistence writer
    pub fn with_writer(backend: SharedStore, writer: PersistenceWriter) -> Self {
        let (state, _) = watch::channel(PlaylistState::new());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            shared: Arc::new(Shared {
                state,
                lifecycle: LifecycleFlag::new(),
                hydration_started: AtomicBool::new(false),
                backend,
                writer,
                events,
            }),
        }
    }

    /// Load persisted state once and mark the store ready
    ///
    /// Missing, unreadable or malformed data leaves the empty state in place.
    /// The store becomes `Ready` in every case. Only the first call does any
    /// work; later calls return `false`.
    ///
    /// Returns `true` if persisted state was applied.
    pub async fn hydrate(&self) -> bool {
        if self.shared.hydration_started.swap(true, Ordering::AcqRel) {
            tracing::debug!("Playlist hydration already attempted");
            return false;
        }

        let loaded: Option<PlaylistState> =
            load_json(self.shared.backend.as_ref(), PLAYLIST_STATE_KEY).await;
        let found = loaded.is_some();

        if let Some(state) = loaded {
            self.dispatch(PlaylistAction::Hydrate(Box::new(state)));
        }
        self.shared.lifecycle.mark_ready();

        tracing::info!(
            "Playlist hydrated ({} songs, persisted state {})",
            self.shared.state.borrow().songs.len(),
            if found { "loaded" } else { "absent" }
        );
        found
    }

    /// Apply an action
    ///
    /// Returns the resulting event, or `None` if the action was a no-op.
    pub fn dispatch(&self, action: PlaylistAction) -> Option<PlaylistEvent> {
        let shared = &self.shared;
        let mut outcome = None;

        shared.state.send_if_modified(|state| {
            outcome = reducer::reduce(state, action);
            if outcome.is_none() {
                return false;
            }

            if shared.lifecycle.is_ready() {
                if let Some(json) = to_json(PLAYLIST_STATE_KEY, state) {
                    shared.writer.save(PLAYLIST_STATE_KEY, json);
                }
            }
            true
        });

        if let Some(event) = &outcome {
            tracing::debug!("Playlist transition: {:?}", event);
            // No subscribers is fine
            let _ = shared.events.send(event.clone());
        }
        outcome
    }

    /// Read facet
    pub fn query(&self) -> PlaylistQuery {
        PlaylistQuery {
            shared: self.shared.clone(),
        }
    }

    /// Write facet
    pub fn actions(&self) -> PlaylistActions {
        PlaylistActions {
            store: self.clone(),
        }
    }

    /// Receive an event for every committed transition
    pub fn subscribe_events(&self) -> broadcast::Receiver<PlaylistEvent> {
        self.shared.events.subscribe()
    }

    /// Wait for queued writes to reach the backend
    pub async fn flush(&self) {
        self.shared.writer.flush().await;
    }
}

/// Read-only view of the playlist store
#[derive(Clone)]
pub struct PlaylistQuery {
    shared: Arc<Shared>,
}

impl PlaylistQuery {
    /// Copy of the full state
    pub fn state(&self) -> PlaylistState {
        self.shared.state.borrow().clone()
    }

    /// Current songs, newest first
    pub fn songs(&self) -> Vec<Song> {
        self.shared.state.borrow().songs.clone()
    }

    /// Committed mutations, newest first
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.shared.state.borrow().history.clone()
    }

    /// Find a song by id
    pub fn song(&self, id: &SongId) -> Option<Song> {
        self.shared.state.borrow().song(id).cloned()
    }

    /// Whether `undo` would change anything
    pub fn can_undo(&self) -> bool {
        self.shared.state.borrow().can_undo()
    }

    /// Whether `redo` would change anything
    pub fn can_redo(&self) -> bool {
        self.shared.state.borrow().can_redo()
    }

    /// True once the one-time load attempt has resolved, whatever the outcome
    pub fn is_hydrated(&self) -> bool {
        self.shared.lifecycle.is_ready()
    }

    /// Current lifecycle phase
    pub fn lifecycle(&self) -> Lifecycle {
        self.shared.lifecycle.get()
    }

    /// Watch the state; the receiver is notified on every committed transition
    pub fn subscribe(&self) -> watch::Receiver<PlaylistState> {
        self.shared.state.subscribe()
    }
}

/// Write-only view of the playlist store
#[derive(Clone)]
pub struct PlaylistActions {
    store: PlaylistStore,
}

impl PlaylistActions {
    /// Add a song (blank titles are ignored)
    pub fn add_song(&self, title: impl Into<String>) -> Option<PlaylistEvent> {
        self.store.dispatch(PlaylistAction::Add {
            title: title.into(),
        })
    }

    /// Remove a song by id
    pub fn remove_song(&self, id: impl Into<SongId>) -> Option<PlaylistEvent> {
        self.store.dispatch(PlaylistAction::Remove { id: id.into() })
    }

    /// Remove every song
    pub fn clear_songs(&self) -> Option<PlaylistEvent> {
        self.store.dispatch(PlaylistAction::Clear)
    }

    /// Step back one snapshot
    pub fn undo(&self) -> Option<PlaylistEvent> {
        self.store.dispatch(PlaylistAction::Undo)
    }

    /// Step forward one snapshot
    pub fn redo(&self) -> Option<PlaylistEvent> {
        self.store.dispatch(PlaylistAction::Redo)
    }
}
