//! Playlist reducer
//!
//! The only place playlist state changes. `reduce` is total: every action is
//! either applied or a silent no-op, and nothing here can fail.

use crate::events::PlaylistEvent;
use crate::types::{HistoryEntry, PlaylistState, Song};
use encore_core::SongId;

/// Maximum undo depth kept by forward actions
pub const MAX_UNDO_DEPTH: usize = 50;

/// Intents accepted by the playlist store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistAction {
    /// Add a song with this title (trimmed; blank titles are ignored)
    Add {
        /// Raw title as entered
        title: String,
    },

    /// Remove the song with this id
    ///
    /// Always recorded in history and undoable, even when no song matches.
    Remove {
        /// Target song
        id: SongId,
    },

    /// Remove every song (ignored when the playlist is already empty)
    Clear,

    /// Step back one snapshot
    Undo,

    /// Step forward one snapshot
    ///
    /// The pre-redo snapshot goes onto the undo stack without applying
    /// `MAX_UNDO_DEPTH`.
    Redo,

    /// Replace the whole state with persisted data
    Hydrate(Box<PlaylistState>),
}

/// Apply `action` to `state`
///
/// Returns the event describing the transition, or `None` for a no-op
/// (state untouched).
pub fn reduce(state: &mut PlaylistState, action: PlaylistAction) -> Option<PlaylistEvent> {
    match action {
        PlaylistAction::Hydrate(loaded) => {
            *state = *loaded;
            Some(PlaylistEvent::Hydrated {
                songs: state.songs.len(),
            })
        }

        PlaylistAction::Add { title } => {
            let title = title.trim();
            if title.is_empty() {
                return None;
            }

            let song = Song::new(title);
            let event = PlaylistEvent::SongAdded {
                id: song.id.clone(),
                title: song.title.clone(),
            };

            commit(state, HistoryEntry::add(title), |songs| songs.insert(0, song));
            Some(event)
        }

        PlaylistAction::Remove { id } => {
            let mut removed = None;
            let entry_title = state.song(&id).map(|s| s.title.clone()).unwrap_or_default();

            commit(state, HistoryEntry::remove(entry_title), |songs| {
                if let Some(index) = songs.iter().position(|s| s.id == id) {
                    removed = Some(songs.remove(index).title);
                }
            });

            Some(PlaylistEvent::SongRemoved { id, title: removed })
        }

        PlaylistAction::Clear => {
            let count = state.songs.len();
            if count == 0 {
                return None;
            }

            commit(state, HistoryEntry::clear(count), Vec::clear);
            Some(PlaylistEvent::Cleared { count })
        }

        PlaylistAction::Undo => {
            let previous = state.past.pop()?;
            let current = state.restore(previous);
            state.future.push(current);
            Some(PlaylistEvent::Undone {
                remaining: state.past.len(),
            })
        }

        PlaylistAction::Redo => {
            let next = state.future.pop()?;
            let current = state.restore(next);
            state.past.push(current);
            Some(PlaylistEvent::Redone {
                remaining: state.future.len(),
            })
        }
    }
}

/// Record a forward mutation
///
/// Saves the pre-mutation snapshot (bounded), prepends `entry`, applies
/// `mutate` to the songs and invalidates the redo stack.
fn commit(state: &mut PlaylistState, entry: HistoryEntry, mutate: impl FnOnce(&mut Vec<Song>)) {
    let before = state.snapshot();
    state.past.push_capped(before, MAX_UNDO_DEPTH);

    mutate(&mut state.songs);
    state.history.insert(0, entry);
    state.future.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Snapshot;

    fn add(state: &mut PlaylistState, title: &str) -> Option<PlaylistEvent> {
        reduce(
            state,
            PlaylistAction::Add {
                title: title.to_string(),
            },
        )
    }

    fn titles(state: &PlaylistState) -> Vec<&str> {
        state.songs.iter().map(|s| s.title.as_str()).collect()
    }

    fn visible(state: &PlaylistState) -> Snapshot {
        state.snapshot()
    }

    #[test]
    fn add_first_song() {
        let mut state = PlaylistState::new();
        add(&mut state, "Song A");

        assert_eq!(titles(&state), vec!["Song A"]);
        assert_eq!(state.history.len(), 1);
        assert!(matches!(&state.history[0], HistoryEntry::Add { title, .. } if title == "Song A"));
        assert_eq!(state.past.len(), 1);
        assert_eq!(state.future.len(), 0);
    }

    #[test]
    fn add_is_newest_first_and_undo_redo_round_trips() {
        let mut state = PlaylistState::new();
        add(&mut state, "Song A");
        add(&mut state, "Song B");
        assert_eq!(titles(&state), vec!["Song B", "Song A"]);
        let before_undo = visible(&state);

        reduce(&mut state, PlaylistAction::Undo);
        assert_eq!(titles(&state), vec!["Song A"]);
        assert_eq!(state.future.len(), 1);

        reduce(&mut state, PlaylistAction::Redo);
        assert_eq!(titles(&state), vec!["Song B", "Song A"]);
        assert_eq!(visible(&state), before_undo);
    }

    #[test]
    fn add_trims_and_ignores_blank_titles() {
        let mut state = PlaylistState::new();
        assert!(add(&mut state, "   ").is_none());
        assert!(add(&mut state, "").is_none());
        assert_eq!(state, PlaylistState::new());

        add(&mut state, "  Padded  ");
        assert_eq!(titles(&state), vec!["Padded"]);
        assert_eq!(state.history[0].title(), Some("Padded"));
    }

    #[test]
    fn rapid_adds_get_distinct_ids() {
        let mut state = PlaylistState::new();
        for _ in 0..100 {
            add(&mut state, "Same");
        }
        let mut ids: Vec<_> = state.songs.iter().map(|s| s.id.clone()).collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids.dedup();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn clear_records_count() {
        let mut state = PlaylistState::new();
        for title in ["A", "B", "C"] {
            add(&mut state, title);
        }

        let event = reduce(&mut state, PlaylistAction::Clear);
        assert_eq!(event, Some(PlaylistEvent::Cleared { count: 3 }));
        assert!(state.songs.is_empty());
        assert!(matches!(state.history[0], HistoryEntry::Clear { count: 3, .. }));
    }

    #[test]
    fn clear_on_empty_is_noop() {
        let mut state = PlaylistState::new();
        add(&mut state, "A");
        reduce(&mut state, PlaylistAction::Clear);
        let before = state.clone();

        assert!(reduce(&mut state, PlaylistAction::Clear).is_none());
        assert_eq!(state, before);
        assert_eq!(state.past.len(), 2);
    }

    #[test]
    fn remove_existing_song() {
        let mut state = PlaylistState::new();
        add(&mut state, "A");
        add(&mut state, "B");
        let id = state.songs[1].id.clone();

        let event = reduce(&mut state, PlaylistAction::Remove { id: id.clone() });
        assert_eq!(
            event,
            Some(PlaylistEvent::SongRemoved {
                id,
                title: Some("A".to_string())
            })
        );
        assert_eq!(titles(&state), vec!["B"]);
        assert!(matches!(&state.history[0], HistoryEntry::Remove { title, .. } if title == "A"));
    }

    #[test]
    fn remove_drops_only_first_song_with_matching_id() {
        let dup = SongId::new("dup");
        let mut loaded = PlaylistState::new();
        loaded.songs = vec![
            Song {
                id: dup.clone(),
                title: "First".to_string(),
            },
            Song {
                id: dup.clone(),
                title: "Second".to_string(),
            },
        ];

        let mut state = PlaylistState::new();
        reduce(&mut state, PlaylistAction::Hydrate(Box::new(loaded)));

        let event = reduce(&mut state, PlaylistAction::Remove { id: dup.clone() });
        assert_eq!(
            event,
            Some(PlaylistEvent::SongRemoved {
                id: dup,
                title: Some("First".to_string())
            })
        );
        assert_eq!(titles(&state), vec!["Second"]);
        assert!(matches!(&state.history[0], HistoryEntry::Remove { title, .. } if title == "First"));
    }

    #[test]
    fn remove_missing_id_still_records_history() {
        let mut state = PlaylistState::new();
        add(&mut state, "A");
        let songs_before = state.songs.clone();

        reduce(
            &mut state,
            PlaylistAction::Remove {
                id: SongId::new("nonexistent-id"),
            },
        );

        assert_eq!(state.songs, songs_before);
        assert_eq!(state.history.len(), 2);
        assert!(matches!(&state.history[0], HistoryEntry::Remove { title, .. } if title.is_empty()));
        assert_eq!(state.past.len(), 2);
    }

    #[test]
    fn forward_action_clears_future() {
        let mut state = PlaylistState::new();
        add(&mut state, "A");
        add(&mut state, "B");
        reduce(&mut state, PlaylistAction::Undo);
        assert_eq!(state.future.len(), 1);

        add(&mut state, "C");
        assert!(state.future.is_empty());
        assert!(!state.can_redo());
    }

    #[test]
    fn undo_redo_on_empty_stacks_are_noops() {
        let mut state = PlaylistState::new();
        for _ in 0..3 {
            assert!(reduce(&mut state, PlaylistAction::Undo).is_none());
            assert!(reduce(&mut state, PlaylistAction::Redo).is_none());
        }
        assert_eq!(state, PlaylistState::new());
    }

    #[test]
    fn past_is_capped_on_forward_actions() {
        let mut state = PlaylistState::new();
        for i in 0..(MAX_UNDO_DEPTH + 10) {
            add(&mut state, &format!("Song {i}"));
        }
        assert_eq!(state.past.len(), MAX_UNDO_DEPTH);
        assert_eq!(state.history.len(), MAX_UNDO_DEPTH + 10);
    }

    #[test]
    fn redo_pushes_past_without_cap() {
        let mut state = PlaylistState::new();
        for i in 0..MAX_UNDO_DEPTH {
            add(&mut state, &format!("Song {i}"));
        }
        assert_eq!(state.past.len(), MAX_UNDO_DEPTH);

        // Hand-build a deep redo stack to reach past the cap on the redo path
        for _ in 0..5 {
            let current = state.snapshot();
            state.future.push(current);
        }
        for _ in 0..5 {
            reduce(&mut state, PlaylistAction::Redo);
        }
        assert_eq!(state.past.len(), MAX_UNDO_DEPTH + 5);
    }

    #[test]
    fn hydrate_replaces_everything() {
        let mut loaded = PlaylistState::new();
        add(&mut loaded, "Persisted");

        let mut state = PlaylistState::new();
        add(&mut state, "Transient");
        add(&mut state, "Transient 2");

        let event = reduce(&mut state, PlaylistAction::Hydrate(Box::new(loaded.clone())));
        assert_eq!(event, Some(PlaylistEvent::Hydrated { songs: 1 }));
        assert_eq!(state, loaded);
    }
}
