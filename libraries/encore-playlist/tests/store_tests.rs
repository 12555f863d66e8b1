//! Store lifecycle tests: hydration, persistence gating, failure absorption

use encore_core::storage::PLAYLIST_STATE_KEY;
use encore_core::{KeyValueStore, Lifecycle, SharedStore};
use encore_playlist::{HistoryEntry, PlaylistEvent, PlaylistState, PlaylistStore};
use encore_storage::MemoryStore;
use std::sync::Arc;

fn backend() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

fn store_on(backend: &Arc<MemoryStore>) -> PlaylistStore {
    let shared: SharedStore = backend.clone();
    PlaylistStore::new(shared)
}

async fn persisted(backend: &MemoryStore) -> Option<PlaylistState> {
    let raw = backend.peek(PLAYLIST_STATE_KEY).await?;
    Some(serde_json::from_str(&raw).unwrap())
}

#[tokio::test]
async fn hydrated_store_reproduces_saved_state() {
    let backend = backend();

    let first = store_on(&backend);
    first.hydrate().await;
    let actions = first.actions();
    actions.add_song("Song A");
    actions.add_song("Song B");
    actions.add_song("Song C");
    actions.undo();
    first.flush().await;

    let saved = first.query().state();
    assert_eq!(saved.past.len(), 2);
    assert_eq!(saved.future.len(), 1);

    let second = store_on(&backend);
    assert!(second.hydrate().await);
    assert_eq!(second.query().state(), saved);
}

#[tokio::test]
async fn empty_backend_hydrates_to_empty_state() {
    let backend = backend();
    let store = store_on(&backend);

    assert_eq!(store.query().lifecycle(), Lifecycle::Uninitialized);
    assert!(!store.hydrate().await);

    let query = store.query();
    assert!(query.is_hydrated());
    assert_eq!(query.lifecycle(), Lifecycle::Ready);
    assert_eq!(query.state(), PlaylistState::new());
}

#[tokio::test]
async fn malformed_payload_falls_back_to_empty() {
    let backend = Arc::new(MemoryStore::with_entries([(
        PLAYLIST_STATE_KEY,
        r#"{"songs": "definitely not a list"}"#,
    )]));
    let store = store_on(&backend);

    assert!(!store.hydrate().await);
    assert!(store.query().is_hydrated());
    assert_eq!(store.query().state(), PlaylistState::new());
}

#[tokio::test]
async fn failed_load_still_marks_hydrated() {
    let backend = backend();
    backend.set_fail_reads(true);
    let store = store_on(&backend);

    assert!(!store.hydrate().await);
    assert!(store.query().is_hydrated());

    // Writes still go through once ready
    store.actions().add_song("Song A");
    store.flush().await;
    assert_eq!(persisted(&backend).await.unwrap().songs.len(), 1);
}

#[tokio::test]
async fn nothing_is_written_before_hydration() {
    let backend = backend();
    let store = store_on(&backend);

    store.actions().add_song("Early");
    store.flush().await;

    assert_eq!(backend.write_count(), 0);
    assert!(!store.query().is_hydrated());
}

#[tokio::test]
async fn hydration_wins_over_earlier_actions() {
    let backend = backend();
    let seeded = store_on(&backend);
    seeded.hydrate().await;
    seeded.actions().add_song("Persisted");
    seeded.flush().await;

    let store = store_on(&backend);
    store.actions().add_song("Too early");
    store.hydrate().await;

    let titles: Vec<String> = store.query().songs().into_iter().map(|s| s.title).collect();
    assert_eq!(titles, vec!["Persisted".to_string()]);
}

#[tokio::test]
async fn every_change_after_hydration_is_persisted() {
    let backend = backend();
    let store = store_on(&backend);
    store.hydrate().await;
    let actions = store.actions();

    actions.add_song("Song A");
    store.flush().await;
    assert_eq!(persisted(&backend).await.unwrap().songs.len(), 1);

    actions.clear_songs();
    store.flush().await;
    let saved = persisted(&backend).await.unwrap();
    assert!(saved.songs.is_empty());
    assert!(matches!(saved.history[0], HistoryEntry::Clear { count: 1, .. }));

    actions.undo();
    store.flush().await;
    assert_eq!(persisted(&backend).await.unwrap(), store.query().state());
}

#[tokio::test]
async fn noops_are_not_persisted() {
    let backend = backend();
    let store = store_on(&backend);
    store.hydrate().await;
    let actions = store.actions();

    actions.add_song("   ");
    actions.clear_songs();
    actions.undo();
    actions.redo();
    store.flush().await;

    assert_eq!(backend.write_count(), 0);
}

#[tokio::test]
async fn write_failures_do_not_touch_memory() {
    let backend = backend();
    let store = store_on(&backend);
    store.hydrate().await;
    backend.set_fail_writes(true);

    store.actions().add_song("Song A");
    store.flush().await;

    assert_eq!(store.query().songs().len(), 1);
    assert!(backend.get(PLAYLIST_STATE_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn hydrate_runs_once() {
    let backend = backend();
    let seeded = store_on(&backend);
    seeded.hydrate().await;
    seeded.actions().add_song("Persisted");
    seeded.flush().await;

    let store = store_on(&backend);
    assert!(store.hydrate().await);
    store.actions().clear_songs();
    assert!(!store.hydrate().await);
    assert!(store.query().songs().is_empty());
}

#[tokio::test]
async fn subscribers_see_transitions() {
    let backend = backend();
    let store = store_on(&backend);
    store.hydrate().await;

    let mut state_rx = store.query().subscribe();
    let mut events = store.subscribe_events();

    let added = store.actions().add_song("Song A").unwrap();
    assert!(state_rx.has_changed().unwrap());
    assert_eq!(state_rx.borrow_and_update().songs.len(), 1);
    assert_eq!(events.recv().await.unwrap(), added);

    // No-op: no notification
    store.actions().redo();
    assert!(!state_rx.has_changed().unwrap());
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn remove_by_id_through_actions() {
    let backend = backend();
    let store = store_on(&backend);
    store.hydrate().await;
    let actions = store.actions();

    let Some(PlaylistEvent::SongAdded { id, .. }) = actions.add_song("Song A") else {
        panic!("expected SongAdded");
    };
    actions.add_song("Song B");

    let removed = actions.remove_song(id.clone());
    assert_eq!(
        removed,
        Some(PlaylistEvent::SongRemoved {
            id: id.clone(),
            title: Some("Song A".to_string())
        })
    );
    assert!(store.query().song(&id).is_none());

    // Unknown id still commits a transition
    let missing = actions.remove_song("nonexistent-id");
    assert!(matches!(missing, Some(PlaylistEvent::SongRemoved { title: None, .. })));
    assert_eq!(store.query().history().len(), 4);
    assert!(store.query().can_undo());
}
