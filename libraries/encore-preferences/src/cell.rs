//! Persisted single-value cell
//!
//! The lifecycle shared by the preference stores: start from the default,
//! load once, then write the document on every change. Mutations run inside
//! the `watch` cell's critical section, so they never interleave and writes
//! are queued in mutation order.

use encore_core::{LifecycleFlag, SharedStore};
use encore_storage::{load_json, to_json, PersistenceWriter};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

/// A value stored as one JSON document under a fixed key
pub(crate) trait Persisted: Clone + Default + Send + Sync + 'static {
    /// What actually gets written
    type Document: Serialize + DeserializeOwned;

    /// Storage key
    const KEY: &'static str;

    fn to_document(&self) -> Self::Document;

    fn from_document(document: Self::Document) -> Self;
}

/// What a `modify` closure did to the value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Change {
    /// Untouched
    Unchanged,
    /// Changed; write the new document
    Persist,
    /// Replace with the default and remove the document
    Reset,
}

pub(crate) struct PersistedCell<T: Persisted> {
    state: watch::Sender<T>,
    lifecycle: LifecycleFlag,
    hydration_started: AtomicBool,
    backend: SharedStore,
    writer: PersistenceWriter,
}

impl<T: Persisted> PersistedCell<T> {
    pub(crate) fn new(backend: SharedStore, writer: PersistenceWriter) -> Self {
        let (state, _) = watch::channel(T::default());
        Self {
            state,
            lifecycle: LifecycleFlag::new(),
            hydration_started: AtomicBool::new(false),
            backend,
            writer,
        }
    }

    /// One-time load; `true` if a persisted document was applied
    pub(crate) async fn hydrate(&self) -> bool {
        if self.hydration_started.swap(true, Ordering::AcqRel) {
            return false;
        }

        let loaded: Option<T::Document> = load_json(self.backend.as_ref(), T::KEY).await;
        let found = loaded.is_some();
        if let Some(document) = loaded {
            let value = T::from_document(document);
            self.state.send_modify(|state| *state = value);
        }
        self.lifecycle.mark_ready();

        tracing::info!(
            "Hydrated {} (persisted document {})",
            T::KEY,
            if found { "loaded" } else { "absent" }
        );
        found
    }

    pub(crate) fn is_hydrated(&self) -> bool {
        self.lifecycle.is_ready()
    }

    pub(crate) fn get(&self) -> T {
        self.state.borrow().clone()
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Mutate in place; `f` reports whether anything changed
    pub(crate) fn update(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        self.modify(|state| if f(state) { Change::Persist } else { Change::Unchanged })
    }

    /// Inspect and mutate in one critical section
    ///
    /// `Change::Reset` puts the default back and drops the persisted
    /// document; nothing else can run between `f` and the reset.
    pub(crate) fn modify(&self, f: impl FnOnce(&mut T) -> Change) -> bool {
        self.state.send_if_modified(|state| match f(state) {
            Change::Unchanged => false,
            Change::Persist => {
                if self.lifecycle.is_ready() {
                    if let Some(json) = to_json(T::KEY, &state.to_document()) {
                        self.writer.save(T::KEY, json);
                    }
                }
                true
            }
            Change::Reset => {
                *state = T::default();
                if self.lifecycle.is_ready() {
                    self.writer.remove(T::KEY);
                }
                true
            }
        })
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<T> {
        self.state.subscribe()
    }

    pub(crate) async fn flush(&self) {
        self.writer.flush().await;
    }
}
