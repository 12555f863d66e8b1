//! Background persistence writer
//!
//! Stores hand serialized documents to the writer and move on; the writer
//! applies them to the backend on its own task. Requests are applied in the
//! order they were issued. When several requests for the same key are queued
//! at once, only the newest one reaches the backend.
//!
//! Failures are logged and dropped. There are no retries.

use encore_core::SharedStore;
use std::collections::HashSet;
use tokio::sync::{mpsc, oneshot};

/// A queued persistence request
#[derive(Debug)]
enum WriteRequest {
    /// Replace the document under `key`
    Set { key: String, value: String },

    /// Delete the document under `key`
    Remove { key: String },

    /// Acknowledge once every earlier request has been applied
    Flush(oneshot::Sender<()>),
}

impl WriteRequest {
    fn key(&self) -> Option<&str> {
        match self {
            WriteRequest::Set { key, .. } | WriteRequest::Remove { key } => Some(key.as_str()),
            WriteRequest::Flush(_) => None,
        }
    }
}

/// Handle to the background writer task
///
/// Cloning is cheap; all clones feed the same task. The task stops once
/// every handle has been dropped and the queue is drained.
#[derive(Debug, Clone)]
pub struct PersistenceWriter {
    tx: mpsc::UnboundedSender<WriteRequest>,
}

impl PersistenceWriter {
    /// Spawn the writer task on the current tokio runtime
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(store: SharedStore) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(store, rx));
        Self { tx }
    }

    /// Queue a write of `value` under `key`
    pub fn save(&self, key: &str, value: String) {
        self.send(WriteRequest::Set {
            key: key.to_string(),
            value,
        });
    }

    /// Queue removal of `key`
    pub fn remove(&self, key: &str) {
        self.send(WriteRequest::Remove {
            key: key.to_string(),
        });
    }

    /// Wait until every request queued before this call has been applied
    ///
    /// Returns immediately if the writer task is gone.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(WriteRequest::Flush(ack)).is_err() {
            return;
        }
        let _ = done.await;
    }

    fn send(&self, request: WriteRequest) {
        if self.tx.send(request).is_err() {
            tracing::warn!("Persistence writer stopped; dropping request");
        }
    }
}

async fn run(store: SharedStore, mut rx: mpsc::UnboundedReceiver<WriteRequest>) {
    while let Some(first) = rx.recv().await {
        let mut batch = vec![first];
        while let Ok(next) = rx.try_recv() {
            batch.push(next);
        }

        for request in coalesce(batch) {
            apply(&store, request).await;
        }
    }
    tracing::debug!("Persistence writer finished");
}

async fn apply(store: &SharedStore, request: WriteRequest) {
    match request {
        WriteRequest::Set { key, value } => {
            if let Err(e) = store.set(&key, value).await {
                tracing::warn!("Failed to persist {}: {}", key, e);
            }
        }
        WriteRequest::Remove { key } => {
            if let Err(e) = store.remove(&key).await {
                tracing::warn!("Failed to remove {}: {}", key, e);
            }
        }
        WriteRequest::Flush(ack) => {
            let _ = ack.send(());
        }
    }
}

/// Drop requests superseded by a later request for the same key
///
/// A flush is a barrier: requests before it are never merged with requests
/// after it, so a flush always observes everything queued ahead of it.
fn coalesce(batch: Vec<WriteRequest>) -> Vec<WriteRequest> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Vec::with_capacity(batch.len());

    for request in batch.into_iter().rev() {
        match request.key().map(str::to_string) {
            Some(key) => {
                if seen.insert(key) {
                    kept.push(request);
                }
            }
            None => {
                seen.clear();
                kept.push(request);
            }
        }
    }

    kept.reverse();
    kept
}
