//! Snapshot stacks for undo/redo
//!
//! Newest snapshot on top. The forward-action path bounds the undo stack;
//! the redo path pushes without a bound (see `PlaylistAction::Redo`).

use crate::types::Snapshot;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Stack of snapshots
///
/// Stored top-first (front = most recent), which is also the persisted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotStack {
    snapshots: VecDeque<Snapshot>,
}

impl SnapshotStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Push without bounding the stack
    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push_front(snapshot);
    }

    /// Push, then discard the oldest entries beyond `max_depth`
    pub fn push_capped(&mut self, snapshot: Snapshot, max_depth: usize) {
        self.snapshots.push_front(snapshot);
        self.snapshots.truncate(max_depth);
    }

    /// Pop the most recent snapshot
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop_front()
    }

    /// Most recent snapshot (without removing)
    pub fn peek(&self) -> Option<&Snapshot> {
        self.snapshots.front()
    }

    /// Snapshots, most recent first
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    /// Number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drop every snapshot
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
