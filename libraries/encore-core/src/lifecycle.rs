//! Two-phase store lifecycle
//!
//! Every persisted store starts `Uninitialized`, attempts exactly one load,
//! and becomes `Ready` once that attempt resolves, whatever its outcome.
//! Writes are only issued while `Ready`, so the transient empty default never
//! overwrites durable state that has not been read yet.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// Lifecycle phase of a persisted store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Constructed with defaults, load not yet resolved
    Uninitialized,

    /// Load attempt resolved; changes are persisted
    Ready,
}

/// Shared, thread-safe lifecycle flag
///
/// Only moves forward: once ready, it stays ready.
#[derive(Debug, Default)]
pub struct LifecycleFlag {
    ready: AtomicBool,
}

impl LifecycleFlag {
    /// Create a flag in the `Uninitialized` phase
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase
    pub fn get(&self) -> Lifecycle {
        if self.is_ready() {
            Lifecycle::Ready
        } else {
            Lifecycle::Uninitialized
        }
    }

    /// Whether the load attempt has resolved
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Move to `Ready`
    ///
    /// Returns `true` if this call performed the transition.
    pub fn mark_ready(&self) -> bool {
        !self.ready.swap(true, Ordering::AcqRel)
    }
}
