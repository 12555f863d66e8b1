//! Key-value persistence seam
//!
//! Stores never talk to a concrete backend. They receive a `SharedStore`
//! from the composition root and only ever read or write whole JSON
//! documents under the keys below.

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Key holding the serialized playlist state
pub const PLAYLIST_STATE_KEY: &str = "PLAYLIST_STATE_V1";

/// Key holding the serialized theme preference
pub const THEME_STORE_KEY: &str = "THEME_STORE_V1";

/// Key holding the serialized profile form
pub const PROFILE_FORM_KEY: &str = "PROFILE_FORM_V1";

/// Asynchronous string key-value storage
///
/// Implementations may fail at any time; callers in this workspace absorb
/// those failures at the boundary and never let them reach in-memory state.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `Ok(None)` if the key is absent
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace a value
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Delete a value
    ///
    /// Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Shared handle to a key-value backend
pub type SharedStore = Arc<dyn KeyValueStore>;
