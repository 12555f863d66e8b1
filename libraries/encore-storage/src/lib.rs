//! Encore Storage
//!
//! Key-value backends and the background writer used by every Encore store.
//!
//! # Architecture
//!
//! - **Backends**: `MemoryStore` (tests, ephemeral sessions) and `SqliteStore`
//!   (a single `kv_store` table) both implement `encore_core::KeyValueStore`
//! - **Writer**: `PersistenceWriter` runs fire-and-forget saves on a background
//!   task, in dispatch order, coalescing superseded writes to the same key
//! - **Loading**: `load_json` turns every read or parse failure into "nothing
//!   persisted" so callers fall back to their defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use encore_storage::{PersistenceWriter, SqliteStore};
//! use encore_core::SharedStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store: SharedStore = Arc::new(SqliteStore::open("sqlite://encore.db").await?);
//! let writer = PersistenceWriter::spawn(store.clone());
//!
//! writer.save("THEME_STORE_V1", r##"{"mode":"dark","accent":"#1DB954"}"##.to_string());
//! writer.flush().await;
//! # Ok(())
//! # }
//! ```

mod error;
mod json;
mod memory;
mod sqlite;
mod writer;

pub use error::StorageError;
pub use json::{load_json, to_json};
pub use memory::MemoryStore;
pub use sqlite::{create_pool, run_migrations, SqliteStore};
pub use writer::PersistenceWriter;
