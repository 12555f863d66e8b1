//! Encore Core
//!
//! Shared building blocks for the Encore state stores.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Identifiers**: `SongId`, `EntryId`
//! - **Persistence seam**: the `KeyValueStore` trait and the storage keys every store uses
//! - **Lifecycle**: the `Uninitialized -> Ready` flag that gates persistence writes
//! - **Error Handling**: unified `EncoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use encore_core::{Lifecycle, LifecycleFlag, SongId};
//!
//! let flag = LifecycleFlag::new();
//! assert_eq!(flag.get(), Lifecycle::Uninitialized);
//! flag.mark_ready();
//! assert!(flag.is_ready());
//!
//! let a = SongId::generate();
//! let b = SongId::generate();
//! assert_ne!(a, b);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod ids;
pub mod lifecycle;
pub mod storage;

pub use error::{EncoreError, Result};
pub use ids::{EntryId, SongId};
pub use lifecycle::{Lifecycle, LifecycleFlag};
pub use storage::{KeyValueStore, SharedStore};
