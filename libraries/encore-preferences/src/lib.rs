//! Encore Preferences
//!
//! Small persisted stores that sit next to the playlist editor:
//!
//! - **Theme**: `{ mode, accent }` and the palette each mode resolves to
//! - **Profile**: the sign-up form with live field validation
//!
//! Both follow the same lifecycle as the playlist store: construct with
//! defaults, `hydrate()` once, then every change is written through the
//! shared `PersistenceWriter`.
//!
//! # Example
//!
//! ```rust
//! use encore_core::SharedStore;
//! use encore_preferences::{ThemeMode, ThemeStore};
//! use encore_storage::{MemoryStore, PersistenceWriter};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let backend: SharedStore = Arc::new(MemoryStore::new());
//! let writer = PersistenceWriter::spawn(backend.clone());
//!
//! let theme = ThemeStore::new(backend, writer);
//! theme.hydrate().await;
//! theme.set_mode(ThemeMode::Light);
//! assert_eq!(theme.colors().bg, "#ffffff");
//! # }
//! ```

mod cell;
pub mod profile;
pub mod theme;

pub use profile::{FieldError, Genre, ProfileErrors, ProfileForm, ProfileState, ProfileStore};
pub use theme::{AccentColor, ThemeColors, ThemeMode, ThemePreference, ThemeStore, PRESET_ACCENTS};
