//! Theme preference
//!
//! `{ mode, accent }`, persisted under `THEME_STORE_V1`, plus the palette
//! each mode resolves to.

use crate::cell::{Persisted, PersistedCell};
use encore_core::storage::THEME_STORE_KEY;
use encore_core::{EncoreError, Result, SharedStore};
use encore_storage::PersistenceWriter;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tokio::sync::watch;

/// Accent used until the user picks one
pub const DEFAULT_ACCENT: &str = "#1DB954";

/// Accents offered by the theme picker
pub const PRESET_ACCENTS: [&str; 4] = ["#1DB954", "#FF6B6B", "#4DA8DA", "#F5C518"];

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").expect("hex color regex")
});

/// Colour scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light background
    Light,

    /// Dark background
    #[default]
    Dark,

    /// Near-black background with the user's accent
    Custom,
}

impl ThemeMode {
    /// Every mode, in picker order
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::Custom];

    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::Custom => "custom",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = EncoreError;

    fn from_str(s: &str) -> Result<Self> {
        ThemeMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EncoreError::invalid_input(format!("unknown theme mode: {s}")))
    }
}

/// A `#RGB` or `#RRGGBB` colour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccentColor(String);

impl AccentColor {
    /// Validate a hex colour string
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if HEX_COLOR.is_match(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(EncoreError::invalid_input(format!(
                "accent must be a hex colour like #1DB954, got {value:?}"
            )))
        }
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AccentColor {
    fn default() -> Self {
        Self(DEFAULT_ACCENT.to_string())
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AccentColor {
    type Error = EncoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<AccentColor> for String {
    fn from(color: AccentColor) -> Self {
        color.0
    }
}

/// Persisted theme preference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePreference {
    /// Colour scheme
    pub mode: ThemeMode,

    /// Accent colour
    pub accent: AccentColor,
}

impl ThemePreference {
    /// Resolve the palette for this preference
    pub fn colors(&self) -> ThemeColors {
        let (bg, text, card) = match self.mode {
            ThemeMode::Light => ("#ffffff", "#000000", "#e6e6e6"),
            ThemeMode::Dark => ("#121212", "#ffffff", "#181818"),
            ThemeMode::Custom => ("#0f0f0f", "#ffffff", "#1a1a1a"),
        };
        ThemeColors {
            mode: self.mode,
            bg,
            text,
            card,
            accent: self.accent.clone(),
        }
    }
}

impl Persisted for ThemePreference {
    type Document = ThemePreference;
    const KEY: &'static str = THEME_STORE_KEY;

    fn to_document(&self) -> Self::Document {
        self.clone()
    }

    fn from_document(document: Self::Document) -> Self {
        document
    }
}

/// Resolved palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeColors {
    /// Mode the palette was resolved from
    pub mode: ThemeMode,
    /// Screen background
    pub bg: &'static str,
    /// Primary text
    pub text: &'static str,
    /// Card/surface background
    pub card: &'static str,
    /// Accent colour
    pub accent: AccentColor,
}

/// Theme preference store
pub struct ThemeStore {
    cell: PersistedCell<ThemePreference>,
}

impl ThemeStore {
    /// Create the store; call `hydrate` before relying on persisted values
    pub fn new(backend: SharedStore, writer: PersistenceWriter) -> Self {
        Self {
            cell: PersistedCell::new(backend, writer),
        }
    }

    /// Load the persisted preference once
    pub async fn hydrate(&self) -> bool {
        self.cell.hydrate().await
    }

    /// Whether the load attempt has resolved
    pub fn is_hydrated(&self) -> bool {
        self.cell.is_hydrated()
    }

    /// Current preference
    pub fn preference(&self) -> ThemePreference {
        self.cell.get()
    }

    /// Current palette
    pub fn colors(&self) -> ThemeColors {
        self.cell.read(ThemePreference::colors)
    }

    /// Switch colour scheme; returns whether it changed
    pub fn set_mode(&self, mode: ThemeMode) -> bool {
        self.cell.update(|pref| {
            if pref.mode == mode {
                return false;
            }
            pref.mode = mode;
            true
        })
    }

    /// Change the accent colour; returns whether it changed
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `accent` is not a hex colour. The current
    /// preference is left untouched.
    pub fn set_accent(&self, accent: &str) -> Result<bool> {
        let accent = AccentColor::parse(accent)?;
        Ok(self.cell.update(|pref| {
            if pref.accent == accent {
                return false;
            }
            pref.accent = accent;
            true
        }))
    }

    /// Replace the preference wholesale
    pub fn replace(&self, preference: ThemePreference) -> bool {
        self.cell.update(|pref| {
            if *pref == preference {
                return false;
            }
            *pref = preference;
            true
        })
    }

    /// Watch the preference
    pub fn subscribe(&self) -> watch::Receiver<ThemePreference> {
        self.cell.subscribe()
    }

    /// Wait for queued writes to reach the backend
    pub async fn flush(&self) {
        self.cell.flush().await;
    }
}
