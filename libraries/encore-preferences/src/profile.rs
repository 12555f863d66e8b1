//! Profile form
//!
//! `{ username, email, genre }` with real-time field validation. The form is
//! persisted under `PROFILE_FORM_V1` while it is being filled in and dropped
//! from storage once it is submitted successfully.

use crate::cell::{Change, Persisted, PersistedCell};
use encore_core::storage::PROFILE_FORM_KEY;
use encore_core::{EncoreError, SharedStore};
use encore_storage::PersistenceWriter;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tokio::sync::watch;

static USERNAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("username regex"));

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// Allowed username length, in characters, after trimming
pub const USERNAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=20;

/// Favourite genre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    /// Pop
    Pop,
    /// Rock
    Rock,
    /// Jazz
    Jazz,
    /// Classical
    Classical,
    /// Hip-Hop
    #[serde(rename = "Hip-Hop")]
    HipHop,
}

impl Genre {
    /// Every genre, in picker order
    pub const ALL: [Genre; 5] = [
        Genre::Pop,
        Genre::Rock,
        Genre::Jazz,
        Genre::Classical,
        Genre::HipHop,
    ];

    /// Display label (also the wire name)
    pub fn label(self) -> &'static str {
        match self {
            Genre::Pop => "Pop",
            Genre::Rock => "Rock",
            Genre::Jazz => "Jazz",
            Genre::Classical => "Classical",
            Genre::HipHop => "Hip-Hop",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Genre {
    type Err = EncoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        Genre::ALL
            .into_iter()
            .find(|genre| {
                let label: String = genre
                    .label()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect();
                label.to_ascii_lowercase() == wanted
            })
            .ok_or_else(|| EncoreError::invalid_input(format!("unknown genre: {s}")))
    }
}

/// Validation failure for a single field
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldError {
    /// Empty username
    #[error("Username is required.")]
    UsernameRequired,

    /// Username outside `USERNAME_LENGTH`
    #[error("Must be 3–20 characters.")]
    UsernameLength,

    /// Username contains characters other than letters, digits, underscore
    #[error("Letters, numbers, and underscores only.")]
    UsernameCharacters,

    /// Empty email
    #[error("Email is required.")]
    EmailRequired,

    /// Email does not look like `name@domain.tld`
    #[error("Enter a valid email address.")]
    EmailInvalid,

    /// No genre chosen
    #[error("Please choose a favorite genre.")]
    GenreRequired,
}

/// Validate a username
pub fn validate_username(value: &str) -> Option<FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(FieldError::UsernameRequired);
    }
    if !USERNAME_LENGTH.contains(&trimmed.chars().count()) {
        return Some(FieldError::UsernameLength);
    }
    if !USERNAME.is_match(trimmed) {
        return Some(FieldError::UsernameCharacters);
    }
    None
}

/// Validate an email address
pub fn validate_email(value: &str) -> Option<FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(FieldError::EmailRequired);
    }
    if !EMAIL.is_match(trimmed) {
        return Some(FieldError::EmailInvalid);
    }
    None
}

/// Validate the genre choice
pub fn validate_genre(value: Option<Genre>) -> Option<FieldError> {
    match value {
        Some(_) => None,
        None => Some(FieldError::GenreRequired),
    }
}

/// The persisted form fields
///
/// Missing fields in a stored document default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileForm {
    /// Username as typed
    pub username: String,
    /// Email as typed
    pub email: String,
    /// Chosen genre
    pub genre: Option<Genre>,
}

impl ProfileForm {
    /// Whether any field has content
    pub fn has_any(&self) -> bool {
        !self.username.trim().is_empty() || !self.email.trim().is_empty() || self.genre.is_some()
    }

    /// Validate every field
    pub fn validate(&self) -> ProfileErrors {
        ProfileErrors {
            username: validate_username(&self.username),
            email: validate_email(&self.email),
            genre: validate_genre(self.genre),
        }
    }
}

/// Per-field validation state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileErrors {
    /// Username error
    pub username: Option<FieldError>,
    /// Email error
    pub email: Option<FieldError>,
    /// Genre error
    pub genre: Option<FieldError>,
}

impl ProfileErrors {
    /// True when no field has an error
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.genre.is_none()
    }
}

impl fmt::Display for ProfileErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("username", self.username),
            ("email", self.email),
            ("genre", self.genre),
        ];
        let mut first = true;
        for (name, error) in fields {
            if let Some(error) = error {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{name}: {error}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ProfileErrors {}

/// Form plus its live validation state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileState {
    /// Field values
    pub form: ProfileForm,
    /// Field errors
    pub errors: ProfileErrors,
}

impl Persisted for ProfileState {
    type Document = ProfileForm;
    const KEY: &'static str = PROFILE_FORM_KEY;

    fn to_document(&self) -> ProfileForm {
        self.form.clone()
    }

    // Restored fields are re-validated, but empty ones are not flagged
    fn from_document(form: ProfileForm) -> Self {
        let errors = ProfileErrors {
            username: non_blank(&form.username).and_then(validate_username),
            email: non_blank(&form.email).and_then(validate_email),
            genre: None,
        };
        Self { form, errors }
    }
}

fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Profile form store
pub struct ProfileStore {
    cell: PersistedCell<ProfileState>,
}

impl ProfileStore {
    /// Create the store; call `hydrate` before relying on persisted values
    pub fn new(backend: SharedStore, writer: PersistenceWriter) -> Self {
        Self {
            cell: PersistedCell::new(backend, writer),
        }
    }

    /// Load the persisted form once
    pub async fn hydrate(&self) -> bool {
        self.cell.hydrate().await
    }

    /// Whether the load attempt has resolved
    pub fn is_hydrated(&self) -> bool {
        self.cell.is_hydrated()
    }

    /// Current form and errors
    pub fn state(&self) -> ProfileState {
        self.cell.get()
    }

    /// Current form
    pub fn form(&self) -> ProfileForm {
        self.cell.read(|s| s.form.clone())
    }

    /// Current errors
    pub fn errors(&self) -> ProfileErrors {
        self.cell.read(|s| s.errors)
    }

    /// Edit the username; returns its validation result
    pub fn set_username(&self, value: impl Into<String>) -> Option<FieldError> {
        let value = value.into();
        let error = validate_username(&value);
        self.cell.update(|s| {
            s.form.username = value;
            s.errors.username = error;
            true
        });
        error
    }

    /// Edit the email; returns its validation result
    pub fn set_email(&self, value: impl Into<String>) -> Option<FieldError> {
        let value = value.into();
        let error = validate_email(&value);
        self.cell.update(|s| {
            s.form.email = value;
            s.errors.email = error;
            true
        });
        error
    }

    /// Choose a genre
    pub fn set_genre(&self, genre: Genre) {
        self.cell.update(|s| {
            s.form.genre = Some(genre);
            s.errors.genre = None;
            true
        });
    }

    /// Validate the whole form and, if valid, consume it
    ///
    /// On success the persisted form is removed and the store is reset to
    /// an empty form. On failure the errors are recorded and the form kept.
    ///
    /// # Errors
    ///
    /// Returns the per-field errors if any field is invalid.
    pub fn submit(&self) -> Result<ProfileForm, ProfileErrors> {
        let mut outcome = Err(ProfileErrors::default());

        self.cell.modify(|s| {
            let errors = s.form.validate();
            if errors.is_empty() {
                outcome = Ok(std::mem::take(&mut s.form));
                return Change::Reset;
            }

            outcome = Err(errors);
            if s.errors == errors {
                return Change::Unchanged;
            }
            s.errors = errors;
            Change::Persist
        });

        match &outcome {
            Ok(form) => tracing::info!("Profile submitted for {}", form.username.trim()),
            Err(errors) => tracing::debug!("Profile submit rejected: {}", errors),
        }
        outcome
    }

    /// Watch the form
    pub fn subscribe(&self) -> watch::Receiver<ProfileState> {
        self.cell.subscribe()
    }

    /// Wait for queued writes to reach the backend
    pub async fn flush(&self) {
        self.cell.flush().await;
    }
}
