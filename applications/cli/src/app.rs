//! Composition root
//!
//! Builds every store exactly once over one backend and one persistence
//! writer, hydrates them, and runs commands against them.

use crate::cli::{Command, PlaylistCommand, ProfileCommand, ThemeCommand};
use crate::config::EncoreConfig;
use encore_core::SharedStore;
use encore_playlist::{PlaylistEvent, PlaylistStore};
use encore_preferences::{ProfileStore, ThemeStore};
use encore_storage::{PersistenceWriter, SqliteStore};
use std::fmt::Write as _;
use std::sync::Arc;

/// Every store the CLI works with
pub struct App {
    writer: PersistenceWriter,
    pub playlist: PlaylistStore,
    pub theme: ThemeStore,
    pub profile: ProfileStore,
}

impl App {
    /// Open the configured database and hydrate every store
    pub async fn open(config: &EncoreConfig) -> anyhow::Result<Self> {
        let backend: SharedStore = Arc::new(SqliteStore::open(&config.storage.database_url).await?);
        Ok(Self::with_backend(backend).await)
    }

    /// Build and hydrate the stores over an existing backend
    pub async fn with_backend(backend: SharedStore) -> Self {
        let writer = PersistenceWriter::spawn(backend.clone());

        let app = Self {
            playlist: PlaylistStore::with_writer(backend.clone(), writer.clone()),
            theme: ThemeStore::new(backend.clone(), writer.clone()),
            profile: ProfileStore::new(backend, writer.clone()),
            writer,
        };

        tokio::join!(
            app.playlist.hydrate(),
            app.theme.hydrate(),
            app.profile.hydrate()
        );
        app
    }

    /// Run one command and render its output
    pub fn execute(&self, command: Command) -> anyhow::Result<String> {
        match command {
            Command::Playlist(cmd) => Ok(self.playlist_command(cmd)),
            Command::Theme(cmd) => self.theme_command(cmd),
            Command::Profile(cmd) => Ok(self.profile_command(cmd)),
        }
    }

    /// Wait until every queued write has reached the backend
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    fn playlist_command(&self, cmd: PlaylistCommand) -> String {
        let actions = self.playlist.actions();

        let outcome = match cmd {
            PlaylistCommand::Show { history } => return self.render_playlist(history),
            PlaylistCommand::Add { title } => actions.add_song(title.join(" ")),
            PlaylistCommand::Remove { id } => actions.remove_song(id),
            PlaylistCommand::Clear => actions.clear_songs(),
            PlaylistCommand::Undo => actions.undo(),
            PlaylistCommand::Redo => actions.redo(),
        };

        match outcome {
            Some(event) => describe(&event),
            None => "Nothing to do".to_string(),
        }
    }

    fn render_playlist(&self, with_history: bool) -> String {
        let query = self.playlist.query();
        let state = query.state();
        let mut out = String::new();

        if state.songs.is_empty() {
            out.push_str("Playlist is empty\n");
        }
        for (index, song) in state.songs.iter().enumerate() {
            let _ = writeln!(out, "{:>3}. {}  [{}]", index + 1, song.title, song.id);
        }
        let _ = writeln!(
            out,
            "undo: {}  redo: {}",
            state.past.len(),
            state.future.len()
        );

        if with_history {
            out.push_str("History:\n");
            for entry in &state.history {
                let _ = writeln!(out, "  {}  {}", entry.timestamp(), entry);
            }
        }
        out
    }

    fn theme_command(&self, cmd: ThemeCommand) -> anyhow::Result<String> {
        let message = match cmd {
            ThemeCommand::Show => {
                let colors = self.theme.colors();
                return Ok(format!(
                    "mode: {}\naccent: {}\nbg: {}\ntext: {}\ncard: {}",
                    colors.mode, colors.accent, colors.bg, colors.text, colors.card
                ));
            }
            ThemeCommand::Mode { mode } => {
                if self.theme.set_mode(mode) {
                    format!("Theme mode set to {mode}")
                } else {
                    format!("Theme mode already {mode}")
                }
            }
            ThemeCommand::Accent { accent } => {
                if self.theme.set_accent(&accent)? {
                    format!("Accent set to {}", self.theme.preference().accent)
                } else {
                    "Accent unchanged".to_string()
                }
            }
        };
        Ok(message)
    }

    fn profile_command(&self, cmd: ProfileCommand) -> String {
        match cmd {
            ProfileCommand::Show => self.render_profile(),
            ProfileCommand::Set {
                username,
                email,
                genre,
            } => {
                if let Some(username) = username {
                    self.profile.set_username(username);
                }
                if let Some(email) = email {
                    self.profile.set_email(email);
                }
                if let Some(genre) = genre {
                    self.profile.set_genre(genre);
                }
                self.render_profile()
            }
            ProfileCommand::Submit => match self.profile.submit() {
                Ok(form) => format!("Profile submitted for {}", form.username.trim()),
                Err(errors) => format!("Fix the errors: {errors}"),
            },
        }
    }

    fn render_profile(&self) -> String {
        let state = self.profile.state();
        let field = |value: &str, error: Option<encore_preferences::FieldError>| match error {
            Some(error) => format!("{value}  ({error})"),
            None => value.to_string(),
        };
        let genre = state
            .form
            .genre
            .map(|g| g.to_string())
            .unwrap_or_default();

        format!(
            "username: {}\nemail: {}\ngenre: {}",
            field(&state.form.username, state.errors.username),
            field(&state.form.email, state.errors.email),
            field(&genre, state.errors.genre),
        )
    }
}

fn describe(event: &PlaylistEvent) -> String {
    match event {
        PlaylistEvent::SongAdded { id, title } => format!("Added \"{title}\" [{id}]"),
        PlaylistEvent::SongRemoved {
            title: Some(title), ..
        } => format!("Removed \"{title}\""),
        PlaylistEvent::SongRemoved { id, title: None } => {
            format!("No song with id {id}; removal recorded")
        }
        PlaylistEvent::Cleared { count } => format!("Cleared {count} songs"),
        PlaylistEvent::Undone { remaining } => format!("Undone ({remaining} more available)"),
        PlaylistEvent::Redone { remaining } => format!("Redone ({remaining} more available)"),
        PlaylistEvent::Hydrated { songs } => format!("Loaded {songs} songs"),
    }
}
