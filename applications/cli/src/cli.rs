//! Command-line interface definition

use clap::{Parser, Subcommand};
use encore_preferences::{Genre, ThemeMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "encore")]
#[command(about = "Encore playlist editor and preferences", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override storage.database_url
    #[arg(long, global = true, env = "ENCORE_DATABASE_URL")]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Edit the playlist
    #[command(subcommand)]
    Playlist(PlaylistCommand),

    /// Theme preference
    #[command(subcommand)]
    Theme(ThemeCommand),

    /// Profile form
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PlaylistCommand {
    /// Add a song at the top of the playlist
    Add {
        /// Song title (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Remove a song by id
    Remove {
        /// Song id as shown by `playlist show`
        id: String,
    },
    /// Remove every song
    Clear,
    /// Undo the last change
    Undo,
    /// Redo the last undone change
    Redo,
    /// Print the playlist
    Show {
        /// Also print the change history
        #[arg(long)]
        history: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ThemeCommand {
    /// Print the current theme and palette
    Show,
    /// Set the colour scheme (light, dark, custom)
    Mode { mode: ThemeMode },
    /// Set the accent colour (#RRGGBB)
    Accent { accent: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ProfileCommand {
    /// Print the form and its validation state
    Show,
    /// Edit form fields
    Set {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Pop, Rock, Jazz, Classical or Hip-Hop
        #[arg(long)]
        genre: Option<Genre>,
    },
    /// Validate and submit the form
    Submit,
}
