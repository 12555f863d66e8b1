//! Encore command-line front end
//!
//! The binary wires configuration, logging and the stores together; this
//! library half exists so the wiring can be tested.

pub mod app;
pub mod cli;
pub mod config;

pub use app::App;
pub use cli::{Cli, Command};
pub use config::EncoreConfig;
