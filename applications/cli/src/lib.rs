//! Tempo command-line tool
//!
//! Scans a music directory and manages the player's saved preferences.

pub mod commands;
pub mod config;
pub mod error;

pub use config::TempoConfig;
pub use error::{CliError, Result};
