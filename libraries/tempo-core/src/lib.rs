//! Tempo Core
//!
//! Platform-agnostic core types, collaborator traits, and error handling for Tempo.
//!
//! This crate provides the building blocks shared by the playback state machine,
//! the preference storage adapters, and the media library scanner.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `RepeatMode`, `Preferences`, `PlaybackStatus`
//! - **Collaborator Traits**: `AudioEngine`, `AudioHandle`, `PreferenceStore`, `MediaScanner`
//! - **Error Handling**: Unified `TempoError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tempo_core::types::{Preferences, RepeatMode, Track};
//!
//! let track = Track::new("t1", "Morning Song", "file:///music/morning.mp3");
//! assert_eq!(track.artist, "Unknown Artist");
//!
//! let prefs = Preferences::default();
//! assert_eq!(prefs.repeat_mode, RepeatMode::None);
//! assert_eq!(prefs.next_repeat_mode(), RepeatMode::One);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, TempoError};
pub use traits::{AudioEngine, AudioHandle, MediaScanner, PreferenceStore, StatusCallback};
pub use types::{
    LoadOptions, PlaybackStatus, Preferences, RepeatMode, StoredPreferences, Track, TrackId,
};
