//! Tempo - Playback State Machine
//!
//! Platform-agnostic playback control for Tempo.
//!
//! This crate provides:
//! - Playlist with a cursor (load, append, remove)
//! - Transport control (play, pause, resume, stop, seek)
//! - Volume (0.0 - 1.0, clamped)
//! - Repeat modes (None, One, All) and uniform shuffle
//! - Auto-advance when a track finishes
//! - Preference persistence on every change
//!
//! # Architecture
//!
//! `tempo-playback` knows nothing about decoding or storage:
//! - Audio comes from an [`AudioEngine`](tempo_core::AudioEngine)
//! - Preferences go to a [`PreferenceStore`](tempo_core::PreferenceStore)
//!
//! [`PlayerStore`] is the state machine. It can be driven directly (every
//! method takes `&mut self`) or spawned with [`PlayerService`], which hands
//! out cloneable [`PlayerHandle`]s.
//!
//! # Example: Driving the store
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tempo_core::{AudioEngine, PreferenceStore, Track};
//! use tempo_playback::{PlayerConfig, PlayerStore};
//!
//! # async fn run(engine: Arc<dyn AudioEngine>, prefs: Arc<dyn PreferenceStore>) -> tempo_playback::Result<()> {
//! let mut store = PlayerStore::new(engine, prefs, PlayerConfig::default());
//! store.restore_preferences().await;
//!
//! let tracks = vec![
//!     Track::new("1", "Morning Song", "file:///music/morning.mp3"),
//!     Track::new("2", "Evening Song", "file:///music/evening.mp3"),
//! ];
//! store.load_playlist(tracks, 0).await?;
//!
//! // Apply engine callbacks until the load lands
//! store.settle().await;
//!
//! store.set_volume(0.8).await;
//! store.next_song().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Example: Running as a service
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tempo_core::{AudioEngine, PreferenceStore, Track};
//! use tempo_playback::{PlayerConfig, PlayerService, PlayerStore};
//!
//! # async fn run(engine: Arc<dyn AudioEngine>, prefs: Arc<dyn PreferenceStore>) -> tempo_playback::Result<()> {
//! let store = PlayerStore::new(engine, prefs, PlayerConfig::default());
//! let (player, _task) = PlayerService::spawn(store);
//!
//! let mut events = player.subscribe();
//! player
//!     .load_playlist(vec![Track::new("1", "Song", "file:///music/song.mp3")], 0)
//!     .await?;
//!
//! while let Ok(event) = events.recv().await {
//!     println!("{:?}", event);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod events;
mod service;
mod shuffle;
mod store;
pub mod types;
mod volume;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use service::{PlayerCommand, PlayerHandle, PlayerService};
pub use store::PlayerStore;
pub use types::{PlayerConfig, PlayerState, Transport};
pub use volume::Volume;
