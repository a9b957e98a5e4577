//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tempo_core::{RepeatMode, Track};

/// Transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Transport {
    /// Nothing loaded yet, or the last load failed
    #[default]
    Idle,

    /// Waiting for the engine to open the resource
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,

    /// Halted and rewound
    Stopped,
}

/// Snapshot of the player, as rendered by screens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub playlist: Vec<Arc<Track>>,
    pub current_index: Option<usize>,
    pub current_track: Option<Arc<Track>>,
    pub transport: Transport,
    pub position_ms: u64,
    pub duration_ms: u64,
    pub volume: f32,
    pub repeat_mode: RepeatMode,
    pub shuffled: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            playlist: Vec::new(),
            current_index: None,
            current_track: None,
            transport: Transport::Idle,
            position_ms: 0,
            duration_ms: 0,
            volume: 1.0,
            repeat_mode: RepeatMode::None,
            shuffled: false,
        }
    }
}

impl PlayerState {
    /// Whether audio is audible right now
    pub fn is_playing(&self) -> bool {
        self.transport == Transport::Playing
    }

    /// Whether a load is in flight
    pub fn is_loading(&self) -> bool {
        self.transport == Transport::Loading
    }
}

/// Configuration for the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Upper bound on a single `AudioEngine::load` call (default: 10s)
    #[serde(default = "default_load_timeout_ms")]
    pub load_timeout_ms: u64,

    /// Fixed seed for shuffle picks (default: entropy)
    #[serde(default)]
    pub shuffle_seed: Option<u64>,

    /// Buffered commands between screens and the player task (default: 32)
    #[serde(default = "default_command_capacity")]
    pub command_capacity: usize,

    /// Buffered events per subscriber (default: 64)
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_load_timeout_ms() -> u64 {
    10_000
}

fn default_command_capacity() -> usize {
    32
}

fn default_event_capacity() -> usize {
    64
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            load_timeout_ms: default_load_timeout_ms(),
            shuffle_seed: None,
            command_capacity: default_command_capacity(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl PlayerConfig {
    /// Load timeout as a `Duration`
    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }
}
