//! Player Events
//!
//! Event-based communication for screens. Events are emitted at key points:
//! - Transport changes (loading/playing/paused/stopped)
//! - Track changes (when a load lands)
//! - Position updates (every engine status report)
//! - Preference changes (volume, repeat, shuffle)
//! - Errors from the audio engine or preference store

use serde::{Deserialize, Serialize};
use tempo_core::RepeatMode;

use crate::types::Transport;

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Transport changed
    TransportChanged {
        /// The new transport state
        transport: Transport,
    },

    /// A new track is loaded and audible
    TrackChanged {
        /// ID of the loaded track
        track_id: String,
        /// Playlist position of the loaded track
        index: Option<usize>,
    },

    /// Track finished playing naturally
    TrackFinished {
        /// ID of the finished track
        track_id: String,
    },

    /// Position update from the engine
    PositionUpdate {
        /// Current playback position
        position_ms: u64,
        /// Total track duration
        duration_ms: u64,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0.0 - 1.0)
        volume: f32,
    },

    /// Repeat mode changed
    RepeatModeChanged {
        /// New repeat mode
        mode: RepeatMode,
    },

    /// Shuffle toggled
    ShuffleChanged {
        /// Whether shuffle is on
        shuffled: bool,
    },

    /// Playlist changed (loaded, appended, filtered)
    PlaylistChanged {
        /// New playlist length
        length: usize,
    },

    /// Error occurred; the player stays usable
    Error {
        /// Error message
        message: String,
    },
}

impl PlayerEvent {
    /// Whether this event reports a failure
    pub fn is_error(&self) -> bool {
        matches!(self, PlayerEvent::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_detection() {
        let err = PlayerEvent::Error {
            message: "boom".to_string(),
        };
        assert!(err.is_error());
        assert!(!PlayerEvent::ShuffleChanged { shuffled: true }.is_error());
    }
}
