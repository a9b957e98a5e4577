//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Start index outside the playlist
    #[error("Index out of bounds: {index} (playlist length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The player task is gone
    #[error("Player service stopped")]
    ServiceStopped,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
