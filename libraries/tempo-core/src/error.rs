/// Core error types for Tempo
use thiserror::Error;

/// Result type alias using `TempoError`
pub type Result<T> = std::result::Result<T, TempoError>;

/// Core error type for Tempo
///
/// Covers every failure a collaborator can report back to the playback core
/// or to the screens.
#[derive(Error, Debug)]
pub enum TempoError {
    /// Audio resource failed to open or decode
    #[error("Load error: {0}")]
    Load(String),

    /// Transport command issued without an active resource, or rejected by the engine
    #[error("Command error: {0}")]
    Command(String),

    /// Preference blob could not be read
    #[error("Read error: {0}")]
    Read(String),

    /// Preference blob could not be written
    #[error("Write error: {0}")]
    Write(String),

    /// Media library scan failed
    #[error("Scan error: {0}")]
    Scan(String),

    /// Media library permission not granted
    #[error("Permission denied")]
    PermissionDenied,

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl TempoError {
    /// Create a load error
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Create a command error
    pub fn command(msg: impl Into<String>) -> Self {
        Self::Command(msg.into())
    }

    /// Create a read error
    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }

    /// Create a write error
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    /// Create a scan error
    pub fn scan(msg: impl Into<String>) -> Self {
        Self::Scan(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
