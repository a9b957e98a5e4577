//! Error types for the media library

use thiserror::Error;

/// Result type alias using `LibraryError`
pub type Result<T> = std::result::Result<T, LibraryError>;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid file path: {0}")]
    InvalidPath(String),

    #[error("Directory not found: {0}")]
    NotFound(String),

    #[error("Scan task failed: {0}")]
    Task(String),
}

impl From<LibraryError> for tempo_core::TempoError {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                tempo_core::TempoError::PermissionDenied
            }
            other => tempo_core::TempoError::scan(other.to_string()),
        }
    }
}
