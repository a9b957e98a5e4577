/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot read music directory {0}")]
    PermissionDenied(String),

    #[error(transparent)]
    Core(#[from] tempo_core::TempoError),

    #[error(transparent)]
    Library(#[from] tempo_library::LibraryError),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
