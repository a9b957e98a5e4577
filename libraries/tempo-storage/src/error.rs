/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backing file could not be read or parsed
    #[error("Read error: {0}")]
    Read(String),

    /// Backing file could not be written
    #[error("Write error: {0}")]
    Write(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Create a read error
    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }

    /// Create a write error
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<StorageError> for tempo_core::TempoError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Write(_) => tempo_core::TempoError::write(err.to_string()),
            _ => tempo_core::TempoError::read(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_core::TempoError;

    #[test]
    fn write_errors_stay_write_errors() {
        let err: TempoError = StorageError::write("disk full").into();
        assert!(matches!(err, TempoError::Write(_)));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn other_errors_become_read_errors() {
        let err: TempoError = StorageError::read("bad file").into();
        assert!(matches!(err, TempoError::Read(_)));

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TempoError = StorageError::from(io).into();
        assert!(matches!(err, TempoError::Read(_)));
    }
}
