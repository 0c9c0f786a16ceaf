//! # Object Store Errors

use thiserror::Error;

/// Result type for object store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Object store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid object name: {0}")]
    InvalidName(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Maps a std I/O error for `name`, distinguishing not-found.
    pub fn from_io(name: &str, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound(name.to_string())
        } else {
            StoreError::Io(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_not_found_mapping() {
        let err = StoreError::from_io("seg_1", io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(matches!(err, StoreError::NotFound(name) if name == "seg_1"));
    }

    #[test]
    fn test_other_io_mapping() {
        let err = StoreError::from_io(
            "seg_1",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, StoreError::Io(_)));
    }
}
