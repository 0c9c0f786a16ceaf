//! # Directory Errors

use thiserror::Error;

use crate::store::StoreError;

/// Result type for directory operations
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Directory and stream errors
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// The directory has been closed; no further operations are allowed.
    #[error("Directory is closed")]
    DirectoryClosed,

    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A stream's connection is unusable and reopening it did not restore
    /// the required capability.
    #[error("Stream unusable for file: {0}")]
    StreamUnusable(String),

    #[error("Read past end of file: {0}")]
    ReadPastEof(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Maps a store-level error for `name` into the directory taxonomy,
/// surfacing not-found as [`DirectoryError::FileNotFound`].
pub(crate) fn map_store_error(name: &str, err: StoreError) -> DirectoryError {
    match err {
        StoreError::NotFound(_) => DirectoryError::FileNotFound(name.to_string()),
        other => DirectoryError::Store(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_file_not_found() {
        let err = map_store_error("seg_1", StoreError::NotFound("seg_1".into()));
        assert!(matches!(err, DirectoryError::FileNotFound(name) if name == "seg_1"));
    }

    #[test]
    fn test_other_store_errors_pass_through() {
        let err = map_store_error("seg_1", StoreError::Io("network".into()));
        assert!(matches!(err, DirectoryError::Store(StoreError::Io(_))));
    }
}
