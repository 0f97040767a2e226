//! File system errors

use std::path::Path;

use super::StevedoreError;

/// Creates a file not found error
pub fn not_found(path: &Path) -> StevedoreError {
    StevedoreError::FileNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a read error, mapping a missing file to [`StevedoreError::FileNotFound`]
pub fn read_failed(path: &Path, err: &std::io::Error) -> StevedoreError {
    if err.kind() == std::io::ErrorKind::NotFound {
        return not_found(path);
    }
    StevedoreError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a write error
pub fn write_failed(path: &Path, reason: impl std::fmt::Display) -> StevedoreError {
    StevedoreError::FileWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
