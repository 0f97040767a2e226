//! Installation record errors

use super::StevedoreError;

/// Creates an installation not found error
pub fn not_found(name: impl Into<String>) -> StevedoreError {
    StevedoreError::InstallationNotFound { name: name.into() }
}

/// Creates an installation read error
pub fn read_failed(name: impl Into<String>, reason: impl Into<String>) -> StevedoreError {
    StevedoreError::InstallationReadFailed {
        name: name.into(),
        reason: reason.into(),
    }
}
