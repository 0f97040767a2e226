//! Bundle definition errors

use super::StevedoreError;

/// Creates a bundle not found error
pub fn not_found(reference: impl Into<String>) -> StevedoreError {
    StevedoreError::BundleNotFound {
        reference: reference.into(),
    }
}

/// Creates an invalid bundle reference error
pub fn invalid_reference(reference: impl Into<String>) -> StevedoreError {
    StevedoreError::InvalidReference {
        reference: reference.into(),
    }
}

/// Creates a bundle parse error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> StevedoreError {
    StevedoreError::BundleParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a bundle validation failed error
pub fn validation_failed(message: impl Into<String>) -> StevedoreError {
    StevedoreError::BundleValidationFailed {
        message: message.into(),
    }
}
