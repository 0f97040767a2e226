//! Parameter errors

use super::StevedoreError;

/// Creates an invalid NAME=VALUE error
pub fn invalid_format(input: impl Into<String>) -> StevedoreError {
    StevedoreError::InvalidParameterFormat {
        input: input.into(),
    }
}

pub fn unknown(bundle: impl Into<String>, parameter: impl Into<String>) -> StevedoreError {
    StevedoreError::UnknownParameter {
        bundle: bundle.into(),
        parameter: parameter.into(),
    }
}

pub fn missing_required(bundle: impl Into<String>, parameter: impl Into<String>) -> StevedoreError {
    StevedoreError::MissingRequiredParameter {
        bundle: bundle.into(),
        parameter: parameter.into(),
    }
}
