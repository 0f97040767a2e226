//! Dependency errors
//!
//! Every error that crosses a dependency boundary carries the alias of the
//! dependency it came from.

use super::StevedoreError;

/// Wraps a solver failure
pub fn resolution_failed(source: StevedoreError) -> StevedoreError {
    StevedoreError::DependencyResolutionFailed {
        source: Box::new(source),
    }
}

/// Wraps a pull failure for a dependency
pub fn pull_failed(alias: impl Into<String>, source: StevedoreError) -> StevedoreError {
    StevedoreError::DependencyPullFailed {
        alias: alias.into(),
        source: Box::new(source),
    }
}

/// Wraps a validation failure for a dependency
pub fn invalid_bundle(alias: impl Into<String>, source: StevedoreError) -> StevedoreError {
    StevedoreError::InvalidDependencyBundle {
        alias: alias.into(),
        source: Box::new(source),
    }
}

/// Wraps an action failure for a dependency
pub fn execution_failed(alias: impl Into<String>, source: StevedoreError) -> StevedoreError {
    StevedoreError::DependencyExecutionFailed {
        alias: alias.into(),
        source: Box::new(source),
    }
}

pub fn invalid_manifest_parameter(
    alias: impl Into<String>,
    parameter: impl Into<String>,
) -> StevedoreError {
    StevedoreError::InvalidManifestParameter {
        alias: alias.into(),
        parameter: parameter.into(),
    }
}

pub fn invalid_command_line_parameter(
    alias: impl Into<String>,
    parameter: impl Into<String>,
) -> StevedoreError {
    let alias = alias.into();
    let parameter = parameter.into();
    StevedoreError::InvalidCommandLineParameter {
        key: format!("{alias}#{parameter}"),
        alias,
        parameter,
    }
}

pub fn unknown_alias(key: impl Into<String>, alias: impl Into<String>) -> StevedoreError {
    StevedoreError::UnknownDependencyAlias {
        key: key.into(),
        alias: alias.into(),
    }
}
