//! Error types and handling for Stevedore
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`bundle`]: Bundle definition errors
//! - [`deps`]: Dependency resolution, preparation and execution errors
//! - [`params`]: Parameter errors
//! - [`installation`]: Installation record errors
//! - [`provider`]: Driver and relocation errors
//! - [`config`]: Configuration and manifest errors
//! - [`fs`]: File system errors

#![allow(dead_code)]

pub mod bundle;
pub mod config;
pub mod deps;
pub mod fs;
pub mod installation;
pub mod params;
pub mod provider;


use std::fmt::Write;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Stevedore operations
#[derive(Error, Diagnostic, Debug)]
pub enum StevedoreError {
    // Bundle errors
    #[error("Bundle '{reference}' not found")]
    #[diagnostic(
        code(stevedore::bundle::not_found),
        help("Check that the reference is correct and published to the registry")
    )]
    BundleNotFound { reference: String },

    #[error("Invalid bundle reference '{reference}'")]
    #[diagnostic(
        code(stevedore::bundle::invalid_reference),
        help("Use a reference of the form REGISTRY/REPOSITORY:TAG")
    )]
    InvalidReference { reference: String },

    #[error("Failed to parse bundle definition {path}: {reason}")]
    #[diagnostic(code(stevedore::bundle::parse_failed))]
    BundleParseFailed { path: String, reason: String },

    #[error("Bundle validation failed: {message}")]
    #[diagnostic(code(stevedore::bundle::validation_failed))]
    BundleValidationFailed { message: String },

    // Dependency errors
    #[error("No bundle was specified, could not identify dependencies")]
    #[diagnostic(
        code(stevedore::deps::no_bundle_selected),
        help("This is a bug. Please report it with the command you ran.")
    )]
    NoBundleSelected,

    #[error("Failed to resolve dependencies")]
    #[diagnostic(code(stevedore::deps::resolution_failed))]
    DependencyResolutionFailed { source: Box<StevedoreError> },

    #[error("Error pulling dependency {alias}")]
    #[diagnostic(code(stevedore::deps::pull_failed))]
    DependencyPullFailed {
        alias: String,
        source: Box<StevedoreError>,
    },

    #[error("Invalid bundle {alias}")]
    #[diagnostic(code(stevedore::deps::invalid_bundle))]
    InvalidDependencyBundle {
        alias: String,
        source: Box<StevedoreError>,
    },

    #[error(
        "Invalid dependencies.{alias}.parameters entry, {parameter} is not a parameter defined in that bundle"
    )]
    #[diagnostic(
        code(stevedore::deps::invalid_manifest_parameter),
        help("Remove the entry from the manifest or check the dependency's parameters")
    )]
    InvalidManifestParameter { alias: String, parameter: String },

    #[error("Invalid --param {key}, {parameter} is not a parameter defined in the bundle {alias}")]
    #[diagnostic(code(stevedore::deps::invalid_param_override))]
    InvalidCommandLineParameter {
        key: String,
        alias: String,
        parameter: String,
    },

    #[error("Invalid --param {key}, {alias} is not a dependency of this bundle")]
    #[diagnostic(code(stevedore::deps::unknown_alias))]
    UnknownDependencyAlias { key: String, alias: String },

    #[error("Dependencies must be prepared before they are executed")]
    #[diagnostic(
        code(stevedore::deps::not_prepared),
        help("This is a bug. Please report it with the command you ran.")
    )]
    DependenciesNotPrepared,

    #[error("Error executing dependency {alias}")]
    #[diagnostic(code(stevedore::deps::execution_failed))]
    DependencyExecutionFailed {
        alias: String,
        source: Box<StevedoreError>,
    },

    // Parameter errors
    #[error("Invalid parameter '{input}', expected NAME=VALUE")]
    #[diagnostic(code(stevedore::params::invalid_format))]
    InvalidParameterFormat { input: String },

    #[error("Parameter '{parameter}' is not defined in bundle {bundle}")]
    #[diagnostic(code(stevedore::params::unknown))]
    UnknownParameter { bundle: String, parameter: String },

    #[error("Parameter '{parameter}' is required by bundle {bundle}")]
    #[diagnostic(
        code(stevedore::params::missing_required),
        help("Pass it with --param NAME=VALUE")
    )]
    MissingRequiredParameter { bundle: String, parameter: String },

    // Installation errors
    #[error("Installation '{name}' not found")]
    #[diagnostic(
        code(stevedore::installation::not_found),
        help("Run 'stevedore list' to see known installations")
    )]
    InstallationNotFound { name: String },

    #[error("Failed to read installation '{name}': {reason}")]
    #[diagnostic(code(stevedore::installation::read_failed))]
    InstallationReadFailed { name: String, reason: String },

    // Provider errors
    #[error("Unsupported driver: {driver}")]
    #[diagnostic(
        code(stevedore::provider::unsupported_driver),
        help("Supported drivers: debug, dry-run")
    )]
    UnsupportedDriver { driver: String },

    #[error("Action '{action}' is not defined by bundle {bundle}")]
    #[diagnostic(code(stevedore::provider::unknown_action))]
    UnknownAction { bundle: String, action: String },

    #[error("Bundle {bundle} has no invocation image")]
    #[diagnostic(code(stevedore::provider::no_invocation_image))]
    NoInvocationImage { bundle: String },

    #[error("Invalid relocation mapping {path}: {reason}")]
    #[diagnostic(code(stevedore::provider::invalid_relocation_mapping))]
    InvalidRelocationMapping { path: String, reason: String },

    #[error("Driver failed: {message}")]
    #[diagnostic(code(stevedore::provider::driver_failed))]
    DriverFailed { message: String },

    // Configuration errors
    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(stevedore::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(stevedore::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Could not determine home directory")]
    #[diagnostic(
        code(stevedore::config::no_home),
        help("Set STEVEDORE_HOME to the directory Stevedore should use")
    )]
    HomeDirUnavailable,

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(stevedore::fs::not_found))]
    FileNotFound { path: String },

    #[error("Error reading {path}: {reason}")]
    #[diagnostic(code(stevedore::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Error writing {path}: {reason}")]
    #[diagnostic(code(stevedore::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(stevedore::fs::io_error))]
    IoError { message: String },

    // Cache errors
    #[error("Cache operation failed: {message}")]
    #[diagnostic(code(stevedore::cache::operation_failed))]
    CacheOperationFailed { message: String },
}

impl StevedoreError {
    /// The message followed by every underlying cause, joined with `: `
    pub fn chain(&self) -> String {
        let mut message = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            let _ = write!(message, ": {err}");
            cause = err.source();
        }
        message
    }
}

impl From<std::io::Error> for StevedoreError {
    fn from(err: std::io::Error) -> Self {
        StevedoreError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for StevedoreError {
    fn from(err: serde_yaml::Error) -> Self {
        StevedoreError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StevedoreError {
    fn from(err: serde_json::Error) -> Self {
        StevedoreError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, StevedoreError>;
