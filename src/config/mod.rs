//! Configuration for Stevedore
//!
//! This module contains:
//! - [`Config`]: where Stevedore keeps its cache, registry and installation records
//! - [`Manifest`]: the `stevedore.yaml` file declaring per-dependency parameter overrides
//!
//! ## Home Layout
//!
//! ```text
//! ~/.stevedore/
//! ├── cache/            # resolved bundles, one directory per reference
//! ├── installations/    # one JSON record per installation
//! └── registry/         # local registry bundles are pulled from
//! ```

pub mod manifest;

use std::path::{Path, PathBuf};

use crate::error::{Result, StevedoreError};

pub use manifest::{DependencyOverrides, MANIFEST_FILE, Manifest};

/// Default home directory name under the user's home directory
const HOME_DIR: &str = ".stevedore";

const CACHE_DIR: &str = "cache";
const INSTALLATIONS_DIR: &str = "installations";
const REGISTRY_DIR: &str = "registry";

/// Environment variable overriding the home directory
pub const HOME_ENV: &str = "STEVEDORE_HOME";

/// Environment variable overriding the registry directory
pub const REGISTRY_ENV: &str = "STEVEDORE_REGISTRY";

/// Resolved locations used by a Stevedore run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub home: PathBuf,
    pub registry: PathBuf,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// `STEVEDORE_HOME` overrides `~/.stevedore` and `STEVEDORE_REGISTRY`
    /// overrides `<home>/registry`.
    pub fn from_env() -> Result<Self> {
        let home = match std::env::var_os(HOME_ENV) {
            Some(home) if !home.is_empty() => PathBuf::from(home),
            _ => dirs::home_dir()
                .ok_or(StevedoreError::HomeDirUnavailable)?
                .join(HOME_DIR),
        };

        let mut config = Self::with_home(home);
        if let Some(registry) = std::env::var_os(REGISTRY_ENV).filter(|r| !r.is_empty()) {
            config.registry = PathBuf::from(registry);
        }

        Ok(config)
    }

    /// Configuration rooted at an explicit home directory
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            registry: home.join(REGISTRY_DIR),
            home,
        }
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.home.join(CACHE_DIR)
    }

    pub fn installations_dir(&self) -> PathBuf {
        self.home.join(INSTALLATIONS_DIR)
    }

    pub fn registry_dir(&self) -> &Path {
        &self.registry
    }
}
