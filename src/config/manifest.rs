//! Manifest (stevedore.yaml)
//!
//! ```yaml
//! name: wordpress
//! dependencies:
//!   mysql:
//!     parameters:
//!       database-name: wordpress
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, config, fs};

/// Default manifest file name, looked up in the current directory
pub const MANIFEST_FILE: &str = "stevedore.yaml";

/// Overrides a manifest declares for one dependency
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyOverrides {
    #[serde(default)]
    pub parameters: IndexMap<String, String>,
}

/// The project manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Parameter overrides keyed by dependency alias
    #[serde(default)]
    pub dependencies: IndexMap<String, DependencyOverrides>,
}

impl Manifest {
    /// Parse a manifest from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let manifest: Self = serde_yaml::from_str(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load a manifest from a file
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|e| fs::read_failed(path, &e))?;
        let manifest: Self = serde_yaml::from_str(&yaml)
            .map_err(|e| config::parse_failed(path.display().to_string(), e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load a manifest if the file exists, otherwise an empty manifest
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Overrides declared for a dependency alias
    pub fn dependency(&self, alias: &str) -> Option<&DependencyOverrides> {
        self.dependencies.get(alias)
    }

    fn validate(&self) -> Result<()> {
        for alias in self.dependencies.keys() {
            if alias.is_empty() || alias.contains('#') {
                return Err(config::invalid(format!(
                    "Invalid dependency alias '{alias}' in manifest"
                )));
            }
        }
        Ok(())
    }
}
