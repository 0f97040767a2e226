//! Bundle dependencies
//!
//! Dependencies are declared through the `io.cnab.dependencies` extension:
//!
//! ```json
//! "custom": {
//!   "io.cnab.dependencies": {
//!     "requires": {
//!       "mysql": { "bundle": "acme/mysql:v0.1.0" }
//!     }
//!   }
//! }
//! ```
//!
//! Declaration order is preserved and becomes the order dependencies run in.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Bundle;
use crate::error::{Result, bundle};

/// Name of the dependencies extension in a bundle's `custom` section
pub const DEPENDENCIES_EXTENSION: &str = "io.cnab.dependencies";

/// The dependencies extension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependencies {
    #[serde(default)]
    pub requires: IndexMap<String, Dependency>,
}

/// One required bundle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    #[serde(default)]
    pub bundle: String,
}

/// A resolved dependency: the alias it is known by and the bundle it points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyLock {
    pub alias: String,
    pub reference: String,
}

impl Bundle {
    /// Read the dependencies extension, `None` when the bundle declares none
    pub fn dependencies(&self) -> Result<Option<Dependencies>> {
        let Some(raw) = self.custom.get(DEPENDENCIES_EXTENSION) else {
            return Ok(None);
        };

        let deps: Dependencies = serde_json::from_value(raw.clone()).map_err(|e| {
            bundle::validation_failed(format!(
                "invalid {DEPENDENCIES_EXTENSION} extension in bundle {}: {e}",
                self.name
            ))
        })?;
        Ok(Some(deps))
    }
}

/// Computes the ordered list of dependencies a bundle needs
pub trait DependencySolver {
    fn resolve_dependencies(&self, bundle: &Bundle) -> Result<Vec<DependencyLock>>;
}

/// Solver reading the bundle's dependencies extension
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionSolver;

impl DependencySolver for ExtensionSolver {
    fn resolve_dependencies(&self, bun: &Bundle) -> Result<Vec<DependencyLock>> {
        let Some(deps) = bun.dependencies()? else {
            return Ok(Vec::new());
        };

        deps.requires
            .into_iter()
            .map(|(alias, dep)| {
                if alias.is_empty() || alias.contains('#') {
                    return Err(bundle::validation_failed(format!(
                        "invalid dependency alias '{alias}' in bundle {}",
                        bun.name
                    )));
                }
                if dep.bundle.trim().is_empty() {
                    return Err(bundle::validation_failed(format!(
                        "dependency {alias} of bundle {} does not specify a bundle reference",
                        bun.name
                    )));
                }
                Ok(DependencyLock {
                    alias,
                    reference: dep.bundle,
                })
            })
            .collect()
    }
}
