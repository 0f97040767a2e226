//! A dependency waiting to run

use std::collections::BTreeMap;
use std::path::PathBuf;

use indexmap::IndexMap;

use crate::bundle::dependency::DependencyLock;

/// Where a dependency is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyState {
    Queued,
    Prepared,
    Executed,
    Failed,
}

/// A resolved dependency and everything needed to run it
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedDependency {
    pub alias: String,

    /// Reference the dependency was resolved to
    pub reference: String,

    /// Local bundle.json, set once pulled
    pub bundle_path: Option<PathBuf>,

    pub relocation_mapping: Option<PathBuf>,

    /// Raw bundle.json, staged for the parent's invocation image
    pub bundle_contents: Vec<u8>,

    /// Resolved parameter overrides
    pub parameters: BTreeMap<String, String>,

    /// Outputs read back after the dependency ran. Unset before it runs and
    /// after an uninstall.
    pub outputs: Option<IndexMap<String, serde_json::Value>>,

    pub state: DependencyState,
}

impl QueuedDependency {
    pub fn new(lock: DependencyLock) -> Self {
        Self {
            alias: lock.alias,
            reference: lock.reference,
            bundle_path: None,
            relocation_mapping: None,
            bundle_contents: Vec::new(),
            parameters: BTreeMap::new(),
            outputs: None,
            state: DependencyState::Queued,
        }
    }

    /// Installation name this dependency runs as under `parent`
    pub fn installation_name(&self, parent: &str) -> String {
        format!("{parent}-{}", self.alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_queued() {
        let dep = QueuedDependency::new(DependencyLock {
            alias: "db".to_string(),
            reference: "example/mysql:v1".to_string(),
        });
        assert_eq!(dep.state, DependencyState::Queued);
        assert!(dep.outputs.is_none());
        assert_eq!(dep.installation_name("app"), "app-db");
    }
}
