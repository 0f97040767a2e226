//! Test fixtures shared by unit tests.
//!
//! ```ignore
//! let home = TestHome::new();
//! home.publish("example/mysql:v1", &simple_bundle_json("mysql"), None);
//! ```

use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;

use crate::config::Config;

/// A throwaway Stevedore home with its registry inside it
pub struct TestHome {
    /// Keeps the directory alive for the duration of the test
    pub temp: TempDir,
    pub config: Config,
}

impl TestHome {
    /// # Panics
    ///
    /// Panics if the temp directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let config = Config::with_home(temp.path());
        Self { temp, config }
    }

    /// Publish a bundle to the registry under `reference`
    ///
    /// # Panics
    ///
    /// Panics if the registry entry cannot be written.
    pub fn publish(&self, reference: &str, bundle_json: &str, relocation: Option<&str>) -> PathBuf {
        let entry = crate::cache::paths::entry_path(self.config.registry_dir(), reference)
            .expect("Invalid reference");
        std::fs::create_dir_all(&entry).expect("Failed to create registry entry");
        std::fs::write(entry.join(crate::cache::BUNDLE_FILE), bundle_json)
            .expect("Failed to write bundle");
        if let Some(mapping) = relocation {
            std::fs::write(entry.join(crate::cache::RELOCATION_MAPPING_FILE), mapping)
                .expect("Failed to write relocation mapping");
        }
        entry
    }

    /// Write a file under the home directory and return its path
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.temp.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}

/// A valid bundle with one optional parameter and no outputs
#[must_use]
pub fn simple_bundle_json(name: &str) -> String {
    json!({
        "schemaVersion": "v1.0.0",
        "name": name,
        "version": "0.1.0",
        "invocationImages": [{"image": format!("example/{name}-installer:v0.1.0")}],
        "parameters": {"log-level": {"definition": "log-level"}},
        "definitions": {"log-level": {"type": "string", "default": "info"}}
    })
    .to_string()
}
