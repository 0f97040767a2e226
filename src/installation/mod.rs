//! Installation records
//!
//! Every action run against a bundle leaves a record named after the
//! installation: the bundle definition it ran, the parameters it ran with
//! and the outputs it produced. Dependencies read their outputs back from
//! here so later steps can use them.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::bundle::Bundle;
use crate::error::{Result, fs as fs_error, installation};

/// Outcome of the last action recorded for an installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallationStatus {
    Succeeded,
    Failed,
}

impl std::fmt::Display for InstallationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstallationStatus::Succeeded => write!(f, "succeeded"),
            InstallationStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A persisted installation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installation {
    pub name: String,

    pub bundle: Bundle,

    /// Reference the bundle was pulled from, if it was pulled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_reference: Option<String>,

    pub bundle_digest: String,

    /// Last action run
    pub action: String,

    pub status: InstallationStatus,

    #[serde(default)]
    pub parameters: BTreeMap<String, String>,

    #[serde(default)]
    pub outputs: IndexMap<String, serde_json::Value>,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

impl Installation {
    /// A fresh record for a bundle about to be installed
    pub fn new(name: impl Into<String>, bundle: Bundle, bundle_digest: String) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            bundle,
            bundle_reference: None,
            bundle_digest,
            action: String::new(),
            status: InstallationStatus::Succeeded,
            parameters: BTreeMap::new(),
            outputs: IndexMap::new(),
            created: now,
            modified: now,
        }
    }
}

/// Persistent storage of installation records
pub trait InstallationStore {
    fn read(&self, name: &str) -> Result<Installation>;

    fn save(&self, installation: &Installation) -> Result<()>;

    fn delete(&self, name: &str) -> Result<()>;

    /// Names of all known installations, sorted
    fn list(&self) -> Result<Vec<String>>;
}

/// Store keeping one JSON file per installation
#[derive(Debug, Clone)]
pub struct FileInstallationStore {
    dir: PathBuf,
}

impl FileInstallationStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(installation::read_failed(name, "invalid installation name"));
        }
        Ok(self.dir.join(format!("{name}.json")))
    }
}

impl InstallationStore for FileInstallationStore {
    fn read(&self, name: &str) -> Result<Installation> {
        let path = self.record_path(name)?;
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(installation::not_found(name));
            }
            Err(e) => return Err(installation::read_failed(name, e.to_string())),
        };

        serde_json::from_slice(&data).map_err(|e| installation::read_failed(name, e.to_string()))
    }

    fn save(&self, record: &Installation) -> Result<()> {
        let path = self.record_path(&record.name)?;
        fs::create_dir_all(&self.dir).map_err(|e| fs_error::write_failed(&self.dir, e))?;

        let data = serde_json::to_vec_pretty(record)?;

        // Write-then-rename so readers never see a partial record
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| fs_error::write_failed(&path, e))?;
        tmp.write_all(&data)
            .map_err(|e| fs_error::write_failed(&path, e))?;
        tmp.persist(&path)
            .map_err(|e| fs_error::write_failed(&path, e.error))?;

        tracing::debug!(installation = %record.name, path = %path.display(), "saved installation");
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.record_path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(installation::not_found(name))
            }
            Err(e) => Err(fs_error::write_failed(&path, e)),
        }
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| fs_error::read_failed(&self.dir, &e))?;
        let mut names: Vec<String> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| record_name(&path))
            .collect();
        names.sort();
        Ok(names)
    }
}

fn record_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.starts_with('.'))
        .map(str::to_string)
}
