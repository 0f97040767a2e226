//! Common test utilities for Stevedore integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::json;
use tempfile::TempDir;

pub const MYSQL: &str = "example/mysql:v1";
pub const REDIS: &str = "example/redis:v1";
pub const APP: &str = "example/app:v1";

/// A throwaway Stevedore home, registry and working directory
pub struct TestEnv {
    pub temp: TempDir,
    pub home: PathBuf,
    pub registry: PathBuf,
    pub work: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let home = temp.path().join("home");
        let registry = temp.path().join("registry");
        let work = temp.path().join("work");
        std::fs::create_dir_all(&work).expect("Failed to create work directory");
        Self {
            temp,
            home,
            registry,
            work,
        }
    }

    /// A home with mysql and redis published and the app bundle both
    /// published and written to `work/bundle.json`
    pub fn with_app() -> Self {
        let env = Self::new();
        env.publish(MYSQL, &mysql_bundle(), None);
        env.publish(
            REDIS,
            &redis_bundle(),
            Some(r#"{"example/redis-installer:v2": "mirror.local/redis-installer:v2"}"#),
        );
        env.publish(APP, &app_bundle(), None);
        env.write_file("bundle.json", &app_bundle());
        env
    }

    /// The stevedore binary, pointed at this environment
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("stevedore").expect("Failed to find stevedore binary");
        cmd.current_dir(&self.work);
        cmd.env("STEVEDORE_HOME", &self.home);
        cmd.env("STEVEDORE_REGISTRY", &self.registry);
        cmd.env_remove("STEVEDORE_LOG");
        cmd.env_remove("STEVEDORE_MANIFEST");
        cmd
    }

    /// Publish a bundle under `reference`, laid out the way the registry expects
    pub fn publish(&self, reference: &str, bundle_json: &str, relocation: Option<&str>) {
        let entry = self.registry.join(reference_to_slug(reference));
        std::fs::create_dir_all(&entry).expect("Failed to create registry entry");
        std::fs::write(entry.join("bundle.json"), bundle_json).expect("Failed to write bundle");
        if let Some(mapping) = relocation {
            std::fs::write(entry.join("relocation-mapping.json"), mapping)
                .expect("Failed to write relocation mapping");
        }
    }

    /// Write a file under the working directory
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn installation_path(&self, name: &str) -> PathBuf {
        self.home.join("installations").join(format!("{name}.json"))
    }

    pub fn read_installation(&self, name: &str) -> serde_json::Value {
        read_json(&self.installation_path(name))
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn read_json(path: &Path) -> serde_json::Value {
    let data = std::fs::read(path).expect("Failed to read file");
    serde_json::from_slice(&data).expect("Failed to parse JSON")
}

/// Registry directory name for a reference: readable part plus a short
/// digest of the reference
pub fn reference_to_slug(reference: &str) -> String {
    let readable = reference
        .replace([':', '/', '@'], "-")
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    let id = blake3::hash(reference.as_bytes()).to_hex();
    format!("{readable}-{}", &id.as_str()[..12])
}

pub fn mysql_bundle() -> String {
    json!({
        "name": "mysql",
        "version": "0.1.0",
        "invocationImages": [{"image": "example/mysql-installer:v1"}],
        "parameters": {
            "database": {"definition": "string-default"},
            "user": {"definition": "string"}
        },
        "outputs": {
            "connstr": {"definition": "connstr"}
        },
        "definitions": {
            "string": {"type": "string"},
            "string-default": {"type": "string", "default": "mydb"},
            "connstr": {"type": "string", "default": "mysql://db:3306"}
        }
    })
    .to_string()
}

pub fn redis_bundle() -> String {
    json!({
        "name": "redis",
        "version": "0.2.0",
        "invocationImages": [{"image": "example/redis-installer:v2"}],
        "parameters": {"size": {"definition": "size"}},
        "definitions": {"size": {"type": "string", "default": "256Mi"}}
    })
    .to_string()
}

pub fn app_bundle() -> String {
    json!({
        "name": "app",
        "version": "1.0.0",
        "invocationImages": [{"image": "example/app-installer:v1"}],
        "parameters": {"replicas": {"definition": "replicas"}},
        "definitions": {"replicas": {"type": "string", "default": "1"}},
        "actions": {"backup": {"modifies": false}},
        "custom": {
            "io.cnab.dependencies": {
                "requires": {
                    "db": {"bundle": MYSQL},
                    "cache": {"bundle": REDIS}
                }
            }
        }
    })
    .to_string()
}
