//! Bundle definitions (bundle.json)
//!
//! A bundle describes the invocation image that performs its actions, the
//! parameters and credentials it accepts, and the outputs it produces.
//! Parameter and output types live in `definitions`, which is also where
//! defaults are declared.

pub mod dependency;

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, bundle, fs};

pub use dependency::{DependencyLock, DependencySolver, ExtensionSolver};

/// Default image type when a bundle does not declare one
fn default_image_type() -> String {
    "docker".to_string()
}

/// An image able to run the bundle's actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationImage {
    pub image: String,

    #[serde(rename = "imageType", default = "default_image_type")]
    pub image_type: String,
}

/// A JSON-schema-like type definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<serde_json::Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub definition: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,

    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDefinition {
    pub definition: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A custom action beyond install, upgrade and uninstall
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDefinition {
    #[serde(default)]
    pub modifies: bool,

    #[serde(default)]
    pub stateless: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A bundle definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(rename = "schemaVersion", default)]
    pub schema_version: String,

    pub name: String,

    #[serde(default)]
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "invocationImages", default)]
    pub invocation_images: Vec<InvocationImage>,

    #[serde(default)]
    pub parameters: IndexMap<String, ParameterDefinition>,

    #[serde(default)]
    pub credentials: IndexMap<String, CredentialDefinition>,

    #[serde(default)]
    pub outputs: IndexMap<String, OutputDefinition>,

    #[serde(default)]
    pub definitions: IndexMap<String, Definition>,

    #[serde(default)]
    pub actions: IndexMap<String, ActionDefinition>,

    /// Extensions keyed by extension name
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub custom: IndexMap<String, serde_json::Value>,
}

impl Bundle {
    /// Load a bundle definition from a file
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| fs::read_failed(path, &e))?;
        Self::from_slice(&data, &path.display().to_string())
    }

    /// Parse a bundle definition, `origin` names where the bytes came from
    pub fn from_slice(data: &[u8], origin: &str) -> Result<Self> {
        serde_json::from_slice(data).map_err(|e| bundle::parse_failed(origin, e.to_string()))
    }

    /// Names of the parameters this bundle declares
    pub fn parameter_names(&self) -> HashSet<&str> {
        self.parameters.keys().map(String::as_str).collect()
    }

    /// Default value of a parameter, rendered as a string
    pub fn parameter_default(&self, name: &str) -> Option<String> {
        let param = self.parameters.get(name)?;
        let default = self.definitions.get(&param.definition)?.default.as_ref()?;
        Some(render_value(default))
    }

    /// Default value of an output, if its definition declares one
    pub fn output_default(&self, name: &str) -> Option<&serde_json::Value> {
        let output = self.outputs.get(name)?;
        self.definitions.get(&output.definition)?.default.as_ref()
    }

    /// Check the bundle's internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(bundle::validation_failed("bundle name cannot be empty"));
        }

        if self.version.trim().is_empty() {
            return Err(bundle::validation_failed(format!(
                "bundle {} must declare a version",
                self.name
            )));
        }

        if self.invocation_images.is_empty() {
            return Err(bundle::validation_failed(format!(
                "bundle {} must declare at least one invocation image",
                self.name
            )));
        }

        if let Some(image) = self
            .invocation_images
            .iter()
            .find(|i| i.image.trim().is_empty())
        {
            return Err(bundle::validation_failed(format!(
                "bundle {} declares an invocation image of type {} without an image reference",
                self.name, image.image_type
            )));
        }

        for (name, param) in &self.parameters {
            let definition = self.definitions.get(&param.definition).ok_or_else(|| {
                bundle::validation_failed(format!(
                    "parameter {name} references undefined definition {}",
                    param.definition
                ))
            })?;

            if let (Some(default), Some(allowed)) = (&definition.default, &definition.allowed) {
                if !allowed.contains(default) {
                    return Err(bundle::validation_failed(format!(
                        "default value of parameter {name} is not one of its allowed values"
                    )));
                }
            }
        }

        for (name, output) in &self.outputs {
            if !self.definitions.contains_key(&output.definition) {
                return Err(bundle::validation_failed(format!(
                    "output {name} references undefined definition {}",
                    output.definition
                )));
            }
        }

        Ok(())
    }
}

/// Render a JSON value as text: strings verbatim, everything else as JSON
pub fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
