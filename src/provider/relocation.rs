//! Relocated invocation images
//!
//! When a bundle is copied to another registry, a relocation mapping records
//! where each original image now lives. Before an operation runs, the mapping
//! document is staged into the invocation image and the operation's image is
//! swapped for its relocated equivalent.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Result, fs, provider};
use crate::provider::Operation;

/// Original image reference -> relocated image reference
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelocationMapping {
    images: HashMap<String, String>,
}

impl RelocationMapping {
    pub fn from_slice(data: &[u8]) -> serde_json::Result<Self> {
        Ok(Self {
            images: serde_json::from_slice(data)?,
        })
    }

    /// Relocated reference for an image, if it was relocated
    pub fn lookup(&self, image: &str) -> Option<&str> {
        self.images.get(image).map(String::as_str)
    }
}

/// Applies one relocation mapping document to operations
#[derive(Debug, Clone)]
pub struct RelocationMapper {
    document: String,
    staged_path: String,
    mapping: RelocationMapping,
}

impl RelocationMapper {
    /// Build a mapper from the raw mapping document
    pub fn new(
        document: &[u8],
        staged_path: impl Into<String>,
        origin: &str,
    ) -> Result<Self> {
        let mapping = RelocationMapping::from_slice(document)
            .map_err(|e| provider::invalid_relocation_mapping(origin, e.to_string()))?;

        Ok(Self {
            document: String::from_utf8_lossy(document).into_owned(),
            staged_path: staged_path.into(),
            mapping,
        })
    }

    /// Read a mapping document from disk
    pub fn load(path: &Path, staged_path: impl Into<String>) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| fs::read_failed(path, &e))?;
        Self::new(&data, staged_path, &path.display().to_string())
    }

    /// Stage the mapping document and relocate the operation's image
    ///
    /// An image with no entry in the mapping is left as it is.
    pub fn apply(&self, op: &mut Operation) {
        op.files
            .insert(self.staged_path.clone(), self.document.clone());

        if let Some(relocated) = self.mapping.lookup(&op.image) {
            tracing::debug!(from = %op.image, to = relocated, "relocated invocation image");
            op.image = relocated.to_string();
        }
    }
}
