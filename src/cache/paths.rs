//! Cache path utilities and constants
//!
//! Registry and cache share one layout: each bundle reference maps to a
//! directory named after its slug holding `bundle.json` and, for relocated
//! bundles, `relocation-mapping.json`.

use std::path::{Path, PathBuf};

use crate::error::{Result, bundle};

/// Bundle definition file inside an entry
pub const BUNDLE_FILE: &str = "bundle.json";

/// Relocation mapping file inside an entry
pub const RELOCATION_MAPPING_FILE: &str = "relocation-mapping.json";

/// Hex digits of the reference digest kept in a slug
const REFERENCE_ID_LEN: usize = 12;

/// Convert a bundle reference to a path-safe directory name
///
/// The readable part alone is ambiguous (`acme/mysql:v1` and `acme-mysql:v1`
/// share it), so a short digest of the reference is appended.
///
/// Example: "localhost:5000/acme/mysql:v0.1.0" -> "localhost-5000-acme-mysql-v0.1.0-<id>"
pub fn reference_to_slug(reference: &str) -> Result<String> {
    let reference = reference.trim();
    let readable = reference
        .replace([':', '/', '\\', '@'], "-")
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if matches!(readable.as_str(), "" | "." | "..") {
        return Err(bundle::invalid_reference(reference));
    }

    let id = blake3::hash(reference.as_bytes()).to_hex();
    Ok(format!("{readable}-{}", &id.as_str()[..REFERENCE_ID_LEN]))
}

/// Directory of a reference under a registry or cache root
pub fn entry_path(root: &Path, reference: &str) -> Result<PathBuf> {
    Ok(root.join(reference_to_slug(reference)?))
}
