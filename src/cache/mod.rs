//! Bundle resolution and caching
//!
//! Bundles referenced by tag are pulled from a registry into a local cache
//! so that later runs, and the invocation itself, read them from disk.
//!
//! ## Cache Structure
//!
//! ```text
//! <home>/cache/
//! └── <reference-slug>/
//!     ├── bundle.json
//!     └── relocation-mapping.json   (only for relocated bundles)
//! ```
//!
//! The registry is a directory with the same layout. A cached entry is reused
//! until a pull is forced.

pub mod paths;

use std::fs;
use std::path::{Path, PathBuf};

use crate::bundle::Bundle;
use crate::error::{Result, StevedoreError, bundle, fs as fs_error};

pub use paths::{BUNDLE_FILE, RELOCATION_MAPPING_FILE};

/// Options for pulling a bundle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundlePullOptions {
    /// Reference (tag) of the bundle
    pub reference: String,

    /// Allow registries without TLS verification
    pub insecure_registry: bool,

    /// Pull again even when the bundle is cached
    pub force: bool,
}

/// A bundle available on local disk
#[derive(Debug, Clone)]
pub struct CachedBundle {
    pub reference: String,

    /// Path to the cached bundle.json
    pub bundle_path: PathBuf,

    /// Path to the cached relocation mapping, for relocated bundles
    pub relocation_mapping_path: Option<PathBuf>,

    pub bundle: Bundle,
}

/// Loads bundle definitions from disk or pulls them by reference
pub trait BundleResolver {
    /// Load a bundle definition from a local file
    fn load_local(&self, path: &Path) -> Result<Bundle>;

    /// Resolve a reference to a cached bundle, pulling it when needed
    fn resolve(&self, opts: &BundlePullOptions) -> Result<CachedBundle>;
}

/// Resolver pulling from a registry directory into a cache directory
#[derive(Debug, Clone)]
pub struct LocalRegistryResolver {
    registry_dir: PathBuf,
    cache_dir: PathBuf,
}

impl LocalRegistryResolver {
    pub fn new(registry_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry_dir: registry_dir.into(),
            cache_dir: cache_dir.into(),
        }
    }

    /// Copy a bundle from the registry into its cache entry
    fn pull(&self, reference: &str, entry: &Path) -> Result<()> {
        let source = paths::entry_path(&self.registry_dir, reference)?;
        let source_bundle = source.join(BUNDLE_FILE);
        if !source_bundle.is_file() {
            return Err(bundle::not_found(reference));
        }

        fs::create_dir_all(entry).map_err(|e| StevedoreError::CacheOperationFailed {
            message: format!("Failed to create cache entry {}: {e}", entry.display()),
        })?;

        copy_file(&source_bundle, &entry.join(BUNDLE_FILE))?;

        let source_mapping = source.join(RELOCATION_MAPPING_FILE);
        let cached_mapping = entry.join(RELOCATION_MAPPING_FILE);
        if source_mapping.is_file() {
            copy_file(&source_mapping, &cached_mapping)?;
        } else if cached_mapping.exists() {
            // A re-pull must not keep a mapping the registry no longer has
            fs::remove_file(&cached_mapping)
                .map_err(|e| fs_error::write_failed(&cached_mapping, e))?;
        }

        tracing::debug!(reference, entry = %entry.display(), "pulled bundle into cache");
        Ok(())
    }
}

impl BundleResolver for LocalRegistryResolver {
    fn load_local(&self, path: &Path) -> Result<Bundle> {
        Bundle::load(path)
    }

    fn resolve(&self, opts: &BundlePullOptions) -> Result<CachedBundle> {
        if opts.insecure_registry {
            tracing::debug!(reference = %opts.reference, "insecure registry access allowed");
        }

        let entry = paths::entry_path(&self.cache_dir, &opts.reference)?;
        let bundle_path = entry.join(BUNDLE_FILE);

        if opts.force || !bundle_path.is_file() {
            self.pull(&opts.reference, &entry)?;
        } else {
            tracing::debug!(reference = %opts.reference, "using cached bundle");
        }

        let mapping_path = entry.join(RELOCATION_MAPPING_FILE);
        let relocation_mapping_path = mapping_path.is_file().then_some(mapping_path);

        let bundle = Bundle::load(&bundle_path)?;

        Ok(CachedBundle {
            reference: opts.reference.clone(),
            bundle_path,
            relocation_mapping_path,
            bundle,
        })
    }
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to).map_err(|e| StevedoreError::CacheOperationFailed {
        message: format!(
            "Failed to copy {} to {}: {e}",
            from.display(),
            to.display()
        ),
    })?;
    Ok(())
}
