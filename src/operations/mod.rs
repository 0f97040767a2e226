//! Operations module for running bundle actions
//!
//! This module provides high-level operations that coordinate:
//! - LifecycleOperation: install, upgrade, custom actions and uninstall,
//!   dependencies included
//! - ShowOperation: Display one installation
//! - ListOperation: List installations
//!
//! Every operation works against an [`Context`] holding the collaborators
//! built from the configuration.

pub mod lifecycle;
pub mod list;
pub mod show;

pub use lifecycle::{BundleLifecycleOpts, LifecycleOperation, parse_params};
pub use list::ListOperation;
pub use show::ShowOperation;

use crate::bundle::dependency::ExtensionSolver;
use crate::cache::LocalRegistryResolver;
use crate::config::{Config, Manifest};
use crate::dependencies::DependencyExecutioner;
use crate::installation::FileInstallationStore;
use crate::provider::CnabProvider;

/// Collaborators shared by every operation of one command
pub struct Context {
    pub manifest: Manifest,
    pub resolver: LocalRegistryResolver,
    pub installations: FileInstallationStore,
    pub solver: ExtensionSolver,
}

impl Context {
    pub fn new(config: Config, manifest: Manifest) -> Self {
        let resolver = LocalRegistryResolver::new(config.registry_dir(), config.cache_dir());
        let installations = FileInstallationStore::new(config.installations_dir());
        Self {
            manifest,
            resolver,
            installations,
            solver: ExtensionSolver,
        }
    }

    /// A fresh dependency run
    pub fn executioner(&self) -> DependencyExecutioner<'_> {
        DependencyExecutioner::new(
            &self.manifest,
            &self.resolver,
            &self.installations,
            &self.solver,
        )
    }

    pub fn provider(&self) -> CnabProvider<'_> {
        CnabProvider::new(&self.installations)
    }
}
