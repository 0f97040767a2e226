//! Running a bundle's dependencies
//!
//! A run goes through two phases. [`DependencyExecutioner::prepare`] finds
//! the bundle being run, resolves its dependencies, pulls each of them and
//! works out their parameters. [`DependencyExecutioner::execute`] then runs
//! the same action against every dependency, in declaration order, and reads
//! back their outputs. Finally [`DependencyExecutioner::apply_dependency_mappings`]
//! stages each dependency's bundle.json and outputs into the parent's
//! invocation image.
//!
//! Each dependency runs as its own installation named `<parent>-<alias>`.

pub mod overrides;
pub mod queued;

use std::collections::BTreeMap;
use std::path::PathBuf;

use indexmap::IndexMap;

use crate::bundle::dependency::{DependencyLock, DependencySolver};
use crate::bundle::{Bundle, render_value};
use crate::cache::{BundlePullOptions, BundleResolver};
use crate::config::Manifest;
use crate::error::{Result, StevedoreError, deps, fs as fs_error};
use crate::hash;
use crate::installation::InstallationStore;
use crate::operations::BundleLifecycleOpts;
use crate::progress::DependencyProgress;
use crate::provider::{Action, ActionArguments, ActionInvoker};
use crate::runtime;

pub use overrides::{AliasedOverride, ParameterOverrides};
pub use queued::{DependencyState, QueuedDependency};

/// What the parent bundle of a run will be invoked with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentContext {
    /// Installation name; dependencies are named after it
    pub installation: String,

    pub bundle_path: Option<PathBuf>,

    pub bundle_reference: Option<String>,

    pub relocation_mapping: Option<PathBuf>,

    pub driver: String,

    pub credential_identifiers: Vec<String>,

    /// Command-line parameters not addressed to a dependency
    pub params: BTreeMap<String, String>,
}

#[derive(Debug)]
struct PreparedRun {
    parent: ParentContext,
    deps: Vec<QueuedDependency>,
}

#[derive(Debug)]
enum RunState {
    Created,
    Prepared(PreparedRun),
    Executed(PreparedRun),
}

/// The bundle a run starts from, and where it was found
struct RootBundle {
    bundle: Bundle,
    bundle_path: Option<PathBuf>,
    relocation_mapping: Option<PathBuf>,
}

/// Prepares and runs the dependencies of one bundle
pub struct DependencyExecutioner<'a> {
    manifest: &'a Manifest,
    resolver: &'a dyn BundleResolver,
    installations: &'a dyn InstallationStore,
    solver: &'a dyn DependencySolver,
    state: RunState,
}

impl<'a> DependencyExecutioner<'a> {
    pub fn new(
        manifest: &'a Manifest,
        resolver: &'a dyn BundleResolver,
        installations: &'a dyn InstallationStore,
        solver: &'a dyn DependencySolver,
    ) -> Self {
        Self {
            manifest,
            resolver,
            installations,
            solver,
            state: RunState::Created,
        }
    }

    /// Resolve and pull every dependency and work out its parameters
    ///
    /// Either every dependency is prepared or nothing is: on error the run
    /// stays unprepared and [`execute`](Self::execute) refuses to start.
    pub fn prepare(&mut self, opts: &BundleLifecycleOpts) -> Result<()> {
        self.state = RunState::Created;

        let root = self.identify_root(opts)?;

        let locks = self
            .solver
            .resolve_dependencies(&root.bundle)
            .map_err(deps::resolution_failed)?;
        for lock in &locks {
            tracing::debug!("Resolved dependency {} to {}", lock.alias, lock.reference);
        }

        let overrides = ParameterOverrides::partition(&opts.params);
        for (alias, key) in overrides.aliases() {
            if !locks.iter().any(|lock| lock.alias == alias) {
                return Err(deps::unknown_alias(key, alias));
            }
        }

        let mut prepared = Vec::with_capacity(locks.len());
        for lock in locks {
            let cli_overrides = overrides.for_alias(&lock.alias);
            prepared.push(self.prepare_dependency(lock, opts, cli_overrides)?);
        }

        let parent = ParentContext {
            installation: opts
                .installation
                .clone()
                .unwrap_or_else(|| root.bundle.name.clone()),
            bundle_path: root.bundle_path,
            bundle_reference: opts.reference.clone(),
            relocation_mapping: root.relocation_mapping,
            driver: opts.driver.clone(),
            credential_identifiers: opts.credential_identifiers.clone(),
            params: overrides.parent().clone(),
        };

        self.state = RunState::Prepared(PreparedRun {
            parent,
            deps: prepared,
        });
        Ok(())
    }

    /// Run `action` against every dependency, in order
    ///
    /// Stops at the first dependency that fails. Dependencies that already
    /// ran are left as they are.
    pub fn execute<I>(&mut self, invoker: &I, action: &Action) -> Result<()>
    where
        I: ActionInvoker + ?Sized,
    {
        let mut run = match std::mem::replace(&mut self.state, RunState::Created) {
            RunState::Created => return Err(StevedoreError::DependenciesNotPrepared),
            RunState::Prepared(run) | RunState::Executed(run) => run,
        };

        let result = self.execute_all(&mut run, invoker, action);
        self.state = if result.is_ok() {
            RunState::Executed(run)
        } else {
            RunState::Prepared(run)
        };
        result
    }

    /// Stage every dependency's bundle.json and outputs into `args.files`
    ///
    /// Existing entries are kept.
    pub fn apply_dependency_mappings(&self, args: &mut ActionArguments) {
        let queued = self.dependencies();
        if args.files.is_empty() {
            args.files.reserve(2 * queued.len());
        }

        for dep in queued {
            args.files.insert(
                runtime::dependency_definition_path(&dep.alias),
                String::from_utf8_lossy(&dep.bundle_contents).into_owned(),
            );

            for (output, value) in dep.outputs.iter().flatten() {
                args.files.insert(
                    runtime::dependency_output_path(&dep.alias, output),
                    render_value(value),
                );
            }
        }
    }

    /// Arguments for invoking the parent bundle itself
    ///
    /// Carries the parameters left after dependency overrides were split off,
    /// with every dependency staged through
    /// [`apply_dependency_mappings`](Self::apply_dependency_mappings).
    pub fn parent_action_args(&self) -> Result<ActionArguments> {
        let parent = self.parent().ok_or(StevedoreError::DependenciesNotPrepared)?;

        let mut args = ActionArguments {
            installation: parent.installation.clone(),
            bundle_path: parent.bundle_path.clone(),
            bundle_reference: parent.bundle_reference.clone(),
            driver: parent.driver.clone(),
            params: parent.params.clone(),
            relocation_mapping: parent.relocation_mapping.clone(),
            credential_identifiers: parent.credential_identifiers.clone(),
            files: IndexMap::new(),
        };
        self.apply_dependency_mappings(&mut args);
        Ok(args)
    }

    /// Dependencies of the run, in the order they run. Empty until prepared.
    pub fn dependencies(&self) -> &[QueuedDependency] {
        match &self.state {
            RunState::Created => &[],
            RunState::Prepared(run) | RunState::Executed(run) => &run.deps,
        }
    }

    pub fn parent(&self) -> Option<&ParentContext> {
        match &self.state {
            RunState::Created => None,
            RunState::Prepared(run) | RunState::Executed(run) => Some(&run.parent),
        }
    }

    /// Load the bundle the run starts from
    ///
    /// A bundle file wins over a reference, which wins over an installation.
    fn identify_root(&self, opts: &BundleLifecycleOpts) -> Result<RootBundle> {
        if let Some(file) = &opts.file {
            return Ok(RootBundle {
                bundle: self.resolver.load_local(file)?,
                bundle_path: Some(file.clone()),
                relocation_mapping: None,
            });
        }

        if let Some(reference) = &opts.reference {
            let cached = self.resolver.resolve(&BundlePullOptions {
                reference: reference.clone(),
                insecure_registry: opts.insecure_registry,
                force: opts.force,
            })?;
            return Ok(RootBundle {
                bundle: cached.bundle,
                bundle_path: Some(cached.bundle_path),
                relocation_mapping: cached.relocation_mapping_path,
            });
        }

        if let Some(name) = &opts.installation {
            let record = self.installations.read(name)?;
            return Ok(RootBundle {
                bundle: record.bundle,
                bundle_path: None,
                relocation_mapping: None,
            });
        }

        Err(StevedoreError::NoBundleSelected)
    }

    fn prepare_dependency(
        &self,
        lock: DependencyLock,
        opts: &BundleLifecycleOpts,
        cli_overrides: Option<&BTreeMap<String, AliasedOverride>>,
    ) -> Result<QueuedDependency> {
        let mut dep = QueuedDependency::new(lock);

        let cached = self
            .resolver
            .resolve(&BundlePullOptions {
                reference: dep.reference.clone(),
                insecure_registry: opts.insecure_registry,
                force: opts.force,
            })
            .map_err(|e| deps::pull_failed(&dep.alias, e))?;

        cached
            .bundle
            .validate()
            .map_err(|e| deps::invalid_bundle(&dep.alias, e))?;

        dep.bundle_contents = std::fs::read(&cached.bundle_path)
            .map_err(|e| fs_error::read_failed(&cached.bundle_path, &e))?;
        tracing::debug!(
            alias = %dep.alias,
            reference = %cached.reference,
            digest = %hash::digest_bytes(&dep.bundle_contents),
            "pulled dependency"
        );
        dep.bundle_path = Some(cached.bundle_path);
        dep.relocation_mapping = cached.relocation_mapping_path;

        let declared = cached.bundle.parameter_names();

        if let Some(manifest_overrides) = self.manifest.dependency(&dep.alias) {
            for (name, value) in &manifest_overrides.parameters {
                if !declared.contains(name.as_str()) {
                    return Err(deps::invalid_manifest_parameter(&dep.alias, name));
                }
                dep.parameters.insert(name.clone(), value.clone());
            }
        }

        for (name, aliased) in cli_overrides.into_iter().flatten() {
            if !declared.contains(name.as_str()) {
                return Err(deps::invalid_command_line_parameter(&dep.alias, name));
            }
            dep.parameters.insert(name.clone(), aliased.value.clone());
        }

        dep.state = DependencyState::Prepared;
        Ok(dep)
    }

    fn execute_all<I>(&self, run: &mut PreparedRun, invoker: &I, action: &Action) -> Result<()>
    where
        I: ActionInvoker + ?Sized,
    {
        if run.deps.is_empty() {
            return Ok(());
        }

        let progress = DependencyProgress::new(run.deps.len());
        for dep in &mut run.deps {
            progress.start(&dep.alias);
            if let Err(e) = self.execute_dependency(dep, &run.parent, invoker, action) {
                dep.state = DependencyState::Failed;
                progress.abandon();
                return Err(e);
            }
            dep.state = DependencyState::Executed;
            progress.inc();
        }
        progress.finish();
        Ok(())
    }

    fn execute_dependency<I>(
        &self,
        dep: &mut QueuedDependency,
        parent: &ParentContext,
        invoker: &I,
        action: &Action,
    ) -> Result<()>
    where
        I: ActionInvoker + ?Sized,
    {
        let args = ActionArguments {
            installation: dep.installation_name(&parent.installation),
            bundle_path: dep.bundle_path.clone(),
            bundle_reference: Some(dep.reference.clone()),
            driver: parent.driver.clone(),
            params: dep.parameters.clone(),
            relocation_mapping: dep.relocation_mapping.clone(),
            // TODO: scope credentials per dependency once bundles can declare
            // which of the parent's credential sets they need
            credential_identifiers: parent.credential_identifiers.clone(),
            files: IndexMap::new(),
        };

        invoker
            .invoke(&args)
            .map_err(|e| deps::execution_failed(&dep.alias, e))?;

        if *action != Action::Uninstall {
            let record = self.installations.read(&args.installation)?;
            dep.outputs = Some(record.outputs);
        }

        Ok(())
    }
}
