//! Running bundle actions
//!
//! The provider turns [`ActionArguments`] into an [`Operation`], hands it to a
//! [`Driver`](driver::Driver) and records the outcome as an installation.
//! Callers that only need to run an action depend on [`ActionInvoker`], which
//! is what the dependency executioner is generic over.

pub mod driver;
pub mod operation;
pub mod relocation;

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use chrono::Utc;
use indexmap::IndexMap;

use crate::bundle::Bundle;
use crate::error::{Result, StevedoreError, installation, params, provider};
use crate::hash;
use crate::installation::{Installation, InstallationStatus, InstallationStore};
use crate::runtime::RELOCATION_MAPPING_PATH;

pub use driver::{DEBUG_DRIVER, Driver, OperationResult};
pub use operation::Operation;
pub use relocation::RelocationMapper;

/// A lifecycle action
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    Install,
    Upgrade,
    Uninstall,
    /// An action the bundle declares itself
    Custom(String),
}

impl Action {
    pub fn from_name(name: &str) -> Self {
        match name {
            "install" => Action::Install,
            "upgrade" => Action::Upgrade,
            "uninstall" => Action::Uninstall,
            other => Action::Custom(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Action::Install => "install",
            Action::Upgrade => "upgrade",
            Action::Uninstall => "uninstall",
            Action::Custom(name) => name,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Arguments for running one action against one installation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionArguments {
    /// Installation name
    pub installation: String,

    /// Bundle definition to run. When unset, the bundle recorded for the
    /// installation is used.
    pub bundle_path: Option<PathBuf>,

    /// Reference the bundle was pulled from, recorded with the installation
    pub bundle_reference: Option<String>,

    pub driver: String,

    pub params: BTreeMap<String, String>,

    pub relocation_mapping: Option<PathBuf>,

    pub credential_identifiers: Vec<String>,

    /// Files to stage into the invocation image, keyed by target path
    pub files: IndexMap<String, String>,
}

/// Runs an action
pub trait ActionInvoker {
    fn invoke(&self, args: &ActionArguments) -> Result<()>;
}

impl<F> ActionInvoker for F
where
    F: Fn(&ActionArguments) -> Result<()>,
{
    fn invoke(&self, args: &ActionArguments) -> Result<()> {
        self(args)
    }
}

/// Runs actions through drivers and records installations
pub struct CnabProvider<'s> {
    store: &'s dyn InstallationStore,
    driver: Option<Box<dyn Driver>>,
}

impl<'s> CnabProvider<'s> {
    pub fn new(store: &'s dyn InstallationStore) -> Self {
        Self {
            store,
            driver: None,
        }
    }

    /// Use `driver` for every operation instead of looking drivers up by name
    #[cfg(test)]
    pub fn with_driver(store: &'s dyn InstallationStore, driver: Box<dyn Driver>) -> Self {
        Self {
            store,
            driver: Some(driver),
        }
    }

    /// Bind an action so it can be invoked through [`ActionInvoker`]
    pub fn action(&self, action: Action) -> ProviderAction<'_, 's> {
        ProviderAction {
            provider: self,
            action,
        }
    }

    /// Run `action` for the installation described by `args`
    pub fn run(&self, action: &Action, args: &ActionArguments) -> Result<()> {
        let existing = match self.store.read(&args.installation) {
            Ok(record) => Some(record),
            Err(StevedoreError::InstallationNotFound { .. }) => None,
            Err(e) => return Err(e),
        };

        let (bundle, digest) = match &args.bundle_path {
            Some(path) => (Bundle::load(path)?, hash::digest_file(path)?),
            None => {
                let record = existing
                    .as_ref()
                    .ok_or_else(|| installation::not_found(&args.installation))?;
                (record.bundle.clone(), record.bundle_digest.clone())
            }
        };

        check_action(action, &bundle, existing.is_some(), &args.installation)?;

        let previous = match action {
            Action::Install => None,
            _ => existing.as_ref().map(|r| &r.parameters),
        };
        let parameters = resolve_parameters(&bundle, previous, &args.params, action)?;

        let image = bundle
            .invocation_images
            .first()
            .ok_or_else(|| StevedoreError::NoInvocationImage {
                bundle: bundle.name.clone(),
            })?;

        let mut op = Operation {
            installation: args.installation.clone(),
            action: action.to_string(),
            bundle: bundle.name.clone(),
            version: bundle.version.clone(),
            image: image.image.clone(),
            image_type: image.image_type.clone(),
            parameters: parameters.clone(),
            credentials: args.credential_identifiers.clone(),
            files: args.files.clone(),
            outputs: bundle.outputs.keys().cloned().collect(),
        };

        if let Some(mapping) = &args.relocation_mapping {
            RelocationMapper::load(mapping, RELOCATION_MAPPING_PATH)?.apply(&mut op);
        }

        tracing::info!(
            installation = %op.installation,
            action = %op.action,
            image = %op.image,
            driver = %args.driver,
            "running operation"
        );

        let outcome = match &self.driver {
            Some(driver) => driver.run(&op, &bundle),
            None => driver::lookup(&args.driver)?.run(&op, &bundle),
        };

        let persist = existing.is_some() || *action == Action::Install;
        let mut record = existing.unwrap_or_else(|| {
            Installation::new(args.installation.clone(), bundle.clone(), digest.clone())
        });
        record.bundle = bundle;
        record.bundle_digest = digest;
        if args.bundle_reference.is_some() {
            record.bundle_reference.clone_from(&args.bundle_reference);
        }
        record.action = action.to_string();
        record.parameters = parameters;
        record.modified = Utc::now();

        match outcome {
            Ok(result) if *action == Action::Uninstall => {
                tracing::debug!(installation = %record.name, ?result, "removing installation");
                self.store.delete(&record.name)
            }
            Ok(result) => {
                if *action == Action::Install {
                    record.outputs.clear();
                }
                record.status = InstallationStatus::Succeeded;
                record.outputs.extend(result.outputs);
                if persist {
                    self.store.save(&record)?;
                }
                Ok(())
            }
            Err(e) => {
                record.status = InstallationStatus::Failed;
                if persist {
                    self.store.save(&record)?;
                }
                Err(e)
            }
        }
    }
}

/// A provider bound to one action
pub struct ProviderAction<'p, 's> {
    provider: &'p CnabProvider<'s>,
    action: Action,
}

impl ActionInvoker for ProviderAction<'_, '_> {
    fn invoke(&self, args: &ActionArguments) -> Result<()> {
        self.provider.run(&self.action, args)
    }
}

fn check_action(action: &Action, bundle: &Bundle, exists: bool, name: &str) -> Result<()> {
    let needs_installation = match action {
        Action::Install => false,
        Action::Upgrade | Action::Uninstall => true,
        Action::Custom(custom) => {
            let definition = bundle
                .actions
                .get(custom)
                .ok_or_else(|| provider::unknown_action(&bundle.name, custom))?;
            !definition.stateless
        }
    };

    if needs_installation && !exists {
        return Err(installation::not_found(name));
    }
    Ok(())
}

/// Final parameter values for an operation
///
/// Bundle defaults come first, then values recorded by a previous action,
/// then the overrides passed in. Overrides must name declared parameters.
fn resolve_parameters(
    bundle: &Bundle,
    previous: Option<&BTreeMap<String, String>>,
    overrides: &BTreeMap<String, String>,
    action: &Action,
) -> Result<BTreeMap<String, String>> {
    let mut resolved = BTreeMap::new();

    for name in bundle.parameters.keys() {
        if let Some(default) = bundle.parameter_default(name) {
            resolved.insert(name.clone(), default);
        }
    }

    if let Some(previous) = previous {
        for (name, value) in previous {
            if bundle.parameters.contains_key(name) {
                resolved.insert(name.clone(), value.clone());
            }
        }
    }

    for (name, value) in overrides {
        if !bundle.parameters.contains_key(name) {
            return Err(params::unknown(&bundle.name, name));
        }
        resolved.insert(name.clone(), value.clone());
    }

    if *action != Action::Uninstall {
        if let Some((name, _)) = bundle
            .parameters
            .iter()
            .find(|(name, def)| def.required && !resolved.contains_key(*name))
        {
            return Err(params::missing_required(&bundle.name, name));
        }
    }

    Ok(resolved)
}
