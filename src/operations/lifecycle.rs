//! Lifecycle operation
//!
//! Runs one action against a bundle and its dependencies. Install, upgrade
//! and custom actions run the dependencies first so the bundle can read their
//! outputs. Uninstall removes the bundle first, then the dependencies it
//! was using.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{Result, config, params};
use crate::provider::{Action, ActionInvoker};

use super::Context;

/// Options shared by every lifecycle action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleLifecycleOpts {
    /// Installation name. Selects the bundle when no file or reference is given.
    pub installation: Option<String>,

    /// Local bundle.json
    pub file: Option<PathBuf>,

    /// Reference to pull the bundle from
    pub reference: Option<String>,

    pub insecure_registry: bool,

    /// Pull bundles again even when cached
    pub force: bool,

    pub driver: String,

    pub credential_identifiers: Vec<String>,

    /// Parameter overrides, `NAME` for the bundle, `ALIAS#NAME` for a dependency
    pub params: BTreeMap<String, String>,
}

impl BundleLifecycleOpts {
    /// Check that something selects the bundle to run
    pub fn validate(&self) -> Result<()> {
        if self.file.is_none() && self.reference.is_none() && self.installation.is_none() {
            return Err(config::invalid(
                "No bundle specified. Pass --file, --reference or an installation name",
            ));
        }
        Ok(())
    }
}

/// Parse `NAME=VALUE` pairs. The value may itself contain `=`.
pub fn parse_params(raw: &[String]) -> Result<BTreeMap<String, String>> {
    let mut parsed = BTreeMap::new();
    for input in raw {
        let (name, value) = input
            .split_once('=')
            .ok_or_else(|| params::invalid_format(input))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(params::invalid_format(input));
        }
        parsed.insert(name.to_string(), value.to_string());
    }
    Ok(parsed)
}

/// Runs an action against a bundle and its dependencies
pub struct LifecycleOperation<'c> {
    ctx: &'c Context,
}

impl<'c> LifecycleOperation<'c> {
    pub fn new(ctx: &'c Context) -> Self {
        Self { ctx }
    }

    /// Run `action` and return the name of the installation it ran against
    pub fn execute(&self, action: &Action, opts: &BundleLifecycleOpts) -> Result<String> {
        let provider = self.ctx.provider();
        let invoker = provider.action(action.clone());
        self.execute_with(&invoker, action, opts)
    }

    pub(crate) fn execute_with<I>(
        &self,
        invoker: &I,
        action: &Action,
        opts: &BundleLifecycleOpts,
    ) -> Result<String>
    where
        I: ActionInvoker + ?Sized,
    {
        opts.validate()?;

        let mut deps = self.ctx.executioner();
        deps.prepare(opts)?;

        let args = if *action == Action::Uninstall {
            let args = deps.parent_action_args()?;
            tracing::info!(installation = %args.installation, %action, "running bundle");
            invoker.invoke(&args)?;
            deps.execute(invoker, action)?;
            args
        } else {
            deps.execute(invoker, action)?;
            let args = deps.parent_action_args()?;
            tracing::info!(installation = %args.installation, %action, "running bundle");
            invoker.invoke(&args)?;
            args
        };

        Ok(args.installation)
    }
}
