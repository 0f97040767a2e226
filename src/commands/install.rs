//! Install, upgrade and invoke command implementations
//!
//! Thin CLI wrappers delegating to operations/lifecycle.rs.

use std::path::PathBuf;

use console::Style;

use crate::cli::{BundleArgs, InstallArgs, InvokeArgs, UpgradeArgs};
use crate::error::Result;
use crate::operations::LifecycleOperation;
use crate::provider::Action;

use super::helpers;

/// Run install command
pub fn run(manifest: Option<PathBuf>, args: InstallArgs) -> Result<()> {
    run_action(manifest, &Action::Install, args.bundle)
}

/// Run upgrade command
pub fn run_upgrade(manifest: Option<PathBuf>, args: UpgradeArgs) -> Result<()> {
    run_action(manifest, &Action::Upgrade, args.bundle)
}

/// Run invoke command
pub fn run_invoke(manifest: Option<PathBuf>, args: InvokeArgs) -> Result<()> {
    let action = Action::from_name(&args.action);
    run_action(manifest, &action, args.bundle)
}

pub(super) fn run_action(
    manifest: Option<PathBuf>,
    action: &Action,
    args: BundleArgs,
) -> Result<()> {
    let ctx = helpers::load_context(manifest)?;
    let opts = helpers::lifecycle_opts(args)?;

    let installation = LifecycleOperation::new(&ctx).execute(action, &opts)?;

    println!(
        "{} {} on {}",
        Style::new().green().bold().apply_to("Finished"),
        action,
        Style::new().bold().apply_to(installation)
    );
    Ok(())
}
