//! Uninstall command CLI wrapper

use std::path::PathBuf;

use crate::cli::UninstallArgs;
use crate::error::Result;
use crate::provider::Action;

/// Run uninstall command
///
/// The installation is removed first, then every dependency it was using.
pub fn run(manifest: Option<PathBuf>, args: UninstallArgs) -> Result<()> {
    super::install::run_action(manifest, &Action::Uninstall, args.bundle)
}
