use clap::Parser;

use super::BundleArgs;

/// Arguments for the uninstall command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Uninstall an installation and its dependencies:\n    stevedore uninstall myapp\n\n\
                  Uninstall using a local bundle definition:\n    stevedore uninstall myapp -f ./bundle.json")]
pub struct UninstallArgs {
    #[command(flatten)]
    pub bundle: BundleArgs,
}
