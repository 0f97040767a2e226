use clap::Parser;

use super::BundleArgs;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install a local bundle:\n    stevedore install -f ./bundle.json\n\n\
                   Install from the registry under a name:\n    stevedore install myapp -r example/app:v1\n\n\
                   Override a dependency parameter:\n    stevedore install myapp -r example/app:v1 -p db#size=10Gi")]
pub struct InstallArgs {
    #[command(flatten)]
    pub bundle: BundleArgs,
}

/// Arguments for the upgrade command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Upgrade with the recorded bundle:\n    stevedore upgrade myapp\n\n\
                   Upgrade to a new bundle version:\n    stevedore upgrade myapp -r example/app:v2")]
pub struct UpgradeArgs {
    #[command(flatten)]
    pub bundle: BundleArgs,
}

/// Arguments for the invoke command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Run a custom action:\n    stevedore invoke myapp --action backup")]
pub struct InvokeArgs {
    /// Custom action to run
    #[arg(long, short = 'a')]
    pub action: String,

    #[command(flatten)]
    pub bundle: BundleArgs,
}
