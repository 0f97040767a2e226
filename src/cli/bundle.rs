use clap::Args;
use std::path::PathBuf;

use crate::provider::DEBUG_DRIVER;

/// Arguments shared by every lifecycle command
#[derive(Args, Debug, Clone)]
pub struct BundleArgs {
    /// Installation name. Defaults to the bundle name.
    pub installation: Option<String>,

    /// Path to a bundle.json
    #[arg(long, short = 'f', value_name = "FILE", conflicts_with = "reference")]
    pub file: Option<PathBuf>,

    /// Bundle reference to pull from the registry, e.g. example/app:v1
    #[arg(long, short = 'r', value_name = "REFERENCE")]
    pub reference: Option<String>,

    /// Allow pulling from registries without TLS verification
    #[arg(long)]
    pub insecure: bool,

    /// Pull bundles again even when they are cached
    #[arg(long)]
    pub force: bool,

    /// Driver running the invocation images (debug, dry-run)
    #[arg(long, short = 'd', default_value = DEBUG_DRIVER)]
    pub driver: String,

    /// Credential set to pass to the bundle, repeatable
    #[arg(long = "cred", short = 'c', value_name = "NAME")]
    pub credentials: Vec<String>,

    /// Parameter override NAME=VALUE, or ALIAS#NAME=VALUE for a dependency; repeatable
    #[arg(long = "param", short = 'p', value_name = "NAME=VALUE")]
    pub params: Vec<String>,
}
