//! Shared helpers for command implementations

use std::path::{Path, PathBuf};

use crate::cli::BundleArgs;
use crate::config::{Config, MANIFEST_FILE, Manifest};
use crate::error::Result;
use crate::operations::{BundleLifecycleOpts, Context, parse_params};

/// Bundle file picked up from the current directory when nothing else selects a bundle
const DEFAULT_BUNDLE_FILE: &str = "bundle.json";

/// Build the operation context from the environment and the manifest
///
/// An explicit manifest must exist; the default `stevedore.yaml` is optional.
pub fn load_context(manifest: Option<PathBuf>) -> Result<Context> {
    let config = Config::from_env()?;
    let manifest = match manifest {
        Some(path) => Manifest::load(&path)?,
        None => Manifest::load_or_default(Path::new(MANIFEST_FILE))?,
    };
    tracing::debug!(home = %config.home.display(), registry = %config.registry.display(), "loaded configuration");
    Ok(Context::new(config, manifest))
}

/// Context for commands that only read installations
pub fn load_installations_context() -> Result<Context> {
    Ok(Context::new(Config::from_env()?, Manifest::default()))
}

/// Turn command-line arguments into lifecycle options
pub fn lifecycle_opts(args: BundleArgs) -> Result<BundleLifecycleOpts> {
    let params = parse_params(&args.params)?;

    let mut file = args.file;
    if file.is_none() && args.reference.is_none() && args.installation.is_none() {
        let default = PathBuf::from(DEFAULT_BUNDLE_FILE);
        if default.is_file() {
            tracing::debug!("using {DEFAULT_BUNDLE_FILE} from the current directory");
            file = Some(default);
        }
    }

    let opts = BundleLifecycleOpts {
        installation: args.installation,
        file,
        reference: args.reference,
        insecure_registry: args.insecure,
        force: args.force,
        driver: args.driver,
        credential_identifiers: args.credentials,
        params,
    };
    opts.validate()?;
    Ok(opts)
}
