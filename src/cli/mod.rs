//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - bundle: Arguments shared by every lifecycle command
//! - install: Install, upgrade and invoke command arguments
//! - uninstall: Uninstall command arguments
//! - show: Show command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod bundle;
pub mod completions;
pub mod install;
pub mod show;
pub mod uninstall;

pub use bundle::BundleArgs;
pub use completions::CompletionsArgs;
pub use install::{InstallArgs, InvokeArgs, UpgradeArgs};
pub use show::ShowArgs;
pub use uninstall::UninstallArgs;

/// Stevedore - bundle installer
///
/// Install, upgrade and uninstall application bundles together with the bundles they depend on.
#[derive(Parser, Debug)]
#[command(
    name = "stevedore",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install application bundles and their dependencies",
    long_about = "Stevedore runs lifecycle actions (install, upgrade, custom actions, uninstall) \
                  against application bundles. Dependencies declared by a bundle are pulled, \
                  configured and run first, and their outputs are handed to the bundle.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  stevedore install -f bundle.json                 \x1b[90m# Install a local bundle\x1b[0m\n   \
                  stevedore install myapp -r example/app:v1        \x1b[90m# Install from the registry\x1b[0m\n   \
                  stevedore install -f bundle.json -p db#size=10Gi \x1b[90m# Configure a dependency\x1b[0m\n   \
                  stevedore upgrade myapp                          \x1b[90m# Upgrade an installation\x1b[0m\n   \
                  stevedore uninstall myapp                        \x1b[90m# Uninstall with dependencies\x1b[0m\n   \
                  stevedore list                                   \x1b[90m# List installations\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Manifest with dependency parameter overrides (defaults to ./stevedore.yaml)
    #[arg(long, short = 'm', global = true, env = "STEVEDORE_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install a bundle and its dependencies
    Install(InstallArgs),

    /// Upgrade an installation and its dependencies
    Upgrade(UpgradeArgs),

    /// Run a custom action against an installation and its dependencies
    Invoke(InvokeArgs),

    /// Uninstall an installation and its dependencies
    Uninstall(UninstallArgs),

    /// List installations
    List,

    /// Show an installation
    Show(ShowArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
