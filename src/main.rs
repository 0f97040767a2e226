//! Stevedore - bundle installer
//!
//! Runs lifecycle actions against application bundles together with the
//! bundles they depend on. Dependencies run first, under installations named
//! after their parent, and their outputs are staged into the parent's
//! invocation image.

use clap::Parser;

mod bundle;
mod cache;
mod cli;
mod commands;
mod config;
mod dependencies;
mod error;
mod hash;
mod installation;
mod logging;
mod operations;
mod progress;
mod provider;
mod runtime;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(cli.manifest, args),
        Commands::Upgrade(args) => commands::install::run_upgrade(cli.manifest, args),
        Commands::Invoke(args) => commands::install::run_invoke(cli.manifest, args),
        Commands::Uninstall(args) => commands::uninstall::run(cli.manifest, args),
        Commands::List => commands::list::run(),
        Commands::Show(args) => commands::show::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e.chain());
        std::process::exit(1);
    }
}
