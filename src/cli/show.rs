use clap::Parser;

/// Arguments for the show command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show an installation:\n    stevedore show myapp\n\n\
                  Show one of its dependencies:\n    stevedore show myapp-db")]
pub struct ShowArgs {
    /// Installation name
    pub installation: String,
}
