mod commands;
mod opts;
mod prompt;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::alias::AliasArgs;
use commands::reconcile::ReconcileArgs;
use commands::show::ShowArgs;
use opts::RootOpts;

#[derive(Parser, Debug)]
#[command(name = "vna", version, about = "Scenario asset manifest tools")]
struct Cli {
    #[command(flatten)]
    opts: RootOpts,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reconcile scenario manifests with the on-disk asset tree
    Reconcile(ReconcileArgs),

    /// Attach an alias to a managed asset
    Alias(AliasArgs),

    /// Manifest inspection
    #[command(subcommand)]
    Manifest(ManifestCommand),
}

#[derive(Subcommand, Debug)]
enum ManifestCommand {
    /// Print the stored manifest for a scenario
    Show(ShowArgs),
}

fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();
    let opts = &cli.opts;

    match cli.command {
        Command::Reconcile(args) => commands::reconcile::cmd_reconcile(opts, &args),
        Command::Alias(args) => commands::alias::cmd_alias(opts, &args),
        Command::Manifest(cmd) => match cmd {
            ManifestCommand::Show(args) => commands::show::cmd_show(opts, &args),
        },
    }
}

/// Set up the tracing subscriber for tool logging.
///
/// Diagnostics go to stderr so `--json` output on stdout stays parseable.
fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
