//! Togglegen - batch visibility toggle generator
//!
//! Reads a scene and a toggle sheet and produces, per target, a pair of
//! visibility clips, a two-state controller layer, the matching parameters,
//! and a control on a paged menu.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use togglegen::cli::{ConfigArgs, GenerateArgs, ValidateArgs};

/// Togglegen - batch visibility toggle generator
#[derive(Parser, Debug)]
#[command(name = togglegen::constants::APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate toggles from a scene and a toggle sheet
    Generate(GenerateArgs),
    /// Check a toggle sheet without generating anything
    Validate(ValidateArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so `--json` output stays parseable
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match &cli.command {
        Command::Generate(args) => args.execute(),
        Command::Validate(args) => args.execute(),
        Command::Config(args) => args.execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code().code());
    }
}
