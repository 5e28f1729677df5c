//! Rarity CLI - Command-line interface for ranking generated composites.

use clap::Parser;
use rarity_cli::commands;
use rarity_cli::{Cli, Command, Config, Formatter};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so JSON output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> rarity_cli::Result<()> {
    // Load config (explicit path must exist)
    let config = Config::load(cli.config.as_deref().map(Path::new))?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);
    let store_path = config.store_path(cli.store.as_deref());

    match cli.command {
        Command::Rank(args) => {
            commands::execute_rank(args, &config, &store_path, &formatter).await?;
        }
        Command::Scores(args) => {
            commands::execute_scores(args, &config, &store_path, &formatter).await?;
        }
    }

    Ok(())
}
