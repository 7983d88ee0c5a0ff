//! Diagsnap CLI - diagnostics snapshot mirror

use anyhow::Result;
use clap::Parser;
use diagsnap_cli::{commands, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Init { path }) => {
            commands::init::run(path.as_deref())?;
        }
        Some(Commands::Snapshot { path }) => {
            commands::snapshot::run(path.as_deref(), &cli)?;
        }
        Some(Commands::Watch { path, debounce }) => {
            commands::watch::run(path.as_deref(), &cli, *debounce)?;
        }
        None => {
            // Default command is watch on the discovered project
            commands::watch::run(None, &cli, None)?;
        }
    }

    Ok(())
}
