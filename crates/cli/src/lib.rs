//! Diagsnap CLI library — exposed for integration tests

pub mod commands;
pub mod session;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "diagsnap")]
#[command(about = "Mirror editor diagnostics into a stable JSON snapshot", long_about = None)]
#[command(version = diagsnap_core::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Feed file to pull diagnostics from
    #[arg(long, global = true)]
    pub feed: Option<PathBuf>,

    /// Write the snapshot here instead of the resolved directory
    #[arg(long, global = true)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize .diagsnap.toml configuration
    Init {
        /// Path to initialize (default: current directory)
        path: Option<PathBuf>,
    },

    /// Run one aggregation cycle and exit
    Snapshot {
        /// Path to the project (default: discovered from current directory)
        path: Option<PathBuf>,
    },

    /// Watch the feed and re-snapshot on changes (default command)
    Watch {
        /// Path to the project (default: discovered from current directory)
        path: Option<PathBuf>,

        /// Debounce window in milliseconds (overrides config)
        #[arg(long)]
        debounce: Option<u64>,
    },
}
