//! Snapshot command — run one aggregation cycle synchronously
//!
//! This is the manual trigger: any failure propagates to the exit code
//! instead of being swallowed, since the user asked for this run explicitly.

use crate::session::Session;
use anyhow::Result;
use colored::Colorize;
use diagsnap_core::{ExclusionFilter, FeedSource, SnapshotAggregator};
use std::path::Path;

pub fn run(path: Option<&Path>, cli: &crate::Cli) -> Result<()> {
    let session = Session::resolve(path, cli)?;

    let source = FeedSource::new(session.feed_path.clone());
    let filter = ExclusionFilter::new(
        session.project_root.clone(),
        &session.config.exclude.patterns,
    );
    let mut aggregator = SnapshotAggregator::new(session.out_dir.clone());

    let stats = aggregator.run_cycle(&source, &filter)?;

    eprintln!(
        "  {} {} file(s), {} diagnostic(s) → {}",
        "wrote".green(),
        stats.files,
        stats.diagnostics,
        aggregator.snapshot_path().display()
    );
    if stats.excluded > 0 {
        eprintln!("  {} {} file(s) excluded", "note:".dimmed(), stats.excluded);
    }

    Ok(())
}
