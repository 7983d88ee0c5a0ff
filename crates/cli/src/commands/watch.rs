//! Watch command — mirror diagnostics continuously as the feed changes
//!
//! Startup writes a clean empty snapshot and runs one direct cycle; both
//! propagate errors. After that, feed-file events arm the debouncer and each
//! elapsed window runs one cycle. Errors from debounced cycles are logged and
//! the loop keeps running — the next trigger is the retry mechanism.

use crate::session::Session;
use anyhow::Result;
use colored::Colorize;
use diagsnap_core::{Debouncer, ExclusionFilter, FeedSource, SnapshotAggregator};
use notify::{RecursiveMode, Watcher};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

/// Receive timeout while no cycle is pending, so Ctrl-C stays responsive.
const IDLE_POLL: Duration = Duration::from_millis(200);

pub fn run(path: Option<&Path>, cli: &crate::Cli, debounce_ms: Option<u64>) -> Result<()> {
    let session = Session::resolve(path, cli)?;

    eprintln!(
        "{}",
        format!("  diagsnap v{} — watch mode", diagsnap_core::VERSION).bold()
    );
    eprintln!();

    let mut aggregator = SnapshotAggregator::new(session.out_dir.clone());

    // ── Startup: clean baseline, then one direct cycle ─────────
    aggregator.reset_snapshot()?;
    run_cycle(&mut aggregator, &session)?;

    eprintln!();
    eprintln!(
        "  {}",
        format!(
            "Watching {} ... (Ctrl-C to stop)",
            session.feed_path.display()
        )
        .dimmed()
    );

    // ── Ctrl-C handler ─────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    // ── Feed watcher ───────────────────────────────────────────
    // Watch the parent directory: editors typically replace the feed file
    // wholesale, and a watch on the file itself would not survive the rename.
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |event| {
        let _ = tx.send(event);
    })?;
    let watch_dir = session
        .feed_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    watcher.watch(watch_dir, RecursiveMode::NonRecursive)?;

    let window = Duration::from_millis(debounce_ms.unwrap_or(session.config.watch.debounce_ms));
    let mut debouncer = Debouncer::new(window);
    let feed_name = session.feed_path.file_name();

    // ── Event loop ─────────────────────────────────────────────
    while running.load(Ordering::SeqCst) {
        let timeout = debouncer
            .time_until_due(Instant::now())
            .map(|remaining| remaining.min(IDLE_POLL))
            .unwrap_or(IDLE_POLL);

        match rx.recv_timeout(timeout) {
            Ok(Ok(event)) => {
                // The event carries no payload we trust — any touch of the
                // feed file schedules a full re-pull.
                if event.paths.iter().any(|p| p.file_name() == feed_name) {
                    debouncer.schedule(Instant::now());
                }
            }
            Ok(Err(e)) => {
                eprintln!("  {}: {}", "watch error".red(), e);
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                // Normal timeout — fall through to the debounce check.
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }

        if debouncer.poll(Instant::now()) {
            run_debounced_cycle(&mut aggregator, &session);
        }
    }

    eprintln!();
    eprintln!("  {}", "Stopped.".bold());
    Ok(())
}

/// One cycle on the debounced path: any error is printed and absorbed so a
/// failed cycle never stops the watcher — the next trigger is the retry.
/// Returns whether the cycle succeeded.
pub fn run_debounced_cycle(aggregator: &mut SnapshotAggregator, session: &Session) -> bool {
    match run_cycle(aggregator, session) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("  {}: {:#}", "cycle error".red(), e);
            false
        }
    }
}

fn run_cycle(aggregator: &mut SnapshotAggregator, session: &Session) -> Result<()> {
    let start = Instant::now();

    // Config is re-read every cycle so exclusion edits take effect live.
    let config = session.fresh_config()?;
    let filter = ExclusionFilter::new(session.project_root.clone(), &config.exclude.patterns);
    let source = FeedSource::new(session.feed_path.clone());

    let stats = aggregator.run_cycle(&source, &filter)?;

    let excluded = if stats.excluded > 0 {
        format!(", {} excluded", stats.excluded)
    } else {
        String::new()
    };
    eprintln!(
        "  {} {} file(s), {} diagnostic(s){} ({:.1?})",
        "wrote".green(),
        stats.files,
        stats.diagnostics,
        excluded,
        start.elapsed()
    );

    Ok(())
}
