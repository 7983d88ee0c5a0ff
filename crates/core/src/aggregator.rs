//! Snapshot aggregation — seen-file tracking and snapshot persistence
//!
//! The aggregator owns the only mutable state in the pipeline: the set of
//! every file ever observed with diagnostics. That set is what lets the
//! snapshot show a file transitioning from "has errors" to "clean" — without
//! it a fixed file would simply vanish from the output, indistinguishable
//! from "never checked".

use crate::diagnostic::{DiagnosticRecord, FileEntry};
use crate::filter::ExclusionFilter;
use crate::source::DiagnosticSource;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// Fixed snapshot file name, written into the resolved output directory.
pub const SNAPSHOT_FILE: &str = "vscode-diagnostics.json";

/// Counters from one aggregation cycle, for status output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// File entries written to the snapshot.
    pub files: usize,
    /// Total diagnostics across all entries.
    pub diagnostics: usize,
    /// Files in the source mapping skipped by the exclusion filter.
    pub excluded: usize,
}

pub struct SnapshotAggregator {
    out_dir: PathBuf,
    /// Insertion-ordered seen-files set; grows monotonically, never pruned.
    seen: Vec<PathBuf>,
    seen_index: HashSet<PathBuf>,
}

impl SnapshotAggregator {
    /// Create an aggregator writing into `out_dir`, with an empty seen-set.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        SnapshotAggregator {
            out_dir: out_dir.into(),
            seen: Vec::new(),
            seen_index: HashSet::new(),
        }
    }

    /// Full path of the snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        self.out_dir.join(SNAPSHOT_FILE)
    }

    /// Files currently in the seen-set, in insertion order.
    pub fn seen_files(&self) -> &[PathBuf] {
        &self.seen
    }

    /// Unconditionally overwrite the snapshot with an empty array, creating
    /// the output directory if absent. Called once at startup so consumers
    /// get a deterministic clean baseline regardless of stale files from a
    /// previous run.
    pub fn reset_snapshot(&self) -> Result<()> {
        self.write_entries(&[])
    }

    /// Run one full aggregation pass: pull the world, merge it into the
    /// seen-set, filter, shape, and overwrite the snapshot file.
    ///
    /// Any failure aborts the whole cycle; the write is the last step, so a
    /// failure before it leaves the previous snapshot untouched. There is no
    /// retry — the next trigger is the retry mechanism.
    pub fn run_cycle(
        &mut self,
        source: &dyn DiagnosticSource,
        filter: &ExclusionFilter,
    ) -> Result<CycleStats> {
        let world = source.pull().context("querying diagnostic source")?;

        let mut stats = CycleStats::default();

        // Merge: excluded files are neither recorded nor remembered.
        for path in world.keys() {
            if filter.is_excluded(path) {
                stats.excluded += 1;
                continue;
            }
            if self.seen_index.insert(path.clone()) {
                self.seen.push(path.clone());
            }
        }

        // Build entries in seen-set insertion order, re-applying the filter as
        // a final guard so configuration changes between cycles take effect.
        let mut entries = Vec::with_capacity(self.seen.len());
        for path in &self.seen {
            if filter.is_excluded(path) {
                continue;
            }
            let diagnostics: Vec<DiagnosticRecord> = world
                .get(path)
                .map(|list| list.iter().map(DiagnosticRecord::from_diagnostic).collect())
                .unwrap_or_default();
            stats.diagnostics += diagnostics.len();
            entries.push(FileEntry {
                file: path.clone(),
                diagnostics,
            });
        }
        stats.files = entries.len();

        self.write_entries(&entries)?;
        Ok(stats)
    }

    fn write_entries(&self, entries: &[FileEntry]) -> Result<()> {
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("creating output dir {}", self.out_dir.display()))?;
        let json = serde_json::to_string_pretty(entries).context("serializing snapshot")?;
        let path = self.snapshot_path();
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}
