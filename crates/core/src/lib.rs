//! Diagsnap Core - Diagnostics Snapshot Pipeline
//!
//! This crate provides the aggregation machinery behind Diagsnap:
//! - A diagnostic data model mirroring the editor's severity ordinals
//! - A feed-file source that re-pulls the full diagnostic world on demand
//! - Glob-based exclusion filtering against relative paths and bare names
//! - A monotonic seen-files set so "now clean" is reported explicitly
//! - A single-slot debounce state machine for coalescing notifications

pub mod aggregator;
pub mod config;
pub mod debounce;
pub mod diagnostic;
pub mod feed;
pub mod filter;
pub mod locate;
pub mod source;

pub use aggregator::{CycleStats, SnapshotAggregator, SNAPSHOT_FILE};
pub use config::{DiagsnapConfig, CONFIG_FILE};
pub use debounce::Debouncer;
pub use diagnostic::{
    CodeValue, Diagnostic, DiagnosticRecord, FileEntry, Position, Range, Severity,
};
pub use feed::{parse_feed, FeedError, FeedSource};
pub use filter::ExclusionFilter;
pub use locate::resolve_output_dir;
pub use source::DiagnosticSource;

/// Diagsnap version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
