use anyhow::{anyhow, Result};
use diagsnap_core::{
    CodeValue, Diagnostic, DiagnosticSource, ExclusionFilter, Position, Range, Severity,
    SnapshotAggregator,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tempfile::TempDir;

/// Source double returning a fixed world mapping.
struct MapSource(BTreeMap<PathBuf, Vec<Diagnostic>>);

impl MapSource {
    fn new(entries: Vec<(&str, Vec<Diagnostic>)>) -> Self {
        MapSource(
            entries
                .into_iter()
                .map(|(path, diags)| (PathBuf::from(path), diags))
                .collect(),
        )
    }
}

impl DiagnosticSource for MapSource {
    fn pull(&self) -> Result<BTreeMap<PathBuf, Vec<Diagnostic>>> {
        Ok(self.0.clone())
    }
}

/// Source double whose pull always fails.
struct FailSource;

impl DiagnosticSource for FailSource {
    fn pull(&self) -> Result<BTreeMap<PathBuf, Vec<Diagnostic>>> {
        Err(anyhow!("source unavailable"))
    }
}

fn diag(message: &str, severity: Severity) -> Diagnostic {
    Diagnostic {
        message: message.to_string(),
        severity,
        source: Some("ts".to_string()),
        code: Some(CodeValue::Text("E123".to_string())),
        range: Range {
            start: Position { line: 0, character: 4 },
            end: Position { line: 0, character: 9 },
        },
    }
}

fn no_filter() -> ExclusionFilter {
    ExclusionFilter::new(None, &[])
}

fn read_snapshot(aggregator: &SnapshotAggregator) -> serde_json::Value {
    let data = std::fs::read_to_string(aggregator.snapshot_path()).unwrap();
    serde_json::from_str(&data).unwrap()
}

#[test]
fn test_reset_overwrites_stale_content() {
    let tmp = TempDir::new().unwrap();
    let aggregator = SnapshotAggregator::new(tmp.path());

    // Stale file from a "previous run".
    std::fs::write(aggregator.snapshot_path(), "{\"not\": \"an array\"}").unwrap();

    aggregator.reset_snapshot().unwrap();
    assert_eq!(read_snapshot(&aggregator), serde_json::json!([]));
}

#[test]
fn test_reset_creates_missing_output_dir() {
    let tmp = TempDir::new().unwrap();
    let aggregator = SnapshotAggregator::new(tmp.path().join("nested/out"));

    aggregator.reset_snapshot().unwrap();
    assert_eq!(read_snapshot(&aggregator), serde_json::json!([]));
}

#[test]
fn test_file_persists_as_clean_after_world_empties() {
    let tmp = TempDir::new().unwrap();
    let mut aggregator = SnapshotAggregator::new(tmp.path());

    let source = MapSource::new(vec![("/p/a.ts", vec![diag("oops", Severity::Error)])]);
    aggregator.run_cycle(&source, &no_filter()).unwrap();

    let snapshot = read_snapshot(&aggregator);
    assert_eq!(snapshot[0]["file"], "/p/a.ts");
    assert_eq!(snapshot[0]["diagnostics"][0]["message"], "oops");
    assert_eq!(snapshot[0]["diagnostics"][0]["severity"], 0);
    assert_eq!(snapshot[0]["diagnostics"][0]["level"], "Error");

    // Next cycle the source reports nothing — the entry stays, now clean.
    let empty = MapSource::new(vec![]);
    let stats = aggregator.run_cycle(&empty, &no_filter()).unwrap();
    assert_eq!(stats.files, 1);
    assert_eq!(stats.diagnostics, 0);

    let snapshot = read_snapshot(&aggregator);
    assert_eq!(snapshot, serde_json::json!([{"file": "/p/a.ts", "diagnostics": []}]));
}

#[test]
fn test_seen_set_monotonic_across_cycles() {
    let tmp = TempDir::new().unwrap();
    let mut aggregator = SnapshotAggregator::new(tmp.path());

    let first = MapSource::new(vec![("/p/a.ts", vec![diag("one", Severity::Warning)])]);
    aggregator.run_cycle(&first, &no_filter()).unwrap();

    let second = MapSource::new(vec![("/p/b.ts", vec![diag("two", Severity::Error)])]);
    aggregator.run_cycle(&second, &no_filter()).unwrap();

    // Insertion order is preserved: a.ts first, now clean; b.ts second.
    let snapshot = read_snapshot(&aggregator);
    assert_eq!(snapshot[0]["file"], "/p/a.ts");
    assert_eq!(snapshot[0]["diagnostics"], serde_json::json!([]));
    assert_eq!(snapshot[1]["file"], "/p/b.ts");
    assert_eq!(snapshot[1]["diagnostics"][0]["message"], "two");
}

#[test]
fn test_excluded_file_never_enters_set_or_output() {
    let tmp = TempDir::new().unwrap();
    let mut aggregator = SnapshotAggregator::new(tmp.path());

    let filter = ExclusionFilter::new(
        Some(PathBuf::from("/p")),
        &["*.generated.ts".to_string()],
    );
    let source = MapSource::new(vec![
        ("/p/x.generated.ts", vec![diag("gen", Severity::Error)]),
        ("/p/y.ts", vec![diag("real", Severity::Error)]),
    ]);

    let stats = aggregator.run_cycle(&source, &filter).unwrap();
    assert_eq!(stats.excluded, 1);
    assert_eq!(stats.files, 1);
    assert_eq!(aggregator.seen_files().to_vec(), vec![PathBuf::from("/p/y.ts")]);

    let snapshot = read_snapshot(&aggregator);
    assert_eq!(snapshot.as_array().unwrap().len(), 1);
    assert_eq!(snapshot[0]["file"], "/p/y.ts");
}

#[test]
fn test_later_exclusion_hides_seen_file_until_reincluded() {
    let tmp = TempDir::new().unwrap();
    let mut aggregator = SnapshotAggregator::new(tmp.path());

    let source = MapSource::new(vec![("/p/build/x.ts", vec![diag("err", Severity::Error)])]);
    aggregator.run_cycle(&source, &no_filter()).unwrap();
    assert_eq!(read_snapshot(&aggregator)[0]["file"], "/p/build/x.ts");

    // Config change between cycles: the final guard drops the entry from the
    // output, but the file stays in the seen-set.
    let exclude = ExclusionFilter::new(Some(PathBuf::from("/p")), &["build/**".to_string()]);
    aggregator.run_cycle(&source, &exclude).unwrap();
    assert_eq!(read_snapshot(&aggregator), serde_json::json!([]));
    assert_eq!(
        aggregator.seen_files().to_vec(),
        vec![PathBuf::from("/p/build/x.ts")]
    );

    // Re-inclusion surfaces it again with current diagnostics.
    aggregator.run_cycle(&source, &no_filter()).unwrap();
    let snapshot = read_snapshot(&aggregator);
    assert_eq!(snapshot[0]["file"], "/p/build/x.ts");
    assert_eq!(snapshot[0]["diagnostics"][0]["message"], "err");
}

#[test]
fn test_failed_pull_leaves_previous_snapshot_untouched() {
    let tmp = TempDir::new().unwrap();
    let mut aggregator = SnapshotAggregator::new(tmp.path());

    let source = MapSource::new(vec![("/p/a.ts", vec![diag("kept", Severity::Error)])]);
    aggregator.run_cycle(&source, &no_filter()).unwrap();
    let before = read_snapshot(&aggregator);

    let err = aggregator.run_cycle(&FailSource, &no_filter());
    assert!(err.is_err());
    assert_eq!(read_snapshot(&aggregator), before);
}

#[test]
fn test_snapshot_is_pretty_printed_array() {
    let tmp = TempDir::new().unwrap();
    let mut aggregator = SnapshotAggregator::new(tmp.path());

    let source = MapSource::new(vec![("/p/a.ts", vec![diag("x", Severity::Hint)])]);
    aggregator.run_cycle(&source, &no_filter()).unwrap();

    let raw = std::fs::read_to_string(aggregator.snapshot_path()).unwrap();
    assert!(raw.starts_with('['));
    // serde_json pretty printing uses 2-space indentation.
    assert!(raw.contains("\n  {"));
    assert!(raw.contains("\"level\": \"Hint\""));
}

#[test]
fn test_stats_count_files_and_diagnostics() {
    let tmp = TempDir::new().unwrap();
    let mut aggregator = SnapshotAggregator::new(tmp.path());

    let source = MapSource::new(vec![
        ("/p/a.ts", vec![diag("1", Severity::Error), diag("2", Severity::Warning)]),
        ("/p/b.ts", vec![diag("3", Severity::Information)]),
    ]);

    let stats = aggregator.run_cycle(&source, &no_filter()).unwrap();
    assert_eq!(stats.files, 2);
    assert_eq!(stats.diagnostics, 3);
    assert_eq!(stats.excluded, 0);
}
