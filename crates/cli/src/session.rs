//! Session resolution — project root, feed path, and output directory

use anyhow::Result;
use diagsnap_core::{resolve_output_dir, DiagsnapConfig, CONFIG_FILE};
use std::path::{Path, PathBuf};

/// Default feed file name, relative to the project root.
pub const DEFAULT_FEED_FILE: &str = ".diagsnap-feed.json";

/// Everything a command needs to run a cycle: where the project is, where the
/// feed lives, and where the snapshot goes.
pub struct Session {
    pub project_root: Option<PathBuf>,
    pub config: DiagsnapConfig,
    pub feed_path: PathBuf,
    pub out_dir: PathBuf,
}

impl Session {
    pub fn resolve(path: Option<&Path>, cli: &crate::Cli) -> Result<Self> {
        let project_root = match path {
            Some(p) => Some(std::fs::canonicalize(p).unwrap_or_else(|_| p.to_path_buf())),
            None => find_project_root(),
        };

        let config = match &project_root {
            Some(root) => DiagsnapConfig::find_and_load(root)?,
            None => DiagsnapConfig::default(),
        };

        let feed_path = resolve_feed_path(cli.feed.as_deref(), project_root.as_deref(), &config);
        let out_dir = match &cli.out_dir {
            Some(dir) => dir.clone(),
            None => resolve_output_dir(project_root.as_deref(), Some(&feed_path)),
        };

        Ok(Session {
            project_root,
            config,
            feed_path,
            out_dir,
        })
    }

    /// Re-read the config so live edits apply to the next cycle.
    pub fn fresh_config(&self) -> Result<DiagsnapConfig> {
        match &self.project_root {
            Some(root) => DiagsnapConfig::find_and_load(root),
            None => Ok(DiagsnapConfig::default()),
        }
    }
}

/// A project root exists only where a `.diagsnap.toml` can be found, starting
/// from the current directory and walking up.
fn find_project_root() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;
    loop {
        if current.join(CONFIG_FILE).exists() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

fn resolve_feed_path(
    flag: Option<&Path>,
    project_root: Option<&Path>,
    config: &DiagsnapConfig,
) -> PathBuf {
    let base = project_root
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let configured = flag
        .map(Path::to_path_buf)
        .or_else(|| config.watch.feed.clone());

    match configured {
        Some(p) if p.is_absolute() => p,
        Some(p) => base.join(p),
        None => base.join(DEFAULT_FEED_FILE),
    }
}
