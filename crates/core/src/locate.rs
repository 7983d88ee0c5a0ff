//! Output directory resolution — fixed fallback chain, total by construction

use std::env;
use std::path::{Path, PathBuf};

/// Resolve the directory the snapshot file is written into.
///
/// Priority order, each leg checked only if the previous yields nothing:
/// 1. the project root, when one is configured;
/// 2. the parent directory of the active feed file;
/// 3. the OS temporary directory, which always exists.
///
/// Pure read of the environment; directory creation is the writer's job.
pub fn resolve_output_dir(project_root: Option<&Path>, active_file: Option<&Path>) -> PathBuf {
    if let Some(root) = project_root {
        return root.to_path_buf();
    }

    if let Some(file) = active_file {
        if let Some(parent) = file.parent() {
            if !parent.as_os_str().is_empty() {
                return parent.to_path_buf();
            }
        }
    }

    env::temp_dir()
}
