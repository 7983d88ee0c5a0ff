//! Exclusion filter — glob patterns tested against relative path and bare name
//!
//! Every pattern is matched against both the project-relative path (separators
//! normalized to `/`) and the bare file name, so users can write either a
//! path-scoped pattern (`src/generated/**`) or a name-scoped one
//! (`*.generated.ts`) without knowing the other's location.

use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};

/// Compiled exclusion rules for one aggregation cycle.
///
/// Cheap and side-effect-free to check; the aggregator calls it twice per file
/// per cycle (once on merge, once as the final guard).
pub struct ExclusionFilter {
    project_root: Option<PathBuf>,
    matchers: Vec<GlobMatcher>,
}

impl ExclusionFilter {
    /// Compile the configured patterns. A pattern that fails to compile is
    /// skipped with a stderr warning and treated as non-matching; it never
    /// aborts the check for the remaining patterns.
    pub fn new(project_root: Option<PathBuf>, patterns: &[String]) -> Self {
        let mut matchers = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            // literal_separator keeps `*`/`?` from crossing `/`; `**` still does.
            match GlobBuilder::new(pattern).literal_separator(true).build() {
                Ok(glob) => matchers.push(glob.compile_matcher()),
                Err(e) => eprintln!("  warn: skipping exclude pattern '{}': {}", pattern, e),
            }
        }
        ExclusionFilter {
            project_root,
            matchers,
        }
    }

    /// True when any pattern matches the relative path or the bare file name.
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.matchers.is_empty() {
            return false;
        }

        let relative = self.relative_candidate(path);
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

        self.matchers.iter().any(|matcher| {
            matcher.is_match(relative.as_str()) || (!name.is_empty() && matcher.is_match(name))
        })
    }

    /// Project-relative form of the path with `/` separators; falls back to
    /// the absolute path when the file lies outside the project root.
    fn relative_candidate(&self, path: &Path) -> String {
        let relative = match &self.project_root {
            Some(root) => path.strip_prefix(root).unwrap_or(path),
            None => path,
        };
        relative.to_string_lossy().replace('\\', "/")
    }
}
