//! Feed reader — the concrete diagnostic source backed by a JSON feed file
//!
//! An editor bridge maintains a JSON object mapping absolute file paths to
//! arrays of diagnostics. The reader re-parses the whole file on every pull;
//! there is no incremental protocol. A missing feed file means the editor has
//! not reported anything yet and is treated as an empty world, not an error.

use crate::diagnostic::{CodeValue, Diagnostic, Range, Severity};
use crate::source::DiagnosticSource;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced while interpreting feed contents.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("parsing feed {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("feed entry for {file}: severity ordinal {value} out of range 0-3")]
    Severity { file: PathBuf, value: u8 },
}

/// Raw feed shape for one diagnostic, before severity and code validation.
#[derive(Debug, Deserialize)]
struct FeedDiagnostic {
    message: String,
    severity: u8,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    code: Option<FeedCode>,
    range: Range,
}

/// The feed may supply `code` as a bare scalar or wrapped in `{ "value": … }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedCode {
    Scalar(CodeValue),
    Wrapped { value: CodeValue },
}

impl FeedCode {
    fn into_scalar(self) -> CodeValue {
        match self {
            FeedCode::Scalar(value) | FeedCode::Wrapped { value } => value,
        }
    }
}

/// Parse a feed document into the world mapping.
pub fn parse_feed(
    path: &Path,
    data: &str,
) -> Result<BTreeMap<PathBuf, Vec<Diagnostic>>, FeedError> {
    let raw: BTreeMap<PathBuf, Vec<FeedDiagnostic>> =
        serde_json::from_str(data).map_err(|source| FeedError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut world = BTreeMap::new();
    for (file, diagnostics) in raw {
        let mut converted = Vec::with_capacity(diagnostics.len());
        for diagnostic in diagnostics {
            let severity = Severity::from_ordinal(diagnostic.severity).ok_or_else(|| {
                FeedError::Severity {
                    file: file.clone(),
                    value: diagnostic.severity,
                }
            })?;
            converted.push(Diagnostic {
                message: diagnostic.message,
                severity,
                source: diagnostic.source,
                code: diagnostic.code.map(FeedCode::into_scalar),
                range: diagnostic.range,
            });
        }
        world.insert(file, converted);
    }
    Ok(world)
}

/// Diagnostic source that pulls from a feed file on disk.
pub struct FeedSource {
    path: PathBuf,
}

impl FeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FeedSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DiagnosticSource for FeedSource {
    fn pull(&self) -> Result<BTreeMap<PathBuf, Vec<Diagnostic>>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("reading feed {}", self.path.display()))?;
        Ok(parse_feed(&self.path, &data)?)
    }
}
