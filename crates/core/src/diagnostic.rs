//! Diagnostic data model — the shapes pulled from the feed and written to the snapshot

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity of a diagnostic, ordered by the editor's ordinal convention
/// (0 = Error through 3 = Hint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

impl Severity {
    /// Numeric ordinal written to the `severity` field.
    pub fn ordinal(self) -> u8 {
        match self {
            Severity::Error => 0,
            Severity::Warning => 1,
            Severity::Information => 2,
            Severity::Hint => 3,
        }
    }

    /// Human-readable label written to the `level` field, derived from the ordinal.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Information => "Information",
            Severity::Hint => "Hint",
        }
    }

    /// Map an ordinal back to a severity. Returns `None` outside 0–3.
    pub fn from_ordinal(value: u8) -> Option<Self> {
        match value {
            0 => Some(Severity::Error),
            1 => Some(Severity::Warning),
            2 => Some(Severity::Information),
            3 => Some(Severity::Hint),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Zero-based line/character position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

/// Half-open source range between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// A diagnostic code as a bare scalar — either an identifier string or a number.
///
/// The feed may wrap the scalar in a `{ "value": … }` object; the feed reader
/// unwraps it so downstream code only ever sees the scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CodeValue {
    Number(i64),
    Text(String),
}

/// One issue reported against a location in a file, as pulled from the source.
///
/// Immutable once pulled — the aggregator copies and reshapes fields but never
/// mutates a diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    pub source: Option<String>,
    pub code: Option<CodeValue>,
    pub range: Range,
}

/// The snapshot-file shape of one diagnostic.
///
/// `severity` carries the numeric ordinal and `level` its redundant label so
/// consumers can filter without knowing the ordinal mapping. `source` and
/// `code` are omitted entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    pub message: String,
    pub severity: u8,
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeValue>,
    pub start: Position,
    pub end: Position,
}

impl DiagnosticRecord {
    /// Shape a pulled diagnostic for output.
    pub fn from_diagnostic(diagnostic: &Diagnostic) -> Self {
        DiagnosticRecord {
            message: diagnostic.message.clone(),
            severity: diagnostic.severity.ordinal(),
            level: diagnostic.severity.label().to_string(),
            source: diagnostic.source.clone(),
            code: diagnostic.code.clone(),
            start: diagnostic.range.start,
            end: diagnostic.range.end,
        }
    }
}

/// One row of the snapshot: a file and its current diagnostics.
///
/// An empty `diagnostics` list means the file was observed with diagnostics at
/// least once and currently has none — "clean" is reported explicitly rather
/// than by omission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub file: PathBuf,
    pub diagnostics: Vec<DiagnosticRecord>,
}
