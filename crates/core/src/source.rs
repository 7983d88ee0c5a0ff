//! Diagnostic source boundary

use crate::diagnostic::Diagnostic;
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A collaborator that can report the complete current diagnostic world.
///
/// `pull` always returns the entire mapping of file → diagnostics, never a
/// delta. A `BTreeMap` keeps the iteration order deterministic so files newly
/// observed in one cycle enter the seen-set in a stable order.
pub trait DiagnosticSource {
    fn pull(&self) -> Result<BTreeMap<PathBuf, Vec<Diagnostic>>>;
}
