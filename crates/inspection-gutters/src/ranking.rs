//! Display ordering and positional deduplication.

use std::collections::HashSet;

use crate::diagnostics::{DiagnosticKind, DiagnosticResult};

/// Display precedence of a kind. Lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeverityClass {
    /// Errors.
    Error,
    /// Warnings.
    Warning,
    /// Informational results.
    Meta,
    /// Anything else.
    Unrecognized,
}

impl From<&DiagnosticKind> for SeverityClass {
    fn from(kind: &DiagnosticKind) -> Self {
        match kind {
            DiagnosticKind::Error => Self::Error,
            DiagnosticKind::Warning => Self::Warning,
            DiagnosticKind::Meta => Self::Meta,
            DiagnosticKind::Unrecognized(_) => Self::Unrecognized,
        }
    }
}

/// Sort by severity class, then line. Stable, so equal keys keep their input order.
pub fn rank(mut results: Vec<DiagnosticResult>) -> Vec<DiagnosticResult> {
    results.sort_by_key(|result| (SeverityClass::from(&result.kind), result.line()));
    results
}

/// Keep only the first result seen on each line.
///
/// Applied to [`rank`] output, the survivor on a line is its most severe result.
pub fn dedup(ranked: Vec<DiagnosticResult>) -> Vec<DiagnosticResult> {
    let mut seen_lines = HashSet::new();
    ranked
        .into_iter()
        .filter(|result| seen_lines.insert(result.line()))
        .collect()
}

/// `dedup(rank(results))`.
pub fn rank_and_dedup(results: Vec<DiagnosticResult>) -> Vec<DiagnosticResult> {
    dedup(rank(results))
}
