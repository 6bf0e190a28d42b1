//! Diagnostic results as published by producers.
//!
//! A producer (linter, compiler, ...) publishes an [`InspectionReport`] for a file. Each entry is
//! a [`DiagnosticResult`]: a kind, a message and a zero-based position.
//!
//! The serde representation matches the producer wire shape:
//!
//! ```json
//! { "errors": [ { "type": "problem_type_error", "message": "x", "pos": { "line": 2, "ch": 0 } } ] }
//! ```

use serde::{Deserialize, Deserializer, Serialize};

const KIND_ERROR: &str = "problem_type_error";
const KIND_WARNING: &str = "problem_type_warning";
const KIND_META: &str = "problem_type_meta";

/// Diagnostic kinds understood by the gutter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DiagnosticKind {
    /// Error diagnostics.
    Error,
    /// Warning diagnostics.
    Warning,
    /// Informational diagnostics.
    Meta,
    /// A kind string this crate does not know about (kept verbatim).
    Unrecognized(String),
}

impl DiagnosticKind {
    /// Wire name of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Error => KIND_ERROR,
            Self::Warning => KIND_WARNING,
            Self::Meta => KIND_META,
            Self::Unrecognized(name) => name,
        }
    }

    /// Returns `true` for the three recognized kinds.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Returns `true` for [`DiagnosticKind::Error`].
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl From<String> for DiagnosticKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            KIND_ERROR => Self::Error,
            KIND_WARNING => Self::Warning,
            KIND_META => Self::Meta,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<&str> for DiagnosticKind {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<DiagnosticKind> for String {
    fn from(kind: DiagnosticKind) -> Self {
        match kind {
            DiagnosticKind::Unrecognized(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Producers send `null` for unknown coordinates; treat it like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A zero-based line/column position in a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiagnosticPosition {
    /// Zero-based line.
    #[serde(default, deserialize_with = "null_as_default")]
    pub line: usize,
    /// Zero-based column.
    #[serde(default, rename = "ch", deserialize_with = "null_as_default")]
    pub column: usize,
}

impl DiagnosticPosition {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A single diagnostic published by a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticResult {
    /// Diagnostic kind.
    #[serde(rename = "type")]
    pub kind: DiagnosticKind,
    /// Message, shown as the marker tooltip.
    pub message: String,
    /// Anchor position. Only the line is used for gutter placement.
    #[serde(rename = "pos", default, deserialize_with = "null_as_default")]
    pub position: DiagnosticPosition,
}

impl DiagnosticResult {
    /// Create a new result.
    pub fn new(
        kind: DiagnosticKind,
        message: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            position: DiagnosticPosition::new(line, column),
        }
    }

    /// Shorthand for an error result.
    pub fn error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::new(DiagnosticKind::Error, message, line, column)
    }

    /// Shorthand for a warning result.
    pub fn warning(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::new(DiagnosticKind::Warning, message, line, column)
    }

    /// Shorthand for a meta (informational) result.
    pub fn meta(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::new(DiagnosticKind::Meta, message, line, column)
    }

    /// Line the result is anchored to.
    pub fn line(&self) -> usize {
        self.position.line
    }
}

/// The payload a producer hands to [`crate::InspectionGutters::set`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionReport {
    /// All results of one inspection run, of every kind.
    #[serde(default)]
    pub errors: Vec<DiagnosticResult>,
}

impl InspectionReport {
    /// Wrap a list of results.
    pub fn new(errors: Vec<DiagnosticResult>) -> Self {
        Self { errors }
    }

    /// An empty report (clears a source's markers).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a report from producer JSON.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<Vec<DiagnosticResult>> for InspectionReport {
    fn from(errors: Vec<DiagnosticResult>) -> Self {
        Self::new(errors)
    }
}
