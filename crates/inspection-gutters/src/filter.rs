//! Per-publish kind filtering.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{DiagnosticKind, DiagnosticResult};

/// Which kinds a structured filter lets through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindFilter {
    /// Accept [`DiagnosticKind::Error`].
    pub error: bool,
    /// Accept [`DiagnosticKind::Warning`].
    pub warning: bool,
    /// Accept [`DiagnosticKind::Meta`].
    pub meta: bool,
}

impl KindFilter {
    /// Accept only errors.
    pub const ERRORS_ONLY: Self = Self {
        error: true,
        warning: false,
        meta: false,
    };
}

/// Filter applied to a report before it is stored.
///
/// Serializes as `true`, `false`, or `{ "error": .., "warning": .., "meta": .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterOptions {
    /// `true` accepts everything, `false` accepts nothing.
    Toggle(bool),
    /// Accept only the flagged kinds.
    Kinds(KindFilter),
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self::ALL
    }
}

impl FilterOptions {
    /// Accept every result, including unrecognized kinds.
    pub const ALL: Self = Self::Toggle(true);
    /// Accept nothing.
    pub const NONE: Self = Self::Toggle(false);

    /// Whether a result of `kind` passes.
    ///
    /// Unrecognized kinds only pass under [`FilterOptions::ALL`].
    pub fn accepts(&self, kind: &DiagnosticKind) -> bool {
        match self {
            Self::Toggle(all) => *all,
            Self::Kinds(kinds) => match kind {
                DiagnosticKind::Error => kinds.error,
                DiagnosticKind::Warning => kinds.warning,
                DiagnosticKind::Meta => kinds.meta,
                DiagnosticKind::Unrecognized(_) => false,
            },
        }
    }

    /// Keep the results that pass, logging any unrecognized kind on the way.
    pub fn apply(&self, source: &str, results: Vec<DiagnosticResult>) -> Vec<DiagnosticResult> {
        results
            .into_iter()
            .filter(|result| {
                if !result.kind.is_recognized() {
                    tracing::warn!(
                        source,
                        kind = %result.kind,
                        "unexpected diagnostic kind"
                    );
                }
                self.accepts(&result.kind)
            })
            .collect()
    }
}

impl From<bool> for FilterOptions {
    fn from(value: bool) -> Self {
        Self::Toggle(value)
    }
}

impl From<KindFilter> for FilterOptions {
    fn from(value: KindFilter) -> Self {
        Self::Kinds(value)
    }
}
