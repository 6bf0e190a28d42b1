//! Turning stored results into gutter markers.
//!
//! Rendering is always a full replace: the diagnostic gutter is cleared, then one marker is placed
//! per surviving line of `dedup(rank(query(file)))`. Only two visual severities exist; warnings,
//! metas and unrecognized kinds all share the non-error style.

use crate::config::GutterConfig;
use crate::diagnostics::DiagnosticResult;
use crate::error::GutterError;
use crate::host::{EditorId, GutterSurface};
use crate::ranking::rank_and_dedup;
use crate::store::ResultStore;

/// Visual severity of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerSeverity {
    /// Error style.
    Error,
    /// Everything that is not an error.
    Warning,
}

/// A marker to place in the diagnostic gutter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GutterMarker {
    /// Visual severity.
    pub severity: MarkerSeverity,
    /// Class attached to every marker element.
    pub class: String,
    /// Class carrying the severity style.
    pub severity_class: String,
    /// Tooltip text (the diagnostic message).
    pub tooltip: String,
}

impl GutterMarker {
    /// Build the marker for `result`.
    pub fn for_result(result: &DiagnosticResult, config: &GutterConfig) -> Self {
        let (severity, severity_class) = if result.kind.is_error() {
            (MarkerSeverity::Error, &config.error_class)
        } else {
            (MarkerSeverity::Warning, &config.warning_class)
        };
        Self {
            severity,
            class: config.marker_class.clone(),
            severity_class: severity_class.clone(),
            tooltip: result.message.clone(),
        }
    }
}

/// Markers (with their lines) for a set of results, after ranking and dedup.
pub fn markers_for(
    results: Vec<DiagnosticResult>,
    config: &GutterConfig,
) -> Vec<(usize, GutterMarker)> {
    rank_and_dedup(results)
        .iter()
        .map(|result| (result.line(), GutterMarker::for_result(result, config)))
        .collect()
}

/// Clear `editor`'s diagnostic gutter and redraw it from `store`'s results for `file`.
///
/// Returns the number of markers placed.
pub fn render_file<S>(
    surface: &mut S,
    editor: EditorId,
    store: &ResultStore,
    file: &str,
    config: &GutterConfig,
) -> Result<usize, GutterError>
where
    S: GutterSurface + ?Sized,
{
    let markers = markers_for(store.query(file), config);

    surface.clear_gutter(editor, &config.gutter_name)?;
    let count = markers.len();
    for (line, marker) in markers {
        surface.set_gutter_marker(editor, line, &config.gutter_name, marker)?;
    }

    tracing::debug!(%editor, file, markers = count, "rendered diagnostic gutter");
    Ok(count)
}
