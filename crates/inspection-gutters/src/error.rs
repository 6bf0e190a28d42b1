use thiserror::Error;

use crate::host::{EditorId, PaneId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failures reported by host collaborators.
pub enum HostError {
    #[error("editor {0} not found")]
    /// The editor id is unknown to the host.
    EditorNotFound(EditorId),

    #[error("editor {0} has been disposed")]
    /// The editor existed but has been torn down.
    EditorDisposed(EditorId),

    #[error("pane {0} not found")]
    /// The pane id is unknown to the host.
    PaneNotFound(PaneId),

    #[error("host error: {0}")]
    /// Any other host-side failure.
    Other(String),
}

#[derive(Debug, Error)]
/// Errors produced while publishing results or updating gutters.
pub enum GutterError {
    #[error(transparent)]
    /// A host collaborator failed.
    Host(#[from] HostError),

    #[error("invalid producer report: {0}")]
    /// A JSON report or config could not be parsed.
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    /// A configuration value was rejected.
    Config(String),
}
