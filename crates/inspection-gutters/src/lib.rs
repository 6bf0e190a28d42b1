#![warn(missing_docs)]
//! Inspection Gutters - multi-source diagnostic markers for editor gutters
//!
//! # Overview
//!
//! `inspection-gutters` collects diagnostic results from any number of independent producers
//! ("sources": linters, compilers, ...) per file, merges them into a single ordered list, and
//! draws one marker per line in a dedicated gutter column of the host editor. It keeps that
//! column installed on exactly the editors that are visible in some pane.
//!
//! The host editor is never owned. Panes, documents and editor widgets are reached through
//! the traits in [`host`], injected at construction.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  InspectionGutters::set / Activation        │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Renderer (clear + redraw active editor)    │  ← Markers
//! ├─────────────────────────────────────────────┤
//! │  GutterRegistry (install / uninstall)       │  ← Lifecycle
//! ├─────────────────────────────────────────────┤
//! │  rank + dedup                               │  ← Ordering
//! ├─────────────────────────────────────────────┤
//! │  ResultStore (file → source → results)      │  ← Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use inspection_gutters::{
//!     DiagnosticResult, HeadlessWorkspace, InspectionGutters, InspectionReport, MarkerSeverity,
//! };
//!
//! let mut ws = HeadlessWorkspace::new();
//! let pane = ws.active_pane();
//! let editor = ws.open_in_pane(pane, "/src/main.rs").unwrap();
//!
//! let mut gutters = InspectionGutters::new(ws);
//! gutters.set(
//!     "linter",
//!     "/src/main.rs",
//!     InspectionReport::new(vec![DiagnosticResult::error("x", 2, 0)]),
//!     None,
//! );
//!
//! let gutter = gutters.config().gutter_name.clone();
//! let markers = gutters.host().markers(editor, &gutter);
//! assert_eq!(markers.len(), 1);
//! assert_eq!(markers[0].0, 2);
//! assert_eq!(markers[0].1.severity, MarkerSeverity::Error);
//! assert_eq!(markers[0].1.tooltip, "x");
//! ```
//!
//! # Module Description
//!
//! - [`diagnostics`] - result and report types (producer wire shape)
//! - [`filter`] - per-publish kind filtering
//! - [`store`] - per-file, per-source result storage
//! - [`ranking`] - severity/line ordering and per-line dedup
//! - [`host`] - host collaborator traits
//! - [`lifecycle`] - gutter installation across visible editors
//! - [`render`] - marker construction and redraw
//! - [`gutters`] - the producer-facing context and activation guard
//! - [`config`] - gutter naming and default filter
//! - [`workspace`] - in-memory host implementation
//!
//! # Logging
//!
//! Events are emitted through `tracing`; install a subscriber in the host to see them.

pub mod config;
pub mod diagnostics;
mod error;
pub mod filter;
pub mod gutters;
pub mod host;
pub mod lifecycle;
pub mod ranking;
pub mod render;
pub mod store;
pub mod workspace;

pub use config::GutterConfig;
pub use diagnostics::{DiagnosticKind, DiagnosticPosition, DiagnosticResult, InspectionReport};
pub use error::{GutterError, HostError};
pub use filter::{FilterOptions, KindFilter};
pub use gutters::{Activation, InspectionGutters, SetOutcome};
pub use host::{
    DocumentId, DocumentManager, EditorId, EditorManager, GutterSurface, Host, PaneId, PaneManager,
    active_editor_for_path, visible_editors,
};
pub use lifecycle::{GutterRegistry, ReconcileOutcome};
pub use ranking::{SeverityClass, dedup, rank, rank_and_dedup};
pub use render::{GutterMarker, MarkerSeverity, markers_for, render_file};
pub use store::ResultStore;
pub use workspace::{HeadlessWorkspace, OpenDocumentResult, WorkspaceError};
