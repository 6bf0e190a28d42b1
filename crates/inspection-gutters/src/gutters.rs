//! The producer-facing entry point.
//!
//! [`InspectionGutters`] owns the result store and the gutter registry for one activation, plus the
//! injected [`Host`]. Producers call [`InspectionGutters::set`]; everything else follows from it:
//!
//! 1. the store replaces the `(source, file)` entry with the filtered report
//! 2. the visible editors are re-derived from the host's panes
//! 3. the registry installs/removes gutters to match
//! 4. if `file` is shown in the active editor, that editor is redrawn
//!
//! [`Activation`] wraps the context so repeated activation is a no-op.

use crate::config::GutterConfig;
use crate::diagnostics::{DiagnosticResult, InspectionReport};
use crate::error::GutterError;
use crate::filter::FilterOptions;
use crate::host::{EditorId, Host, active_editor_for_path, visible_editors};
use crate::lifecycle::{GutterRegistry, ReconcileOutcome};
use crate::ranking::rank_and_dedup;
use crate::render::render_file;
use crate::store::ResultStore;

/// What a successful publish did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetOutcome {
    /// Results kept after filtering.
    pub stored: usize,
    /// Gutter membership changes.
    pub reconcile: ReconcileOutcome,
    /// The editor that was redrawn and how many markers it got, if the file was active.
    pub rendered: Option<(EditorId, usize)>,
}

/// Diagnostic gutter state for one activation.
pub struct InspectionGutters<H: Host> {
    host: H,
    config: GutterConfig,
    store: ResultStore,
    registry: GutterRegistry,
}

impl<H: Host> std::fmt::Debug for InspectionGutters<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InspectionGutters")
            .field("gutter_name", &self.config.gutter_name)
            .field("file_count", &self.store.file_count())
            .field("registered_editors", &self.registry.len())
            .finish()
    }
}

impl<H: Host> InspectionGutters<H> {
    /// Create a context with the default config.
    pub fn new(host: H) -> Self {
        Self::with_config(host, GutterConfig::default())
    }

    /// Create a context with `config`.
    pub fn with_config(host: H, config: GutterConfig) -> Self {
        Self {
            host,
            config,
            store: ResultStore::new(),
            registry: GutterRegistry::new(),
        }
    }

    /// The injected host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the injected host (hosts drive pane/document changes through this).
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Active config.
    pub fn config(&self) -> &GutterConfig {
        &self.config
    }

    /// The result store.
    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Editors that currently carry the diagnostic gutter.
    pub fn registered_editors(&self) -> &[EditorId] {
        self.registry.editors()
    }

    /// Publish `report` for `(source, file)` and update the gutters.
    ///
    /// `options` of `None` means [`GutterConfig::default_filter`]. Failures are logged, never
    /// returned; use [`InspectionGutters::try_set`] to observe them.
    pub fn set(
        &mut self,
        source: &str,
        file: &str,
        report: InspectionReport,
        options: Option<FilterOptions>,
    ) {
        if let Err(err) = self.try_set(source, file, report, options) {
            tracing::error!(source, file, error = %err, "failed to update diagnostic gutters");
        }
    }

    /// Fallible form of [`InspectionGutters::set`].
    ///
    /// The store is updated before any host call, so a host failure never loses the publish.
    pub fn try_set(
        &mut self,
        source: &str,
        file: &str,
        report: InspectionReport,
        options: Option<FilterOptions>,
    ) -> Result<SetOutcome, GutterError> {
        let filter = options.unwrap_or(self.config.default_filter);
        let stored = self.store.publish(source, file, report.errors, filter);
        tracing::debug!(source, file, stored, "published diagnostics");

        let reconcile = self.reconcile()?;

        let rendered = match active_editor_for_path(&self.host, file)? {
            Some(editor) => Some((editor, self.render(editor, file)?)),
            None => None,
        };

        Ok(SetOutcome {
            stored,
            reconcile,
            rendered,
        })
    }

    /// Parse a producer JSON report and publish it.
    pub fn set_json(
        &mut self,
        source: &str,
        file: &str,
        json: &str,
        options: Option<FilterOptions>,
    ) -> Result<SetOutcome, GutterError> {
        let report = InspectionReport::from_json_str(json)?;
        self.try_set(source, file, report, options)
    }

    /// Reconcile gutters and redraw whatever the active editor shows.
    ///
    /// For hosts that can notify on focus changes; `set` alone never redraws an inactive file.
    pub fn refresh_active(&mut self) -> Result<Option<(EditorId, usize)>, GutterError> {
        self.reconcile()?;
        let Some(editor) = self.host.active_editor() else {
            return Ok(None);
        };
        let path = self.host.editor_path(editor)?;
        if self.host.open_document_for_path(&path).is_none() {
            return Ok(None);
        }
        let count = self.render(editor, &path)?;
        Ok(Some((editor, count)))
    }

    /// Every source's current results for `file`, unsorted.
    pub fn query(&self, file: &str) -> Vec<DiagnosticResult> {
        self.store.query(file)
    }

    /// The results that would be drawn for `file`, in display order.
    pub fn ranked(&self, file: &str) -> Vec<DiagnosticResult> {
        rank_and_dedup(self.store.query(file))
    }

    /// Remove the gutter from every registered editor, drop all results, and hand back the host.
    pub fn teardown(mut self) -> Result<H, GutterError> {
        self.registry.release_all(&mut self.host, &self.config)?;
        self.store.clear();
        Ok(self.host)
    }

    fn reconcile(&mut self) -> Result<ReconcileOutcome, GutterError> {
        let visible = visible_editors(&self.host)?;
        self.registry
            .reconcile(&mut self.host, &mut self.store, &self.config, &visible)
    }

    fn render(&mut self, editor: EditorId, file: &str) -> Result<usize, GutterError> {
        render_file(&mut self.host, editor, &self.store, file, &self.config)
    }
}

/// Holds at most one [`InspectionGutters`] for the lifetime of an extension activation.
pub struct Activation<H: Host> {
    gutters: Option<InspectionGutters<H>>,
}

impl<H: Host> Default for Activation<H> {
    fn default() -> Self {
        Self { gutters: None }
    }
}

impl<H: Host> std::fmt::Debug for Activation<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Activation")
            .field("gutters", &self.gutters)
            .finish()
    }
}

impl<H: Host> Activation<H> {
    /// Create an inactive holder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate with `host` and `config`.
    ///
    /// Returns `false` (and drops both arguments) if already active.
    pub fn activate(&mut self, host: H, config: GutterConfig) -> bool {
        if self.gutters.is_some() {
            tracing::debug!("inspection gutters already active");
            return false;
        }
        self.gutters = Some(InspectionGutters::with_config(host, config));
        true
    }

    /// Returns `true` once activated and until deactivated.
    pub fn is_active(&self) -> bool {
        self.gutters.is_some()
    }

    /// The live context, if active.
    pub fn gutters(&self) -> Option<&InspectionGutters<H>> {
        self.gutters.as_ref()
    }

    /// The live context, if active.
    pub fn gutters_mut(&mut self) -> Option<&mut InspectionGutters<H>> {
        self.gutters.as_mut()
    }

    /// Tear the context down and return the host. `Ok(None)` if not active.
    pub fn deactivate(&mut self) -> Result<Option<H>, GutterError> {
        self.gutters
            .take()
            .map(InspectionGutters::teardown)
            .transpose()
    }
}
