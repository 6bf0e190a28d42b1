//! Installing and removing the diagnostic gutter as editors come and go.

use crate::config::GutterConfig;
use crate::error::{GutterError, HostError};
use crate::host::{EditorId, EditorManager, GutterSurface};
use crate::store::ResultStore;

/// Insert `name` before `line_number_gutter` (or at the front if there is none).
///
/// Returns `false` and leaves `gutters` untouched if `name` is already present.
pub fn insert_gutter(gutters: &mut Vec<String>, name: &str, line_number_gutter: &str) -> bool {
    if gutters.iter().any(|g| g == name) {
        return false;
    }
    let index = gutters
        .iter()
        .position(|g| g == line_number_gutter)
        .unwrap_or(0);
    gutters.insert(index, name.to_string());
    true
}

/// Remove `name` from `gutters`. Returns `false` if it was not present.
pub fn remove_gutter(gutters: &mut Vec<String>, name: &str) -> bool {
    let Some(index) = gutters.iter().position(|g| g == name) else {
        return false;
    };
    gutters.remove(index);
    true
}

/// What a [`GutterRegistry::reconcile`] pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Editors that joined the registry.
    pub registered: Vec<EditorId>,
    /// Editors that left the registry.
    pub released: Vec<EditorId>,
}

impl ReconcileOutcome {
    /// Returns `true` if membership did not change.
    pub fn is_unchanged(&self) -> bool {
        self.registered.is_empty() && self.released.is_empty()
    }
}

/// Editors that currently carry the diagnostic gutter, in registration order.
#[derive(Debug, Clone, Default)]
pub struct GutterRegistry {
    editors: Vec<EditorId>,
}

impl GutterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered editors.
    pub fn editors(&self) -> &[EditorId] {
        &self.editors
    }

    /// Returns `true` if `editor` is registered.
    pub fn contains(&self, editor: EditorId) -> bool {
        self.editors.contains(&editor)
    }

    /// Number of registered editors.
    pub fn len(&self) -> usize {
        self.editors.len()
    }

    /// Returns `true` if no editor is registered.
    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }

    /// Make the registry match `visible`.
    ///
    /// Every visible editor gets the gutter column (a no-op when it already has one) and is
    /// registered. Registered editors missing from `visible` lose their column, their markers,
    /// and the stored results for their document. They always leave the registry; host failures
    /// while cleaning them up are logged.
    pub fn reconcile<H>(
        &mut self,
        host: &mut H,
        store: &mut ResultStore,
        config: &GutterConfig,
        visible: &[EditorId],
    ) -> Result<ReconcileOutcome, GutterError>
    where
        H: GutterSurface + EditorManager + ?Sized,
    {
        let mut outcome = ReconcileOutcome::default();

        for &editor in visible {
            install(host, editor, config)?;
            if !self.contains(editor) {
                self.editors.push(editor);
                outcome.registered.push(editor);
            }
        }

        let mut idx = self.editors.len();
        while idx > 0 {
            idx -= 1;
            let editor = self.editors[idx];
            if visible.contains(&editor) {
                continue;
            }
            if let Err(err) = uninstall(host, editor, config) {
                tracing::error!(%editor, error = %err, "error removing diagnostic gutter");
            }
            discard_cached_results(&*host, store, editor);
            self.editors.remove(idx);
            outcome.released.push(editor);
        }

        if !outcome.is_unchanged() {
            tracing::debug!(
                registered = outcome.registered.len(),
                released = outcome.released.len(),
                total = self.editors.len(),
                "reconciled diagnostic gutters"
            );
        }
        Ok(outcome)
    }

    /// Uninstall the gutter from every registered editor and empty the registry.
    pub fn release_all<H>(&mut self, host: &mut H, config: &GutterConfig) -> Result<(), GutterError>
    where
        H: GutterSurface + ?Sized,
    {
        for editor in std::mem::take(&mut self.editors) {
            uninstall(host, editor, config)?;
        }
        Ok(())
    }
}

/// Add the diagnostic gutter column to `editor` if it is missing.
///
/// Returns `true` if the column list changed.
pub fn install<S>(
    surface: &mut S,
    editor: EditorId,
    config: &GutterConfig,
) -> Result<bool, GutterError>
where
    S: GutterSurface + ?Sized,
{
    let mut gutters = surface.gutters(editor)?;
    if !insert_gutter(
        &mut gutters,
        &config.gutter_name,
        &config.line_number_gutter,
    ) {
        return Ok(false);
    }
    surface.set_gutters(editor, gutters)?;
    Ok(true)
}

/// Remove the diagnostic gutter column and its markers from `editor`.
///
/// An editor the host has disposed or no longer knows has nothing left to clean up and is
/// skipped. Returns `true` if the column list changed.
pub fn uninstall<S>(
    surface: &mut S,
    editor: EditorId,
    config: &GutterConfig,
) -> Result<bool, GutterError>
where
    S: GutterSurface + ?Sized,
{
    let mut gutters = match surface.gutters(editor) {
        Ok(gutters) => gutters,
        Err(HostError::EditorDisposed(_) | HostError::EditorNotFound(_)) => return Ok(false),
        Err(err) => return Err(err.into()),
    };
    if !remove_gutter(&mut gutters, &config.gutter_name) {
        return Ok(false);
    }
    surface.clear_gutter(editor, &config.gutter_name)?;
    surface.set_gutters(editor, gutters)?;
    Ok(true)
}

fn discard_cached_results<E>(editors: &E, store: &mut ResultStore, editor: EditorId)
where
    E: EditorManager + ?Sized,
{
    match editors.editor_path(editor) {
        Ok(path) => {
            store.forget_file(&path);
        }
        Err(err) => {
            tracing::error!(%editor, error = %err, "error clearing data from markers");
        }
    }
}
