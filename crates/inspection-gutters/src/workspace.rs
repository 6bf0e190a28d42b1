//! Headless host model: panes, open documents and editor gutters.
//!
//! `inspection-gutters` is UI-agnostic; the host editor owns panes, documents and widgets. This
//! module provides a small in-memory [`HeadlessWorkspace`] that implements every host trait so the
//! gutter engine can be driven without a real editor (tests, demos, snapshot tooling).
//!
//! The model mirrors a typical split-pane editor:
//!
//! - `PaneId` + the path it currently shows (which may or may not be open)
//! - `DocumentId` + its path, one per open file
//! - `EditorId` + gutter columns and markers, one master editor per document
//!
//! Closing a document disposes its editor. A disposed editor still remembers its path until it is
//! destroyed, after which every query about it fails.

use crate::error::HostError;
use crate::host::{
    DocumentId, DocumentManager, EditorId, EditorManager, GutterSurface, PaneId, PaneManager,
};
use crate::render::GutterMarker;
use std::collections::{BTreeMap, HashMap};

/// Result of opening a document (a document always gets a master editor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenDocumentResult {
    /// The created document id.
    pub document_id: DocumentId,
    /// The master editor bound to that document.
    pub editor_id: EditorId,
}

/// Workspace-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceError {
    /// A document with this path is already open.
    PathAlreadyOpen(String),
    /// A document id was not found.
    DocumentNotFound(DocumentId),
    /// A pane id was not found.
    PaneNotFound(PaneId),
    /// An editor id was not found.
    EditorNotFound(EditorId),
    /// The last pane cannot be closed.
    LastPane,
}

struct DocumentEntry {
    path: String,
    editor: EditorId,
}

struct EditorEntry {
    document: DocumentId,
    path: Option<String>,
    disposed: bool,
    gutters: Vec<String>,
    markers: HashMap<String, BTreeMap<usize, GutterMarker>>,
    gutter_list_writes: usize,
}

#[derive(Default)]
struct PaneEntry {
    path: Option<String>,
}

/// An in-memory host with panes, documents and editors.
pub struct HeadlessWorkspace {
    default_gutters: Vec<String>,

    next_document_id: u64,
    documents: BTreeMap<DocumentId, DocumentEntry>,
    path_to_document: HashMap<String, DocumentId>,

    next_editor_id: u64,
    editors: BTreeMap<EditorId, EditorEntry>,

    next_pane_id: u64,
    panes: BTreeMap<PaneId, PaneEntry>,
    active_pane: PaneId,
}

impl std::fmt::Debug for HeadlessWorkspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessWorkspace")
            .field("document_count", &self.documents.len())
            .field("editor_count", &self.editors.len())
            .field("pane_count", &self.panes.len())
            .field("active_pane", &self.active_pane)
            .finish()
    }
}

impl Default for HeadlessWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessWorkspace {
    /// Create a workspace with a single empty pane. New editors start with a `linenumbers` gutter.
    pub fn new() -> Self {
        Self::with_default_gutters(vec!["linenumbers".to_string()])
    }

    /// Create a workspace whose new editors start with `gutters`.
    pub fn with_default_gutters(gutters: Vec<String>) -> Self {
        let first = PaneId::new(0);
        let mut panes = BTreeMap::new();
        panes.insert(first, PaneEntry::default());
        Self {
            default_gutters: gutters,
            next_document_id: 0,
            documents: BTreeMap::new(),
            path_to_document: HashMap::new(),
            next_editor_id: 0,
            editors: BTreeMap::new(),
            next_pane_id: 1,
            panes,
            active_pane: first,
        }
    }

    /// Returns the number of open documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Returns the number of panes.
    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    /// The pane that has focus.
    pub fn active_pane(&self) -> PaneId {
        self.active_pane
    }

    /// Focus `pane`.
    pub fn set_active_pane(&mut self, pane: PaneId) -> Result<(), WorkspaceError> {
        if !self.panes.contains_key(&pane) {
            return Err(WorkspaceError::PaneNotFound(pane));
        }
        self.active_pane = pane;
        Ok(())
    }

    /// Add an empty pane (a split). Focus does not move.
    pub fn split_pane(&mut self) -> PaneId {
        let id = PaneId::new(self.next_pane_id);
        self.next_pane_id = self.next_pane_id.saturating_add(1);
        self.panes.insert(id, PaneEntry::default());
        id
    }

    /// Remove a pane. If it had focus, focus moves to the first remaining pane.
    pub fn close_pane(&mut self, pane: PaneId) -> Result<(), WorkspaceError> {
        if !self.panes.contains_key(&pane) {
            return Err(WorkspaceError::PaneNotFound(pane));
        }
        if self.panes.len() == 1 {
            return Err(WorkspaceError::LastPane);
        }
        self.panes.remove(&pane);
        if self.active_pane == pane
            && let Some(first) = self.panes.keys().next()
        {
            self.active_pane = *first;
        }
        Ok(())
    }

    /// Open a document for `path`, creating its master editor.
    pub fn open_document(&mut self, path: &str) -> Result<OpenDocumentResult, WorkspaceError> {
        if self.path_to_document.contains_key(path) {
            return Err(WorkspaceError::PathAlreadyOpen(path.to_string()));
        }

        let document_id = DocumentId::new(self.next_document_id);
        self.next_document_id = self.next_document_id.saturating_add(1);
        let editor_id = EditorId::new(self.next_editor_id);
        self.next_editor_id = self.next_editor_id.saturating_add(1);

        self.documents.insert(
            document_id,
            DocumentEntry {
                path: path.to_string(),
                editor: editor_id,
            },
        );
        self.path_to_document.insert(path.to_string(), document_id);
        self.editors.insert(
            editor_id,
            EditorEntry {
                document: document_id,
                path: Some(path.to_string()),
                disposed: false,
                gutters: self.default_gutters.clone(),
                markers: HashMap::new(),
                gutter_list_writes: 0,
            },
        );

        Ok(OpenDocumentResult {
            document_id,
            editor_id,
        })
    }

    /// Close a document. Its editor is disposed and panes showing it become empty.
    pub fn close_document(&mut self, id: DocumentId) -> Result<(), WorkspaceError> {
        let Some(entry) = self.documents.remove(&id) else {
            return Err(WorkspaceError::DocumentNotFound(id));
        };
        self.path_to_document.remove(&entry.path);

        if let Some(editor) = self.editors.get_mut(&entry.editor) {
            editor.disposed = true;
            editor.markers.clear();
        }
        for pane in self.panes.values_mut() {
            if pane.path.as_deref() == Some(entry.path.as_str()) {
                pane.path = None;
            }
        }
        Ok(())
    }

    /// Drop everything the workspace knows about `editor`, including its path.
    ///
    /// The document (if still open) is left without an editor.
    pub fn destroy_editor(&mut self, id: EditorId) -> Result<(), WorkspaceError> {
        let Some(editor) = self.editors.get_mut(&id) else {
            return Err(WorkspaceError::EditorNotFound(id));
        };
        editor.disposed = true;
        editor.path = None;
        editor.markers.clear();
        Ok(())
    }

    /// Remove `editor` entirely, as a host does once the widget is gone. Later lookups report
    /// [`HostError::EditorNotFound`].
    pub fn forget_editor(&mut self, id: EditorId) -> Result<(), WorkspaceError> {
        self.editors
            .remove(&id)
            .map(|_| ())
            .ok_or(WorkspaceError::EditorNotFound(id))
    }

    /// Show `path` in `pane`, whether or not it is open.
    pub fn show_path(&mut self, pane: PaneId, path: Option<&str>) -> Result<(), WorkspaceError> {
        let Some(entry) = self.panes.get_mut(&pane) else {
            return Err(WorkspaceError::PaneNotFound(pane));
        };
        entry.path = path.map(str::to_string);
        Ok(())
    }

    /// Open `path` if needed, show it in `pane`, and focus that pane.
    pub fn open_in_pane(&mut self, pane: PaneId, path: &str) -> Result<EditorId, WorkspaceError> {
        if !self.panes.contains_key(&pane) {
            return Err(WorkspaceError::PaneNotFound(pane));
        }
        let editor = match self.path_to_document.get(path) {
            Some(doc) => self.documents[doc].editor,
            None => self.open_document(path)?.editor_id,
        };
        self.show_path(pane, Some(path))?;
        self.active_pane = pane;
        Ok(editor)
    }

    /// Look up the open document for `path`.
    pub fn document_id_for_path(&self, path: &str) -> Option<DocumentId> {
        self.path_to_document.get(path).copied()
    }

    /// Look up the master editor of the open document for `path`.
    pub fn editor_for_path(&self, path: &str) -> Option<EditorId> {
        let doc = self.path_to_document.get(path)?;
        self.documents.get(doc).map(|d| d.editor)
    }

    /// Returns `true` if `editor` has been disposed.
    pub fn is_disposed(&self, editor: EditorId) -> Result<bool, WorkspaceError> {
        self.editors
            .get(&editor)
            .map(|e| e.disposed)
            .ok_or(WorkspaceError::EditorNotFound(editor))
    }

    /// Gutter columns of `editor`, including disposed ones.
    pub fn gutter_list(&self, editor: EditorId) -> Result<&[String], WorkspaceError> {
        self.editors
            .get(&editor)
            .map(|e| e.gutters.as_slice())
            .ok_or(WorkspaceError::EditorNotFound(editor))
    }

    /// How many times the gutter column list of `editor` has been replaced.
    pub fn gutter_list_writes(&self, editor: EditorId) -> Result<usize, WorkspaceError> {
        self.editors
            .get(&editor)
            .map(|e| e.gutter_list_writes)
            .ok_or(WorkspaceError::EditorNotFound(editor))
    }

    /// Markers currently placed in `gutter` of `editor`, ordered by line.
    pub fn markers(&self, editor: EditorId, gutter: &str) -> Vec<(usize, GutterMarker)> {
        self.editors
            .get(&editor)
            .and_then(|e| e.markers.get(gutter))
            .map(|lines| {
                lines
                    .iter()
                    .map(|(line, marker)| (*line, marker.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The marker at `line` in `gutter` of `editor`, if any.
    pub fn marker_at(&self, editor: EditorId, gutter: &str, line: usize) -> Option<&GutterMarker> {
        self.editors.get(&editor)?.markers.get(gutter)?.get(&line)
    }

    fn live_editor(&self, editor: EditorId) -> Result<&EditorEntry, HostError> {
        match self.editors.get(&editor) {
            None => Err(HostError::EditorNotFound(editor)),
            Some(entry) if entry.disposed => Err(HostError::EditorDisposed(editor)),
            Some(entry) => Ok(entry),
        }
    }

    fn live_editor_mut(&mut self, editor: EditorId) -> Result<&mut EditorEntry, HostError> {
        match self.editors.get_mut(&editor) {
            None => Err(HostError::EditorNotFound(editor)),
            Some(entry) if entry.disposed => Err(HostError::EditorDisposed(editor)),
            Some(entry) => Ok(entry),
        }
    }
}

impl PaneManager for HeadlessWorkspace {
    fn pane_ids(&self) -> Result<Vec<PaneId>, HostError> {
        Ok(self.panes.keys().copied().collect())
    }

    fn currently_viewed_path(&self, pane: PaneId) -> Result<Option<String>, HostError> {
        self.panes
            .get(&pane)
            .map(|p| p.path.clone())
            .ok_or(HostError::PaneNotFound(pane))
    }
}

impl DocumentManager for HeadlessWorkspace {
    fn open_document_for_path(&self, path: &str) -> Option<DocumentId> {
        self.document_id_for_path(path)
    }

    fn master_editor(&self, document: DocumentId) -> Option<EditorId> {
        let editor = self.documents.get(&document)?.editor;
        match self.editors.get(&editor) {
            Some(entry) if !entry.disposed => Some(editor),
            _ => None,
        }
    }
}

impl EditorManager for HeadlessWorkspace {
    fn active_editor(&self) -> Option<EditorId> {
        let path = self.panes.get(&self.active_pane)?.path.as_deref()?;
        let doc = self.document_id_for_path(path)?;
        self.master_editor(doc)
    }

    fn editor_document(&self, editor: EditorId) -> Result<DocumentId, HostError> {
        self.editors
            .get(&editor)
            .map(|e| e.document)
            .ok_or(HostError::EditorNotFound(editor))
    }

    fn editor_path(&self, editor: EditorId) -> Result<String, HostError> {
        let entry = self
            .editors
            .get(&editor)
            .ok_or(HostError::EditorNotFound(editor))?;
        entry.path.clone().ok_or(HostError::EditorDisposed(editor))
    }
}

impl GutterSurface for HeadlessWorkspace {
    fn gutters(&self, editor: EditorId) -> Result<Vec<String>, HostError> {
        Ok(self.live_editor(editor)?.gutters.clone())
    }

    fn set_gutters(&mut self, editor: EditorId, gutters: Vec<String>) -> Result<(), HostError> {
        let entry = self.live_editor_mut(editor)?;
        entry.markers.retain(|name, _| gutters.contains(name));
        entry.gutters = gutters;
        entry.gutter_list_writes += 1;
        Ok(())
    }

    fn set_gutter_marker(
        &mut self,
        editor: EditorId,
        line: usize,
        gutter: &str,
        marker: GutterMarker,
    ) -> Result<(), HostError> {
        let entry = self.live_editor_mut(editor)?;
        if !entry.gutters.iter().any(|g| g == gutter) {
            return Err(HostError::Other(format!(
                "gutter '{gutter}' is not installed on editor {editor}"
            )));
        }
        entry
            .markers
            .entry(gutter.to_string())
            .or_default()
            .insert(line, marker);
        Ok(())
    }

    fn clear_gutter(&mut self, editor: EditorId, gutter: &str) -> Result<(), HostError> {
        let entry = self.live_editor_mut(editor)?;
        entry.markers.remove(gutter);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_editor_follows_active_pane() {
        let mut ws = HeadlessWorkspace::new();
        let left = ws.active_pane();
        let right = ws.split_pane();

        let a = ws.open_in_pane(left, "/a.rs").unwrap();
        let b = ws.open_in_pane(right, "/b.rs").unwrap();
        assert_eq!(ws.active_editor(), Some(b));

        ws.set_active_pane(left).unwrap();
        assert_eq!(ws.active_editor(), Some(a));

        ws.close_pane(left).unwrap();
        assert_eq!(ws.active_pane(), right);
        assert_eq!(ws.close_pane(right), Err(WorkspaceError::LastPane));
    }

    #[test]
    fn test_close_document_disposes_editor_but_keeps_path() {
        let mut ws = HeadlessWorkspace::new();
        let pane = ws.active_pane();
        let editor = ws.open_in_pane(pane, "/a.rs").unwrap();
        let doc = ws.document_id_for_path("/a.rs").unwrap();

        ws.close_document(doc).unwrap();
        assert!(ws.is_disposed(editor).unwrap());
        assert_eq!(ws.currently_viewed_path(pane).unwrap(), None);
        assert_eq!(ws.editor_path(editor).unwrap(), "/a.rs");
        assert_eq!(ws.gutters(editor), Err(HostError::EditorDisposed(editor)));

        ws.destroy_editor(editor).unwrap();
        assert_eq!(
            ws.editor_path(editor),
            Err(HostError::EditorDisposed(editor))
        );
    }

    #[test]
    fn test_forgotten_editor_is_not_found() {
        let mut ws = HeadlessWorkspace::new();
        let pane = ws.active_pane();
        let editor = ws.open_in_pane(pane, "/a.rs").unwrap();
        let doc = ws.document_id_for_path("/a.rs").unwrap();

        ws.forget_editor(editor).unwrap();
        assert_eq!(ws.gutters(editor), Err(HostError::EditorNotFound(editor)));
        assert_eq!(ws.master_editor(doc), None);
        assert_eq!(ws.active_editor(), None);
        assert_eq!(
            ws.forget_editor(editor),
            Err(WorkspaceError::EditorNotFound(editor))
        );
    }
}
