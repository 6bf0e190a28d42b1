//! Host editor collaborators.
//!
//! The gutter engine never owns documents, panes or editor widgets. It talks to the host through
//! four narrow traits, one per collaborator:
//!
//! - [`PaneManager`]: which panes are visible and which path each one shows
//! - [`DocumentManager`]: open documents by path, and the editor bound to each
//! - [`EditorManager`]: the active editor and the document behind an editor
//! - [`GutterSurface`]: the editor widget's gutter primitives
//!
//! Anything implementing all four is a [`Host`]. [`crate::HeadlessWorkspace`] is an in-memory
//! implementation used by tests and demos.

use crate::error::HostError;
use crate::render::GutterMarker;

/// Opaque identifier for a pane (split) in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaneId(u64);

impl PaneId {
    /// Wrap a host-assigned id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Opaque identifier for an open document in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    /// Wrap a host-assigned id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Opaque identifier for an editor widget in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EditorId(u64);

impl EditorId {
    /// Wrap a host-assigned id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

macro_rules! display_id {
    ($($ty:ty),*) => {
        $(impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "#{}", self.0)
            }
        })*
    };
}

display_id!(PaneId, DocumentId, EditorId);

/// Visible panes and what they show.
pub trait PaneManager {
    /// Ids of every pane currently laid out.
    fn pane_ids(&self) -> Result<Vec<PaneId>, HostError>;

    /// Absolute path of the file shown in `pane`, if any.
    fn currently_viewed_path(&self, pane: PaneId) -> Result<Option<String>, HostError>;
}

/// Open documents.
pub trait DocumentManager {
    /// The open in-memory document for `path`, if the file is open.
    fn open_document_for_path(&self, path: &str) -> Option<DocumentId>;

    /// The editor the document is bound to, if one exists.
    fn master_editor(&self, document: DocumentId) -> Option<EditorId>;
}

/// Editor focus and editor-to-document binding.
pub trait EditorManager {
    /// The editor currently receiving focus, if any.
    fn active_editor(&self) -> Option<EditorId>;

    /// The document `editor` is bound to.
    fn editor_document(&self, editor: EditorId) -> Result<DocumentId, HostError>;

    /// Absolute path of the document `editor` is bound to.
    ///
    /// Fails with [`HostError::EditorDisposed`] once the editor is gone.
    fn editor_path(&self, editor: EditorId) -> Result<String, HostError>;
}

/// Gutter primitives of an editor widget.
pub trait GutterSurface {
    /// Gutter column names, in display order.
    fn gutters(&self, editor: EditorId) -> Result<Vec<String>, HostError>;

    /// Replace the gutter column list.
    fn set_gutters(&mut self, editor: EditorId, gutters: Vec<String>) -> Result<(), HostError>;

    /// Place `marker` at `line` in the gutter column `gutter`, replacing any marker already there.
    fn set_gutter_marker(
        &mut self,
        editor: EditorId,
        line: usize,
        gutter: &str,
        marker: GutterMarker,
    ) -> Result<(), HostError>;

    /// Remove every marker from the gutter column `gutter`.
    fn clear_gutter(&mut self, editor: EditorId, gutter: &str) -> Result<(), HostError>;
}

/// Everything the gutter engine needs from the host.
pub trait Host: PaneManager + DocumentManager + EditorManager + GutterSurface {}

impl<T> Host for T where T: PaneManager + DocumentManager + EditorManager + GutterSurface {}

/// Editors bound to the documents shown in visible panes, in pane order, without duplicates.
///
/// Panes showing a path with no open document, or a document with no editor, contribute nothing.
pub fn visible_editors<H>(host: &H) -> Result<Vec<EditorId>, HostError>
where
    H: PaneManager + DocumentManager + ?Sized,
{
    let mut editors = Vec::new();
    for pane in host.pane_ids()? {
        let Some(path) = host.currently_viewed_path(pane)? else {
            continue;
        };
        let editor = host
            .open_document_for_path(&path)
            .and_then(|doc| host.master_editor(doc));
        if let Some(editor) = editor
            && !editors.contains(&editor)
        {
            editors.push(editor);
        }
    }
    Ok(editors)
}

/// The active editor, if it is bound to the open document for `path`.
pub fn active_editor_for_path<H>(host: &H, path: &str) -> Result<Option<EditorId>, HostError>
where
    H: DocumentManager + EditorManager + ?Sized,
{
    let Some(active) = host.active_editor() else {
        return Ok(None);
    };
    let Some(document) = host.open_document_for_path(path) else {
        return Ok(None);
    };
    if host.editor_document(active)? == document {
        Ok(Some(active))
    } else {
        Ok(None)
    }
}
