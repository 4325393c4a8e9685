//! Viewer state machine.
//!
//! One document at a time. Pages are only ever replaced as a whole: loading a
//! file and refreshing after a mutation both install a complete render pass.

use crate::zoom::Zoom;
use std::path::{Path, PathBuf};

pub const NO_FILE_STATUS: &str = "No file loaded";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("No file is currently open")]
pub struct NoDocument;

/// Toolbar actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Open,
    Save,
    RemovePage,
    Rotate,
    ZoomIn,
    ZoomOut,
    Compress,
    ExportImages,
    ConvertToWord,
}

impl Action {
    pub const TOOLBAR: [Action; 9] = [
        Action::Open,
        Action::Save,
        Action::RemovePage,
        Action::Rotate,
        Action::ZoomIn,
        Action::ZoomOut,
        Action::Compress,
        Action::ExportImages,
        Action::ConvertToWord,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::Open => "Open PDF",
            Action::Save => "Save PDF",
            Action::RemovePage => "Remove Page",
            Action::Rotate => "Rotate",
            Action::ZoomIn => "Zoom In",
            Action::ZoomOut => "Zoom Out",
            Action::Compress => "Compress…",
            Action::ExportImages => "Export JPG…",
            Action::ConvertToWord => "Convert to Word",
        }
    }

    /// Whether a toolbar separator goes before this action.
    pub fn starts_group(self) -> bool {
        matches!(self, Action::RemovePage | Action::Compress)
    }

    pub fn needs_document(self) -> bool {
        !matches!(self, Action::Open)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument<P> {
    path: PathBuf,
    pages: Vec<P>,
    thumbnails: Vec<P>,
}

impl<P> LoadedDocument<P> {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pages(&self) -> &[P] {
        &self.pages
    }

    pub fn thumbnails(&self) -> &[P] {
        &self.thumbnails
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
enum DocumentState<P> {
    #[default]
    Empty,
    Loaded(LoadedDocument<P>),
}

#[derive(Debug, Clone)]
pub struct ViewerState<P> {
    document: DocumentState<P>,
    zoom: Zoom,
    status: String,
    generation: u64,
    scroll_target: Option<usize>,
}

impl<P> Default for ViewerState<P> {
    fn default() -> Self {
        Self::new(Zoom::default())
    }
}

impl<P> ViewerState<P> {
    pub fn new(zoom: Zoom) -> Self {
        Self {
            document: DocumentState::Empty,
            zoom,
            status: NO_FILE_STATUS.to_owned(),
            generation: 0,
            scroll_target: None,
        }
    }

    pub fn loaded(&self) -> Option<&LoadedDocument<P>> {
        match &self.document {
            DocumentState::Loaded(doc) => Some(doc),
            DocumentState::Empty => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded().is_some()
    }

    pub fn current_path(&self) -> Result<&Path, NoDocument> {
        self.loaded().map(LoadedDocument::path).ok_or(NoDocument)
    }

    pub fn page_count(&self) -> u32 {
        self.loaded().map_or(0, |doc| doc.pages.len() as u32)
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Bumped on every render pass so views know to rebuild their textures.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_enabled(&self, action: Action) -> bool {
        !action.needs_document() || self.is_loaded()
    }

    /// Empty/Loaded → Loaded with a fresh render of `path`.
    pub fn load(&mut self, path: PathBuf, pages: Vec<P>, thumbnails: Vec<P>) {
        self.status = format!("Loaded: {}", display_name(&path));
        self.document = DocumentState::Loaded(LoadedDocument { path, pages, thumbnails });
        self.generation += 1;
        self.scroll_target = Some(0);
    }

    /// Loaded → Loaded with the pages re-rendered from disk.
    pub fn refresh(&mut self, pages: Vec<P>, thumbnails: Vec<P>) -> Result<(), NoDocument> {
        let DocumentState::Loaded(doc) = &mut self.document else {
            return Err(NoDocument);
        };

        let last = pages.len().saturating_sub(1);
        doc.pages = pages;
        doc.thumbnails = thumbnails;
        self.generation += 1;
        self.scroll_target = self.scroll_target.map(|target| target.min(last));
        Ok(())
    }

    pub fn zoom_in(&mut self) -> bool {
        self.zoom.zoom_in()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.zoom.zoom_out()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Requests the main view to scroll to `index`; ignored when out of range.
    pub fn go_to_page(&mut self, index: usize) -> bool {
        if index < self.page_count() as usize {
            self.scroll_target = Some(index);
            true
        } else {
            false
        }
    }

    pub fn take_scroll_target(&mut self) -> Option<usize> {
        self.scroll_target.take()
    }

    /// Loaded → Empty.
    pub fn close(&mut self) {
        self.document = DocumentState::Empty;
        self.status = NO_FILE_STATUS.to_owned();
        self.generation += 1;
        self.scroll_target = None;
    }
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(pages: usize) -> ViewerState<u32> {
        let mut state = ViewerState::default();
        state.load(PathBuf::from("/docs/manual.pdf"), (0..pages as u32).collect(), vec![0; pages]);
        state
    }

    #[test]
    fn starts_empty_with_only_open_enabled() {
        let state: ViewerState<u32> = ViewerState::default();

        assert_eq!(state.status(), NO_FILE_STATUS);
        assert_eq!(state.current_path(), Err(NoDocument));
        for action in Action::TOOLBAR {
            assert_eq!(state.is_enabled(action), action == Action::Open, "{action:?}");
        }
    }

    #[test]
    fn load_installs_pages_and_status() {
        let state = loaded(3);

        assert_eq!(state.page_count(), 3);
        assert_eq!(state.status(), "Loaded: manual.pdf");
        assert_eq!(state.current_path(), Ok(Path::new("/docs/manual.pdf")));
        assert!(Action::TOOLBAR.iter().all(|&action| state.is_enabled(action)));
    }

    #[test]
    fn refresh_replaces_pages_wholesale() {
        let mut state = loaded(3);
        let before = state.generation();

        state.refresh(vec![7, 8], vec![0, 0]).expect("refresh should succeed");

        assert_eq!(state.loaded().map(|doc| doc.pages().to_vec()), Some(vec![7, 8]));
        assert_eq!(state.generation(), before + 1);
    }

    #[test]
    fn refresh_without_document_is_rejected() {
        let mut state: ViewerState<u32> = ViewerState::default();
        assert_eq!(state.refresh(vec![1], vec![1]), Err(NoDocument));
        assert_eq!(state.generation(), 0);
    }

    #[test]
    fn scroll_target_is_bounded_and_consumed_once() {
        let mut state = loaded(2);
        assert_eq!(state.take_scroll_target(), Some(0));

        assert!(!state.go_to_page(2));
        assert_eq!(state.take_scroll_target(), None);

        assert!(state.go_to_page(1));
        assert_eq!(state.take_scroll_target(), Some(1));
        assert_eq!(state.take_scroll_target(), None);
    }

    #[test]
    fn pending_scroll_is_clamped_when_pages_shrink() {
        let mut state = loaded(3);
        state.go_to_page(2);

        state.refresh(vec![1, 2], vec![1, 2]).expect("refresh should succeed");

        assert_eq!(state.take_scroll_target(), Some(1));
    }

    #[test]
    fn close_returns_to_empty() {
        let mut state = loaded(1);
        state.close();

        assert!(!state.is_loaded());
        assert_eq!(state.page_count(), 0);
        assert_eq!(state.status(), NO_FILE_STATUS);
    }
}
