//! Wires toolbar actions to document operations.
//!
//! Every action runs synchronously: validate input, call the engine, then
//! re-render the whole document from disk so the view always matches the file.

use crate::config::EditorConfig;
use log::{info, warn};
use pdf_engine::{
    CompressReport, PageRemoval, PdfEngineError, Rasterizer, RgbaImage,
};
use std::path::{Path, PathBuf};
use viewer_core::{
    display_name, ensure_extension, parse_page_number, InputError, NoDocument, RotationChoice,
    ViewerState, PDF_EXTENSION,
};

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    NoDocument(#[from] NoDocument),
    #[error("Invalid page number: {0}")]
    Input(#[from] InputError),
    #[error("Failed to load PDF: {0}")]
    Load(#[source] PdfEngineError),
    #[error("Failed to {action}: {source}")]
    Operation {
        action: &'static str,
        #[source]
        source: PdfEngineError,
    },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: PdfEngineError,
    },
    #[error("{0}")]
    Unsupported(#[source] PdfEngineError),
}

impl EditorError {
    pub fn title(&self) -> &'static str {
        match self {
            EditorError::Unsupported(_) => "Not Supported",
            EditorError::Input(_) => "Invalid Input",
            _ => "Error",
        }
    }

    fn operation(action: &'static str, source: PdfEngineError) -> Self {
        match source {
            PdfEngineError::Unsupported(_) => EditorError::Unsupported(source),
            source => EditorError::Operation { action, source },
        }
    }

    /// I/O failures against a chosen destination are reported as write errors.
    fn output(action: &'static str, path: &Path, source: PdfEngineError) -> Self {
        match source {
            PdfEngineError::Io(_) => EditorError::Write { path: path.to_path_buf(), source },
            source => Self::operation(action, source),
        }
    }
}

pub type EditorResult<T> = Result<T, EditorError>;

pub struct Editor {
    state: ViewerState<RgbaImage>,
    rasterizer: Box<dyn Rasterizer>,
    config: EditorConfig,
}

impl Editor {
    pub fn new(config: EditorConfig, rasterizer: Box<dyn Rasterizer>) -> Self {
        info!("editor using {} rasterizer", rasterizer.name());
        Self { state: ViewerState::new(config.initial_zoom()), rasterizer, config }
    }

    pub fn state(&self) -> &ViewerState<RgbaImage> {
        &self.state
    }

    pub fn rasterizer_name(&self) -> &'static str {
        self.rasterizer.name()
    }

    fn render(&self, path: &Path) -> Result<(Vec<RgbaImage>, Vec<RgbaImage>), PdfEngineError> {
        let dpi = self.state.zoom().effective_dpi(self.config.base_dpi);
        let pages = self.rasterizer.render_pages(path, dpi)?;
        let thumbnails = self.rasterizer.render_pages(path, self.config.thumbnail_dpi)?;
        Ok((pages, thumbnails))
    }

    fn current_path(&self) -> EditorResult<PathBuf> {
        Ok(self.state.current_path()?.to_path_buf())
    }

    fn rerender(&mut self) -> EditorResult<()> {
        let path = self.current_path()?;
        let (pages, thumbnails) = self.render(&path).map_err(EditorError::Load)?;
        self.state.refresh(pages, thumbnails)?;
        Ok(())
    }

    /// Re-renders after the file was rewritten. On failure the old pages no
    /// longer match the file, so the document is closed.
    fn rerender_after_write(&mut self) -> EditorResult<()> {
        if let Err(err) = self.rerender() {
            warn!("closing document after failed re-render: {err}");
            self.state.close();
            return Err(err);
        }
        Ok(())
    }

    /// Opens `path`, replacing the current document only if it renders.
    pub fn open(&mut self, path: PathBuf) -> EditorResult<()> {
        let (pages, thumbnails) = self.render(&path).map_err(EditorError::Load)?;
        info!("opened {} ({} pages)", path.display(), pages.len());
        self.state.load(path, pages, thumbnails);
        Ok(())
    }

    /// Removes the page named by the user's one-based `input`.
    pub fn remove_page_from_input(&mut self, input: &str) -> EditorResult<u32> {
        let path = self.current_path()?;
        let index = parse_page_number(input, self.state.page_count())?;

        match pdf_engine::remove_page(&path, index)
            .map_err(|err| EditorError::operation("remove page", err))?
        {
            PageRemoval::Removed { .. } => {}
            // The file changed on disk since the last render.
            PageRemoval::OutOfRange { page_count } => {
                self.rerender_after_write()?;
                return Err(InputError::PageOutOfRange { page: i64::from(index) + 1, page_count }
                    .into());
            }
        }

        self.rerender_after_write()?;
        let page = index + 1;
        self.state.set_status(format!("Page {page} removed from {}", display_name(&path)));
        Ok(page)
    }

    pub fn rotate(&mut self, choice: RotationChoice) -> EditorResult<()> {
        self.rotate_by(choice.degrees())
    }

    pub fn rotate_by(&mut self, degrees: i32) -> EditorResult<()> {
        let path = self.current_path()?;
        pdf_engine::rotate(&path, degrees)
            .map_err(|err| EditorError::operation("rotate PDF", err))?;

        self.rerender_after_write()?;
        self.state.set_status(format!("PDF rotated by {degrees}°"));
        Ok(())
    }

    /// Zooms in; re-renders only when a document is open and the factor moved.
    pub fn zoom_in(&mut self) -> EditorResult<()> {
        if self.state.zoom_in() && self.state.is_loaded() {
            self.rerender()?;
        }
        Ok(())
    }

    pub fn zoom_out(&mut self) -> EditorResult<()> {
        if self.state.zoom_out() && self.state.is_loaded() {
            self.rerender()?;
        }
        Ok(())
    }

    /// Writes the current document to `dest`, forcing a `.pdf` extension.
    /// The open document stays the same file.
    pub fn save_to(&mut self, dest: &Path) -> EditorResult<PathBuf> {
        let path = self.current_path()?;
        let dest = ensure_extension(dest, PDF_EXTENSION);

        pdf_engine::save_as(&path, &dest)
            .map_err(|err| EditorError::output("save PDF", &dest, err))?;

        self.state.set_status(format!("Saved to: {}", display_name(&dest)));
        Ok(dest)
    }

    pub fn compress_to(&mut self, dest: &Path) -> EditorResult<CompressReport> {
        let path = self.current_path()?;
        let dest = ensure_extension(dest, PDF_EXTENSION);

        let report = pdf_engine::compress(&path, &dest)
            .map_err(|err| EditorError::output("compress PDF", &dest, err))?;

        self.state.set_status(format!(
            "Compressed to: {} ({} KB saved)",
            display_name(&dest),
            report.saved_bytes() / 1024
        ));
        Ok(report)
    }

    pub fn export_images_to(&mut self, dir: &Path) -> EditorResult<u32> {
        let path = self.current_path()?;

        let count = pdf_engine::export_pages_as_images(&path, dir, self.rasterizer.as_ref())
            .map_err(|err| EditorError::output("export pages", dir, err))?;

        self.state.set_status(format!("Exported {count} pages to {}", dir.display()));
        Ok(count)
    }

    /// Always fails: Word output is not something this editor produces.
    pub fn convert_to_word(&mut self, dest: &Path) -> EditorResult<()> {
        let source = self.state.current_path().map(Path::to_path_buf).unwrap_or_default();
        pdf_engine::convert_to_word(&source, dest)
            .map_err(|err| EditorError::operation("convert to Word", err))
    }

    pub fn go_to_page(&mut self, index: usize) -> bool {
        self.state.go_to_page(index)
    }

    pub fn take_scroll_target(&mut self) -> Option<usize> {
        self.state.take_scroll_target()
    }
}
