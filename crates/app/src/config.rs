//! Runtime configuration for the editor.
//!
//! Nothing is persisted: values come from defaults, optionally overridden by
//! environment variables at startup.

use log::LevelFilter;
use viewer_core::{Zoom, BASE_DPI, MAX_ZOOM, MIN_ZOOM};

pub const LOG_ENV: &str = "PDF_EDITOR_LOG";
pub const RASTERIZER_ENV: &str = "PDF_EDITOR_RASTERIZER";

/// Which renderer draws page bitmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterBackend {
    /// PDFium when it can be bound, placeholder pages otherwise.
    Native,
    Placeholder,
}

impl RasterBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pdfium" | "native" => Some(Self::Native),
            "placeholder" | "none" => Some(Self::Placeholder),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// DPI of the main view at 100% zoom
    pub base_dpi: f32,
    /// DPI of sidebar thumbnails
    pub thumbnail_dpi: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub log_level: LevelFilter,
    pub raster_backend: RasterBackend,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            base_dpi: BASE_DPI,
            thumbnail_dpi: 30.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            log_level: LevelFilter::Info,
            raster_backend: RasterBackend::Native,
        }
    }
}

impl EditorConfig {
    /// Defaults overridden by `PDF_EDITOR_LOG` and `PDF_EDITOR_RASTERIZER`.
    pub fn from_env() -> Self {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(level) = lookup(LOG_ENV).and_then(|value| value.trim().parse().ok()) {
            self.log_level = level;
        }
        if let Some(backend) = lookup(RASTERIZER_ENV).and_then(|value| RasterBackend::parse(&value))
        {
            self.raster_backend = backend;
        }
        self
    }

    pub fn initial_zoom(&self) -> Zoom {
        Zoom::with_bounds(self.min_zoom, self.max_zoom)
    }
}
