//! Document operations for the PDF editor.
//!
//! Every operation takes a path, opens the document, performs one change (or
//! none, for exports), persists the result and drops the document before
//! returning. Nothing is cached between calls.

mod document;
mod operations;
mod raster;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use document::{page_count, page_rotations};
pub use operations::{
    compress, convert_to_word, export_pages_as_images, remove_page, rotate, save_as,
    CompressReport, PageRemoval, EXPORT_DPI,
};
pub use raster::{default_rasterizer, PlaceholderRasterizer, Rasterizer};

#[cfg(feature = "pdfium")]
pub use raster::pdfium_backend::PdfiumRasterizer;

use image::{ImageBuffer, Rgba};

pub type RgbaImage = ImageBuffer<Rgba<u8>, Vec<u8>>;

/// PDF user space unit: 72 points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_pt: f32,
    pub height_pt: f32,
}

impl PageSize {
    pub const LETTER: PageSize = PageSize { width_pt: 612.0, height_pt: 792.0 };

    /// Pixel dimensions of this page at `dpi`, never smaller than 1x1.
    pub fn pixels_at(self, dpi: f32) -> (u32, u32) {
        let scale = dpi / POINTS_PER_INCH;
        let width = (self.width_pt * scale).round().max(1.0) as u32;
        let height = (self.height_pt * scale).round().max(1.0) as u32;
        (width, height)
    }

    /// Size as displayed after applying a page rotation.
    pub fn rotated(self, rotation: u32) -> Self {
        if rotation % 180 == 90 {
            Self { width_pt: self.height_pt, height_pt: self.width_pt }
        } else {
            self
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PdfEngineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF parse error: {0}")]
    Parse(#[from] lopdf::Error),
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("page {page} out of range (page_count={page_count})")]
    PageOutOfRange { page: u32, page_count: u32 },
    #[error("{0}")]
    Unsupported(&'static str),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("document is protected by a password")]
    PasswordRequired,
    #[error("cannot decrypt document: {0}")]
    Decryption(#[source] lopdf::Error),
}

pub type PdfEngineResult<T> = Result<T, PdfEngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_scale_with_dpi() {
        assert_eq!(PageSize::LETTER.pixels_at(72.0), (612, 792));
        assert_eq!(PageSize::LETTER.pixels_at(144.0), (1224, 1584));
    }

    #[test]
    fn degenerate_dpi_still_yields_a_pixel() {
        assert_eq!(PageSize::LETTER.pixels_at(0.0), (1, 1));
    }

    #[test]
    fn quarter_turns_swap_dimensions() {
        let size = PageSize { width_pt: 100.0, height_pt: 200.0 };
        assert_eq!(size.rotated(90), PageSize { width_pt: 200.0, height_pt: 100.0 });
        assert_eq!(size.rotated(180), size);
        assert_eq!(size.rotated(270), PageSize { width_pt: 200.0, height_pt: 100.0 });
    }

    #[test]
    fn unsupported_error_displays_reason() {
        let err = PdfEngineError::Unsupported("conversion to Word is not supported");
        assert_eq!(err.to_string(), "conversion to Word is not supported");
    }
}
