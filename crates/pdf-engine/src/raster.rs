use crate::document::{load, page_rotation, page_size};
use crate::{PdfEngineResult, RgbaImage, POINTS_PER_INCH};
use image::Rgba;
use log::debug;
use std::path::Path;

/// Turns every page of a document into a bitmap at a given resolution.
pub trait Rasterizer {
    fn name(&self) -> &'static str;

    /// Renders all pages in page order. The result length equals the page count.
    fn render_pages(&self, path: &Path, dpi: f32) -> PdfEngineResult<Vec<RgbaImage>>;
}

fn sane_dpi(dpi: f32) -> f32 {
    if dpi.is_finite() && dpi > 0.0 {
        dpi
    } else {
        POINTS_PER_INCH
    }
}

/// Draws blank, correctly sized pages without a native renderer.
///
/// Dimensions follow the MediaBox and the effective rotation, so layout and
/// rotation stay observable even when PDFium is unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderRasterizer;

impl Rasterizer for PlaceholderRasterizer {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    fn render_pages(&self, path: &Path, dpi: f32) -> PdfEngineResult<Vec<RgbaImage>> {
        let dpi = sane_dpi(dpi);
        let doc = load(path)?;
        let pages = doc.get_pages();
        let mut images = Vec::with_capacity(pages.len());

        for &page_id in pages.values() {
            let size = page_size(&doc, page_id).rotated(page_rotation(&doc, page_id));
            let (width, height) = size.pixels_at(dpi);
            let mut image = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));

            if width >= 4 && height >= 4 {
                for x in 0..width {
                    image.put_pixel(x, 0, Rgba([220, 220, 220, 255]));
                    image.put_pixel(x, height - 1, Rgba([220, 220, 220, 255]));
                }
                for y in 0..height {
                    image.put_pixel(0, y, Rgba([220, 220, 220, 255]));
                    image.put_pixel(width - 1, y, Rgba([220, 220, 220, 255]));
                }
            }

            images.push(image);
        }

        debug!("placeholder rendered {} pages at {dpi} dpi", images.len());
        Ok(images)
    }
}

#[cfg(feature = "pdfium")]
pub mod pdfium_backend {
    use super::*;
    use crate::PdfEngineError;
    use pdfium_render::prelude::*;

    pub struct PdfiumRasterizer {
        pdfium: Pdfium,
    }

    impl PdfiumRasterizer {
        /// Binds PDFium from the executable directory, then the working
        /// directory, then the system library paths.
        pub fn bind() -> PdfEngineResult<Self> {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()));

            if let Some(ref dir) = exe_dir {
                if let Ok(bindings) =
                    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
                {
                    return Ok(Self { pdfium: Pdfium::new(bindings) });
                }
            }

            let bindings =
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                    .or_else(|_| Pdfium::bind_to_system_library())
                    .map_err(|err| {
                        PdfEngineError::Backend(format!("failed to bind pdfium library: {err}"))
                    })?;

            Ok(Self { pdfium: Pdfium::new(bindings) })
        }
    }

    impl Rasterizer for PdfiumRasterizer {
        fn name(&self) -> &'static str {
            "pdfium"
        }

        fn render_pages(&self, path: &Path, dpi: f32) -> PdfEngineResult<Vec<RgbaImage>> {
            let dpi = sane_dpi(dpi);
            let document = self
                .pdfium
                .load_pdf_from_file(path, None)
                .map_err(|err| PdfEngineError::Backend(err.to_string()))?;

            let config = PdfRenderConfig::new().scale_page_by_factor(dpi / POINTS_PER_INCH);
            let mut images = Vec::with_capacity(document.pages().len() as usize);

            for (index, page) in document.pages().iter().enumerate() {
                let bitmap = page
                    .render_with_config(&config)
                    .map_err(|err| PdfEngineError::Backend(err.to_string()))?;
                let width = bitmap.width() as u32;
                let height = bitmap.height() as u32;

                let image = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes().to_vec())
                    .ok_or_else(|| {
                        PdfEngineError::Backend(format!(
                            "page {} bitmap does not match {width}x{height}",
                            index + 1
                        ))
                    })?;
                images.push(image);
            }

            debug!("pdfium rendered {} pages at {dpi} dpi", images.len());
            Ok(images)
        }
    }
}

/// Picks the native renderer when asked for and available, otherwise the
/// placeholder.
pub fn default_rasterizer(prefer_native: bool) -> Box<dyn Rasterizer> {
    #[cfg(feature = "pdfium")]
    {
        if prefer_native {
            match pdfium_backend::PdfiumRasterizer::bind() {
                Ok(native) => return Box::new(native),
                Err(err) => log::warn!("{err}; falling back to placeholder pages"),
            }
        }
    }

    #[cfg(not(feature = "pdfium"))]
    let _ = prefer_native;

    Box::new(PlaceholderRasterizer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_pdf, SampleOptions, BASE_WIDTH_PT, HEIGHT_PT};

    #[test]
    fn renders_one_image_per_page_at_requested_dpi() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let path = temp.path().join("doc.pdf");
        sample_pdf(&path, SampleOptions::pages(3)).expect("sample should be written");

        let pages = PlaceholderRasterizer.render_pages(&path, 72.0).expect("render should succeed");

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].dimensions(), (BASE_WIDTH_PT as u32, HEIGHT_PT as u32));
        assert_eq!(pages[2].dimensions(), (BASE_WIDTH_PT as u32 + 2, HEIGHT_PT as u32));
    }

    #[test]
    fn rotated_pages_render_landscape() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let path = temp.path().join("doc.pdf");
        sample_pdf(&path, SampleOptions { pages: 1, inherited_rotation: Some(90) })
            .expect("sample should be written");

        let pages = PlaceholderRasterizer.render_pages(&path, 72.0).expect("render should succeed");

        assert_eq!(pages[0].dimensions(), (HEIGHT_PT as u32, BASE_WIDTH_PT as u32));
    }

    #[test]
    fn non_positive_dpi_falls_back_to_native_scale() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let path = temp.path().join("doc.pdf");
        sample_pdf(&path, SampleOptions::pages(1)).expect("sample should be written");

        let pages = PlaceholderRasterizer.render_pages(&path, -5.0).expect("render should succeed");

        assert_eq!(pages[0].dimensions(), (BASE_WIDTH_PT as u32, HEIGHT_PT as u32));
    }

    #[test]
    fn placeholder_is_chosen_when_native_not_requested() {
        assert_eq!(default_rasterizer(false).name(), "placeholder");
    }
}
