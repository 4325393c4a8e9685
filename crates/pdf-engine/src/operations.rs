use crate::document::{load, normalize_rotation, page_rotation, set_page_rotation, write_atomically};
use crate::raster::Rasterizer;
use crate::{PdfEngineError, PdfEngineResult};
use image::{DynamicImage, ImageFormat};
use log::{debug, info};
use lopdf::encryption::DecryptionError;
use lopdf::Document;
use std::fs;
use std::path::Path;

/// Resolution used when exporting pages as images.
pub const EXPORT_DPI: f32 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRemoval {
    Removed { remaining: u32 },
    /// The index was outside `[0, page_count)`; the file was not touched.
    OutOfRange { page_count: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressReport {
    pub input_bytes: u64,
    pub output_bytes: u64,
}

impl CompressReport {
    pub fn saved_bytes(&self) -> i64 {
        self.input_bytes as i64 - self.output_bytes as i64
    }
}

/// Deletes the page at zero-based `index` and overwrites `path` in place.
pub fn remove_page(path: &Path, index: u32) -> PdfEngineResult<PageRemoval> {
    let mut doc = load(path)?;
    let page_count = doc.get_pages().len() as u32;

    if index >= page_count {
        debug!("remove_page: index {index} out of range for {page_count} pages, skipping");
        return Ok(PageRemoval::OutOfRange { page_count });
    }

    // lopdf numbers pages from 1.
    doc.delete_pages(&[index + 1]);
    doc.prune_objects();
    write_atomically(&mut doc, path)?;

    let remaining = page_count - 1;
    info!("removed page {} from {} ({remaining} left)", index + 1, path.display());
    Ok(PageRemoval::Removed { remaining })
}

/// Adds `degrees` to every page's rotation and overwrites `path` in place.
pub fn rotate(path: &Path, degrees: i32) -> PdfEngineResult<u32> {
    let mut doc = load(path)?;
    let page_ids: Vec<_> = doc.get_pages().into_values().collect();

    for &page_id in &page_ids {
        let current = page_rotation(&doc, page_id);
        let rotation = normalize_rotation(i64::from(current) + i64::from(degrees));
        set_page_rotation(&mut doc, page_id, rotation)?;
    }

    write_atomically(&mut doc, path)?;
    info!("rotated {} pages of {} by {degrees}°", page_ids.len(), path.display());
    Ok(page_ids.len() as u32)
}

/// Removes encryption and unreferenced objects, then re-serializes.
///
/// Encrypted documents are decrypted with the empty user password first;
/// ones that need a real password are rejected. Streams are otherwise written
/// back as they were, so the size reduction depends on how much garbage the
/// input carried.
pub fn compress(path: &Path, output: &Path) -> PdfEngineResult<CompressReport> {
    let input_bytes = fs::metadata(path)?.len();
    let mut doc = load(path)?;

    if strip_security(&mut doc)? {
        debug!("compress: decrypted {}", path.display());
    }
    let pruned = doc.prune_objects();
    write_atomically(&mut doc, output)?;

    let output_bytes = fs::metadata(output)?.len();
    info!(
        "compressed {} -> {} ({input_bytes} -> {output_bytes} bytes, {} objects pruned)",
        path.display(),
        output.display(),
        pruned.len()
    );
    Ok(CompressReport { input_bytes, output_bytes })
}

/// Decrypts every string and stream in place; lopdf drops `/Encrypt` afterwards.
fn strip_security(doc: &mut Document) -> PdfEngineResult<bool> {
    if !doc.is_encrypted() {
        return Ok(false);
    }

    doc.decrypt("").map_err(|err| match err {
        lopdf::Error::Decryption(DecryptionError::IncorrectPassword) => {
            PdfEngineError::PasswordRequired
        }
        err => PdfEngineError::Decryption(err),
    })?;
    Ok(true)
}

/// Writes `page_<n>.jpg` for every page into `output_dir`, `n` starting at 1.
pub fn export_pages_as_images(
    path: &Path,
    output_dir: &Path,
    rasterizer: &dyn Rasterizer,
) -> PdfEngineResult<u32> {
    let pages = rasterizer.render_pages(path, EXPORT_DPI)?;
    let count = pages.len() as u32;
    fs::create_dir_all(output_dir)?;

    for (index, page) in pages.into_iter().enumerate() {
        let target = output_dir.join(format!("page_{}.jpg", index + 1));
        // JPEG has no alpha channel.
        DynamicImage::ImageRgba8(page).to_rgb8().save_with_format(&target, ImageFormat::Jpeg)?;
        debug!("exported {}", target.display());
    }

    info!("exported {count} pages of {} to {}", path.display(), output_dir.display());
    Ok(count)
}

/// Re-serializes the document unmodified to `output`.
pub fn save_as(path: &Path, output: &Path) -> PdfEngineResult<()> {
    let mut doc = load(path)?;
    write_atomically(&mut doc, output)?;
    info!("saved {} to {}", path.display(), output.display());
    Ok(())
}

/// Word export is a declared non-capability of this editor.
pub fn convert_to_word(_path: &Path, _output: &Path) -> PdfEngineResult<()> {
    Err(PdfEngineError::Unsupported("conversion to Word is not supported"))
}
