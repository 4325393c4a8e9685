//! Fixture builders for tests.
//!
//! Page `n` (zero-based) gets a MediaBox width of `BASE_WIDTH_PT + n`, so tests
//! can tell which pages survived a removal by looking at page sizes.

use crate::{PdfEngineError, PdfEngineResult};
use lopdf::{dictionary, encryption, Dictionary, Document, Object, Stream, StringFormat};
use std::path::Path;

pub const BASE_WIDTH_PT: i64 = 600;
pub const HEIGHT_PT: i64 = 800;

#[derive(Debug, Clone, Copy, Default)]
pub struct SampleOptions {
    pub pages: u32,
    /// `/Rotate` set on the root `/Pages` node instead of on each page.
    pub inherited_rotation: Option<i64>,
}

impl SampleOptions {
    pub fn pages(pages: u32) -> Self {
        Self { pages, inherited_rotation: None }
    }
}

/// Writes a minimal PDF with blank pages to `path`.
pub fn sample_pdf(path: &Path, options: SampleOptions) -> PdfEngineResult<()> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::with_capacity(options.pages as usize);
    for index in 0..options.pages {
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(BASE_WIDTH_PT + i64::from(index)),
                Object::Integer(HEIGHT_PT),
            ],
        });
        kids.push(Object::Reference(page_id));
    }

    let mut pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(i64::from(options.pages)),
    };
    if let Some(rotation) = options.inherited_rotation {
        pages.set("Rotate", Object::Integer(rotation));
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path)?;
    Ok(())
}

/// Page widths in page order, as produced by [`sample_pdf`].
pub fn page_widths(path: &Path) -> PdfEngineResult<Vec<i64>> {
    let doc = crate::document::load(path)?;
    Ok(doc
        .get_pages()
        .values()
        .map(|&id| crate::document::page_size(&doc, id).width_pt.round() as i64)
        .collect())
}

/// Writes a one-page document whose content stream is RC4-40 encrypted
/// (standard security handler, revision 2).
///
/// With `require_password` the `/U` entry does not match the empty user
/// password, so opening it needs a password this crate never has.
pub fn encrypted_sample_pdf(
    path: &Path,
    content: &[u8],
    require_password: bool,
) -> PdfEngineResult<()> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.to_vec()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(BASE_WIDTH_PT),
            Object::Integer(HEIGHT_PT),
        ],
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => Object::Integer(1),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });

    let mut security = dictionary! {
        "Filter" => "Standard",
        "V" => Object::Integer(1),
        "R" => Object::Integer(2),
        "Length" => Object::Integer(40),
        "O" => Object::String(vec![0x4f; 32], StringFormat::Hexadecimal),
        "P" => Object::Integer(-4),
    };
    if require_password {
        security.set("U", Object::String(vec![0xaa; 32], StringFormat::Hexadecimal));
    }
    let security_id = doc.add_object(security);

    let file_id = Object::String(vec![0x17; 16], StringFormat::Hexadecimal);
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Encrypt", security_id);
    doc.trailer.set("ID", vec![file_id.clone(), file_id]);

    // RC4 is symmetric, so the per-object decryption also encrypts.
    let key = encryption::get_encryption_key(&doc, "", false).map_err(lopdf::Error::from)?;
    let plain = doc.get_object(content_id)?;
    let cipher = encryption::decrypt_object(&key, content_id, plain).map_err(lopdf::Error::from)?;
    doc.get_object_mut(content_id)?.as_stream_mut()?.set_content(cipher);

    doc.save(path)?;
    Ok(())
}

/// Raw content stream bytes of the first page.
pub fn first_page_content(path: &Path) -> PdfEngineResult<Vec<u8>> {
    let doc = crate::document::load(path)?;
    let page_id = doc
        .get_pages()
        .get(&1)
        .copied()
        .ok_or(PdfEngineError::PageOutOfRange { page: 1, page_count: 0 })?;
    Ok(doc.get_page_content(page_id)?)
}
