use crate::{PageSize, PdfEngineResult};
use log::debug;
use lopdf::{Document, Object, ObjectId};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Guards against cyclic `/Parent` chains in malformed page trees.
const MAX_TREE_DEPTH: usize = 64;

pub(crate) fn load(path: &Path) -> PdfEngineResult<Document> {
    let bytes = fs::read(path)?;
    let doc = Document::load_mem(&bytes)?;
    debug!("loaded {} ({} bytes, {} pages)", path.display(), bytes.len(), doc.get_pages().len());
    Ok(doc)
}

/// Serializes `doc` next to `dest` and renames it into place, so a failed
/// write never leaves a truncated file behind.
pub(crate) fn write_atomically(doc: &mut Document, dest: &Path) -> PdfEngineResult<()> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        doc.save_to(&mut writer)?;
        writer.flush()?;
    }

    if let Ok(existing) = fs::metadata(dest) {
        staged.as_file().set_permissions(existing.permissions())?;
    }
    staged.as_file().sync_all()?;
    staged.persist(dest).map_err(|err| err.error)?;

    debug!("wrote {}", dest.display());
    Ok(())
}

pub(crate) fn normalize_rotation(degrees: i64) -> u32 {
    degrees.rem_euclid(360) as u32
}

/// Looks up `key` on the page or the nearest ancestor that defines it.
fn inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = page_id;

    for _ in 0..MAX_TREE_DEPTH {
        let dict = doc.get_dictionary(current).ok()?;
        if let Ok(value) = dict.get(key) {
            return match value.as_reference() {
                Ok(id) => doc.get_object(id).ok(),
                Err(_) => Some(value),
            };
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
    }

    None
}

pub(crate) fn page_rotation(doc: &Document, page_id: ObjectId) -> u32 {
    let degrees = match inherited(doc, page_id, b"Rotate") {
        Some(Object::Integer(value)) => *value,
        Some(Object::Real(value)) => *value as i64,
        _ => 0,
    };

    normalize_rotation(degrees)
}

pub(crate) fn set_page_rotation(
    doc: &mut Document,
    page_id: ObjectId,
    rotation: u32,
) -> PdfEngineResult<()> {
    let dict = doc.get_object_mut(page_id)?.as_dict_mut()?;
    dict.set("Rotate", Object::Integer(i64::from(rotation)));
    Ok(())
}

pub(crate) fn page_size(doc: &Document, page_id: ObjectId) -> PageSize {
    inherited(doc, page_id, b"MediaBox")
        .and_then(|obj| obj.as_array().ok())
        .and_then(|array| {
            if array.len() != 4 {
                return None;
            }
            let x0 = array[0].as_float().ok()?;
            let y0 = array[1].as_float().ok()?;
            let x1 = array[2].as_float().ok()?;
            let y1 = array[3].as_float().ok()?;
            Some(PageSize { width_pt: (x1 - x0).abs(), height_pt: (y1 - y0).abs() })
        })
        .unwrap_or(PageSize::LETTER)
}

/// Number of pages in the document at `path`.
pub fn page_count(path: &Path) -> PdfEngineResult<u32> {
    Ok(load(path)?.get_pages().len() as u32)
}

/// Effective rotation of every page, in page order.
pub fn page_rotations(path: &Path) -> PdfEngineResult<Vec<u32>> {
    let doc = load(path)?;
    Ok(doc.get_pages().values().map(|&id| page_rotation(&doc, id)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_pdf, SampleOptions};

    #[test]
    fn normalizes_negative_and_large_rotations() {
        assert_eq!(normalize_rotation(-90), 270);
        assert_eq!(normalize_rotation(450), 90);
        assert_eq!(normalize_rotation(720), 0);
    }

    #[test]
    fn rotation_is_inherited_from_page_tree() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let path = temp.path().join("inherited.pdf");
        sample_pdf(&path, SampleOptions { pages: 2, inherited_rotation: Some(180) })
            .expect("sample should be written");

        assert_eq!(page_rotations(&path).expect("rotations should load"), vec![180, 180]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let err = page_count(&temp.path().join("missing.pdf")).expect_err("load should fail");
        assert!(matches!(err, crate::PdfEngineError::Io(_)));
    }

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let path = temp.path().join("invalid.pdf");
        fs::write(&path, b"definitely not a pdf").expect("fixture should be written");

        let err = page_count(&path).expect_err("load should fail");
        assert!(matches!(err, crate::PdfEngineError::Parse(_)));
    }

    #[test]
    fn atomic_write_replaces_existing_file() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let path = temp.path().join("doc.pdf");
        sample_pdf(&path, SampleOptions::pages(3)).expect("sample should be written");

        let mut doc = load(&path).expect("load should succeed");
        doc.delete_pages(&[1]);
        write_atomically(&mut doc, &path).expect("write should succeed");

        assert_eq!(page_count(&path).expect("count should succeed"), 2);
        let leftovers = fs::read_dir(temp.path()).expect("dir should list").count();
        assert_eq!(leftovers, 1, "no staging files should remain");
    }
}
