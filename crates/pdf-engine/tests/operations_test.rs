use pdf_engine::testing::{page_widths, sample_pdf, SampleOptions, BASE_WIDTH_PT};
use pdf_engine::{
    convert_to_word, export_pages_as_images, page_count, page_rotations, remove_page, rotate,
    PageRemoval, PdfEngineError, PlaceholderRasterizer,
};
use std::fs;
use std::path::PathBuf;

fn fixture(dir: &tempfile::TempDir, name: &str, pages: u32) -> PathBuf {
    let path = dir.path().join(name);
    sample_pdf(&path, SampleOptions::pages(pages)).expect("sample should be written");
    path
}

#[test]
fn removing_any_valid_index_drops_exactly_that_page() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    for index in 0..4u32 {
        let path = fixture(&temp, &format!("remove-{index}.pdf"), 4);
        let mut expected: Vec<i64> = (0..4).map(|n| BASE_WIDTH_PT + n).collect();
        expected.remove(index as usize);

        let outcome = remove_page(&path, index).expect("remove should succeed");

        assert_eq!(outcome, PageRemoval::Removed { remaining: 3 });
        assert_eq!(page_count(&path).expect("count should succeed"), 3);
        assert_eq!(page_widths(&path).expect("widths should load"), expected);
    }
}

#[test]
fn removing_outside_range_is_a_no_op() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let path = fixture(&temp, "doc.pdf", 3);
    let before = fs::read(&path).expect("fixture should be readable");

    for index in [3u32, 4, 100, u32::MAX] {
        let outcome = remove_page(&path, index).expect("remove should not fail");
        assert_eq!(outcome, PageRemoval::OutOfRange { page_count: 3 });
    }

    assert_eq!(fs::read(&path).expect("fixture should be readable"), before);
}

#[test]
fn rotating_twice_equals_rotating_by_the_sum() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    for degrees in [0, 90, 180, 270, 45, -90, 450] {
        let twice = fixture(&temp, &format!("twice-{degrees}.pdf"), 2);
        let once = fixture(&temp, &format!("once-{degrees}.pdf"), 2);

        rotate(&twice, degrees).expect("rotate should succeed");
        rotate(&twice, degrees).expect("rotate should succeed");
        rotate(&once, (2 * degrees).rem_euclid(360)).expect("rotate should succeed");

        assert_eq!(
            page_rotations(&twice).expect("rotations should load"),
            page_rotations(&once).expect("rotations should load"),
            "degrees = {degrees}"
        );
    }
}

#[test]
fn three_page_document_rotates_round_trip() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let path = fixture(&temp, "doc.pdf", 3);

    assert_eq!(rotate(&path, 90).expect("rotate should succeed"), 3);
    assert_eq!(page_rotations(&path).expect("rotations should load"), vec![90, 90, 90]);

    rotate(&path, 270).expect("rotate should succeed");
    assert_eq!(page_rotations(&path).expect("rotations should load"), vec![0, 0, 0]);
}

#[test]
fn export_numbers_files_from_one() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let path = fixture(&temp, "doc.pdf", 5);
    let out_dir = temp.path().join("jpg");

    let exported =
        export_pages_as_images(&path, &out_dir, &PlaceholderRasterizer).expect("export should succeed");

    assert_eq!(exported, 5);
    let mut names: Vec<String> = fs::read_dir(&out_dir)
        .expect("output dir should list")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["page_1.jpg", "page_2.jpg", "page_3.jpg", "page_4.jpg", "page_5.jpg"]);
}

#[test]
fn word_conversion_fails_even_for_missing_input() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    let err = convert_to_word(&temp.path().join("nope.pdf"), &temp.path().join("nope.docx"))
        .expect_err("conversion must fail");

    assert!(matches!(err, PdfEngineError::Unsupported(_)));
    assert!(err.to_string().contains("not supported"));
}

#[test]
fn failed_write_keeps_original_intact() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let path = fixture(&temp, "doc.pdf", 2);
    let missing_dir = temp.path().join("does-not-exist").join("out.pdf");

    let err = pdf_engine::save_as(&path, &missing_dir).expect_err("save should fail");

    assert!(matches!(err, PdfEngineError::Io(_)));
    assert_eq!(page_count(&path).expect("original should still load"), 2);
}
