use std::path::{Path, PathBuf};

/// Returns `path` if its file name already ends with `.ext` (any case),
/// otherwise the same path with `.ext` appended to the file name.
pub fn ensure_extension(path: &Path, ext: &str) -> PathBuf {
    let suffix = format!(".{}", ext.to_lowercase());
    let name = path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();

    if name.to_lowercase().ends_with(&suffix) {
        return path.to_path_buf();
    }

    let mut appended = path.as_os_str().to_os_string();
    appended.push(".");
    appended.push(ext);
    PathBuf::from(appended)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    extension: String,
    description: String,
}

impl ExtensionFilter {
    pub fn new(extension: &str, description: &str) -> Self {
        Self { extension: extension.to_lowercase(), description: description.to_owned() }
    }

    /// Directories always pass so the picker can navigate into them.
    pub fn accept(&self, entry: &Path) -> bool {
        entry.is_dir() || self.matches_name(entry)
    }

    pub fn matches_name(&self, entry: &Path) -> bool {
        entry
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .is_some_and(|name| name.ends_with(&format!(".{}", self.extension)))
    }

    pub fn label(&self) -> String {
        format!("{} (*.{})", self.description, self.extension)
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

pub const PDF_EXTENSION: &str = "pdf";

pub fn pdf_filter() -> ExtensionFilter {
    ExtensionFilter::new(PDF_EXTENSION, "PDF Files")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_missing_extension() {
        assert_eq!(ensure_extension(Path::new("report"), "pdf"), PathBuf::from("report.pdf"));
        assert_eq!(
            ensure_extension(Path::new("/tmp/out/report"), "pdf"),
            PathBuf::from("/tmp/out/report.pdf")
        );
    }

    #[test]
    fn keeps_existing_extension_regardless_of_case() {
        assert_eq!(ensure_extension(Path::new("report.PDF"), "pdf"), PathBuf::from("report.PDF"));
        assert_eq!(ensure_extension(Path::new("report.pdf"), "PDF"), PathBuf::from("report.pdf"));
    }

    #[test]
    fn other_extensions_are_extended_not_replaced() {
        assert_eq!(
            ensure_extension(Path::new("scan.final.txt"), "pdf"),
            PathBuf::from("scan.final.txt.pdf")
        );
    }

    #[test]
    fn filter_accepts_directories_and_matching_files() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let filter = pdf_filter();

        assert!(filter.accept(temp.path()));
        assert!(filter.accept(Path::new("Manual.Pdf")));
        assert!(!filter.accept(Path::new("notes.txt")));
        assert!(!filter.accept(Path::new("pdf")));
    }

    #[test]
    fn filter_label_lists_pattern() {
        assert_eq!(pdf_filter().label(), "PDF Files (*.pdf)");
        assert_eq!(ExtensionFilter::new("JPG", "Images").label(), "Images (*.jpg)");
    }
}
