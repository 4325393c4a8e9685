//! UI-independent viewer logic: file name helpers, zoom, prompt parsing and
//! the one-document state machine the window drives.

pub mod files;
pub mod input;
pub mod state;
pub mod zoom;

pub use files::{ensure_extension, pdf_filter, ExtensionFilter, PDF_EXTENSION};
pub use input::{parse_page_number, InputError, RotationChoice};
pub use state::{display_name, Action, LoadedDocument, NoDocument, ViewerState};
pub use zoom::{Zoom, BASE_DPI, MAX_ZOOM, MIN_ZOOM, ZOOM_IN_STEP, ZOOM_OUT_STEP};
