//! Toolbar PDF editor: configuration, logging, action controller and egui window.

pub mod config;
pub mod controller;
pub mod logging;
pub mod ui;

pub use config::{EditorConfig, RasterBackend};
pub use controller::{Editor, EditorError, EditorResult};
pub use ui::PdfEditorApp;
