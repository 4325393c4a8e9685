use anyhow::{anyhow, Context};
use log::info;
use pdf_editor::{logging, Editor, EditorConfig, PdfEditorApp, RasterBackend};

fn main() -> anyhow::Result<()> {
    let config = EditorConfig::from_env();
    logging::init(config.log_level).context("failed to initialize logging")?;

    let rasterizer = pdf_engine::default_rasterizer(config.raster_backend == RasterBackend::Native);
    let editor = Editor::new(config, rasterizer);
    info!("starting PDF Editor");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("PDF Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "PDF Editor",
        options,
        Box::new(|cc| Ok(Box::new(PdfEditorApp::new(cc, editor)))),
    )
    .map_err(|err| anyhow!("failed to run the editor window: {err}"))
}
