use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Installs the global stderr logger, limited to records from the editor crates.
pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let config = ConfigBuilder::new()
        .add_filter_allow_str("pdf_editor")
        .add_filter_allow_str("pdf_engine")
        .add_filter_allow_str("viewer_core")
        .set_time_format_rfc3339()
        .build();

    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)
}
