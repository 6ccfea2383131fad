//! Logger setup for binaries and examples. The library itself only emits `log` records.
use crate::errors::GenexError;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;

/// Terminal logger. Returns `false` if a logger was already installed.
pub fn init_logger(level: LevelFilter) -> bool {
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .is_ok()
}

/// Terminal logger plus a copy of every record written to `log_file`.
pub fn init_logger_with_file(level: LevelFilter, log_file: &str) -> Result<bool, GenexError> {
    let loggers: Vec<Box<dyn SharedLogger>> = vec![
        TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(level, Config::default(), File::create(log_file)?),
    ];
    Ok(CombinedLogger::init(loggers).is_ok())
}
