//! Platform logging initialization for token_tally.
//!
//! The terminal belongs to the UI, so logs only ever go to a file.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{CombinedLogger, Config, ConfigBuilder, SharedLogger, WriteLogger};

/// Destination for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to the given file, truncating it.
    File(PathBuf),
    /// Do not install a logger.
    Disabled,
}

/// Initialize the logger with the specified destination and level.
///
/// Must run before the terminal switches to the alternate screen: a file that
/// cannot be created is reported on stderr.
pub fn initialize(destination: &LogDestination, level: LevelFilter) {
    let LogDestination::File(path) = destination else {
        return;
    };
    if level == LevelFilter::Off {
        return;
    }

    let loggers: Vec<Box<dyn SharedLogger>> = match create_file_logger(path, level) {
        Some(file_logger) => vec![file_logger],
        None => return,
    };
    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(path: &Path, level: LevelFilter) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, build_config(), file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
