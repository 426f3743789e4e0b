#![deny(missing_docs)]
//! Shared logging utilities for the story board workspace.
//!
//! This crate provides the `board_*` logging macros used across the codebase,
//! the logger initialization used by the binaries, and a minimal test
//! initializer for the global logger.

use std::ffi::OsString;
use std::fs::File;
use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Environment variable holding the log level (`error` .. `trace`).
pub const LEVEL_VAR: &str = "BOARD_LOG";

/// Environment variable naming a file that receives a copy of the log.
pub const FILE_VAR: &str = "BOARD_LOG_FILE";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! board_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! board_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! board_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! board_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! board_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone)]
pub enum LogDestination {
    /// Write to the terminal. Always stderr, so stdout stays free for program output.
    Terminal,
    /// Write to both the terminal and the given file, truncating it on start.
    Both(PathBuf),
}

/// Picks the destination from [`FILE_VAR`]: terminal only unless a file is named.
pub fn destination_from_env() -> LogDestination {
    destination_for(std::env::var_os(FILE_VAR))
}

fn destination_for(path: Option<OsString>) -> LogDestination {
    match path.filter(|path| !path.is_empty()) {
        Some(path) => LogDestination::Both(PathBuf::from(path)),
        None => LogDestination::Terminal,
    }
}

/// Reads the log level from [`LEVEL_VAR`], falling back to `Info` when unset or invalid.
pub fn level_from_env() -> LevelFilter {
    std::env::var(LEVEL_VAR)
        .ok()
        .and_then(|raw| parse_level(&raw))
        .unwrap_or(LevelFilter::Info)
}

fn parse_level(raw: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(raw.trim()).ok()
}

/// Initializes the global logger with the specified destination.
///
/// Safe to call more than once; later calls are ignored by the `log` facade.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::Terminal => vec![terminal_logger(level, config)],
        LogDestination::Both(path) => {
            let mut loggers: Vec<Box<dyn SharedLogger>> =
                vec![terminal_logger(level, config.clone())];
            if let Some(file_logger) = create_file_logger(path, level, config) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn terminal_logger(level: LevelFilter, config: Config) -> Box<TermLogger> {
    TermLogger::new(level, config, TerminalMode::Stderr, ColorChoice::Auto)
}

fn create_file_logger(
    path: PathBuf,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(&path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
