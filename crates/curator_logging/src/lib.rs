#![deny(missing_docs)]
//! Shared logging utilities for the curator workspace.
//!
//! This crate provides the `curator_*` logging macros used across the codebase,
//! the logger initializer used by the command-line driver, and a minimal test
//! initializer for the global logger.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Default log file, relative to the current working directory.
pub const DEFAULT_LOG_FILE: &str = "./curator.log";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! curator_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! curator_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! curator_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! curator_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! curator_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to the log file only.
    File,
    /// Write to stderr, keeping stdout free for command output.
    Terminal,
    /// Write to both the log file and the terminal.
    Both,
}

/// Initialize the global logger.
///
/// For `LogDestination::File` or `Both`, `log_file` is truncated and written
/// to; when it cannot be created a warning goes to stderr and the remaining
/// destinations are still installed. Calling this twice is harmless, the
/// second call is ignored by the facade.
pub fn initialize(destination: LogDestination, level: LevelFilter, log_file: Option<&Path>) {
    let config = build_config();
    let log_path = log_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::File => match create_file_logger(level, config, &log_path) {
            Some(file_logger) => vec![file_logger],
            None => return,
        },
        LogDestination::Terminal => vec![terminal_logger(level, config)],
        LogDestination::Both => {
            let mut loggers = vec![terminal_logger(level, config.clone())];
            if let Some(file_logger) = create_file_logger(level, config, &log_path) {
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

fn terminal_logger(level: LevelFilter, config: Config) -> Box<dyn SharedLogger> {
    TermLogger::new(level, config, TerminalMode::Stderr, ColorChoice::Auto)
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    log_path: &Path,
) -> Option<Box<dyn SharedLogger>> {
    match File::create(log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}
