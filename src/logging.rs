//! Action log sink.
//!
//! Per-file outcomes are emitted through the `log` macros and appended to a
//! plain-text file, one `timestamp:LEVEL:message` line per record. Records
//! from other crates (the PDF parser in particular) are filtered out.

use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// `strftime` pattern for the timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Errors raised while setting up the action log.
#[derive(Debug)]
pub enum LogInitError {
    /// The log file could not be opened for appending.
    OpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A global logger is already installed.
    AlreadyInitialized(String),
}

impl std::fmt::Display for LogInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenFailed { path, source } => {
                write!(f, "Failed to open log file {}: {}", path.display(), source)
            }
            Self::AlreadyInitialized(reason) => {
                write!(f, "Logger already initialized: {}", reason)
            }
        }
    }
}

impl std::error::Error for LogInitError {}

/// Formats one action log line.
///
/// # Examples
///
/// ```
/// use dirsort::logging::format_line;
///
/// assert_eq!(
///     format_line("2024-01-02 03:04:05,006", log::Level::Info, "No category found for a.csv, left in place."),
///     "2024-01-02 03:04:05,006:INFO:No category found for a.csv, left in place."
/// );
/// ```
pub fn format_line(timestamp: &str, level: log::Level, message: &str) -> String {
    format!("{}:{}:{}", timestamp, level, message)
}

/// Installs the global logger, appending to `log_file`.
///
/// The file is created if missing and never truncated.
pub fn init_action_log(log_file: &Path, level: LevelFilter) -> Result<(), LogInitError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| LogInitError::OpenFailed {
            path: log_file.to_path_buf(),
            source: e,
        })?;

    Builder::new()
        .filter_level(LevelFilter::Off)
        .filter_module(env!("CARGO_CRATE_NAME"), level)
        .write_style(WriteStyle::Never)
        .format(|buf, record| {
            let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
            writeln!(
                buf,
                "{}",
                format_line(&timestamp, record.level(), &record.args().to_string())
            )
        })
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| LogInitError::AlreadyInitialized(e.to_string()))
}
