//! Structured logging infrastructure for Relevo.
//!
//! A thin layer over the tracing crate: level, format and destination come
//! from [`LoggingConfig`]; everything else is standard `tracing` usage at
//! the call sites.

use crate::config::{LogFormat, LoggingConfig};
use std::path::Path;
use std::sync::OnceLock;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};

// Keeps the non-blocking file worker alive for the process lifetime.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Error type for logging operations
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error in subscriber setup
    #[error("Subscriber error: {0}")]
    SubscriberError(String),
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Initialize the logging system with the given configuration.
///
/// Safe to call more than once: an already-installed subscriber is not an
/// error.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let level = match config.level {
        crate::config::LogLevel::Trace => Level::TRACE,
        crate::config::LogLevel::Debug => Level::DEBUG,
        crate::config::LogLevel::Info => Level::INFO,
        crate::config::LogLevel::Warn => Level::WARN,
        crate::config::LogLevel::Error => Level::ERROR,
    };

    let result = match config.format {
        LogFormat::Json => init_json_logging(level, config),
        LogFormat::Compact => init_compact_logging(level, config),
        _ => init_pretty_logging(level, config),
    };

    // If a global subscriber is already installed, leave it in place
    if let Err(LogError::SubscriberError(ref message)) = result
        && message.contains("already been set")
    {
        return Ok(());
    }

    result
}

fn subscriber_error(err: impl std::fmt::Display) -> LogError {
    LogError::SubscriberError(err.to_string())
}

/// Initialize logging with JSON formatting
fn init_json_logging(level: Level, config: &LoggingConfig) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(level)
        .with_level(true)
        .with_target(true);

    match (&config.file, config.stdout) {
        (Some(path), false) => {
            let writer = create_non_blocking_file(path)?;
            subscriber.with_writer(writer).try_init().map_err(subscriber_error)
        }
        (_, true) => subscriber.try_init().map_err(subscriber_error),
        (None, false) => Ok(()),
    }
}

/// Initialize logging with compact formatting
fn init_compact_logging(level: Level, config: &LoggingConfig) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_max_level(level)
        .with_level(true)
        .with_target(true);

    match (&config.file, config.stdout) {
        (Some(path), false) => {
            let writer = create_non_blocking_file(path)?;
            subscriber.with_writer(writer).try_init().map_err(subscriber_error)
        }
        (_, true) => subscriber.try_init().map_err(subscriber_error),
        (None, false) => Ok(()),
    }
}

/// Initialize logging with human-readable formatting
fn init_pretty_logging(level: Level, config: &LoggingConfig) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_level(true)
        .with_target(true);

    match (&config.file, config.stdout) {
        (Some(path), false) => {
            let writer = create_non_blocking_file(path)?;
            subscriber.with_writer(writer).try_init().map_err(subscriber_error)
        }
        (_, true) => subscriber.try_init().map_err(subscriber_error),
        (None, false) => Ok(()),
    }
}

/// Open the log file and wrap it in a non-blocking writer.
fn create_non_blocking_file(path: &Path) -> Result<NonBlocking> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    let _ = FILE_GUARD.set(guard);
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogLevel, LoggingConfig};

    #[test]
    fn test_init_is_idempotent() {
        let config = LoggingConfig {
            level: LogLevel::Error,
            format: LogFormat::Compact,
            file: None,
            stdout: true,
        };
        assert!(init(&config).is_ok());
        // A second call must tolerate the already-installed subscriber
        assert!(init(&config).is_ok());
    }

    #[test]
    fn test_silent_config_is_a_no_op() {
        let config = LoggingConfig {
            level: LogLevel::Info,
            format: LogFormat::Default,
            file: None,
            stdout: false,
        };
        assert!(init(&config).is_ok());
    }

    #[test]
    fn test_file_writer_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("relevo.log");
        assert!(create_non_blocking_file(&path).is_ok());
        assert!(path.parent().unwrap().exists());
    }
}
