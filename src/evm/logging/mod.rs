use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub mod file_manager;
pub mod macros;

pub use file_manager::{FileManager, LogFileError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub console_output: bool,
    pub file_path: Option<String>,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error(transparent)]
    File(#[from] LogFileError),
    #[error("failed to install log subscriber: {0}")]
    Init(#[from] TryInitError),
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            console_output: false,
            file_path: None,
            format: LogFormat::Text,
        }
    }
}

impl LogLevel {
    pub fn to_env_filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Installs the global subscriber: always a log file, plus stderr when asked.
///
/// The returned guard flushes the file writer on drop, so keep it alive until exit.
pub fn init_logging(config: LoggingConfig) -> Result<WorkerGuard, LoggingError> {
    let file_path = prepare_log_path(config.file_path)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&file_path)
        .map_err(|source| LogFileError::Io { path: file_path.clone(), source })?;
    let (file_writer, guard) = tracing_appender::non_blocking(file);

    let file_layer = fmt_layer(config.format, file_writer, false);
    let console_layer = config
        .console_output
        .then(|| fmt_layer(config.format, io::stderr, true));

    tracing_subscriber::registry()
        .with(EnvFilter::new(config.level.to_env_filter()))
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    Ok(guard)
}

/// Resolves where logs go and makes sure the directory holding that file exists.
/// The default location also gets rotated here.
fn prepare_log_path(custom: Option<String>) -> Result<PathBuf, LogFileError> {
    match custom {
        Some(path) => {
            let path = PathBuf::from(path);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                FileManager::with_dir(parent).ensure_log_directory()?;
            }
            Ok(path)
        }
        None => {
            let manager = FileManager::new();
            manager.ensure_log_directory()?;
            if manager.should_rotate()? {
                manager.rotate_files()?;
            }
            Ok(manager.log_file_path())
        }
    }
}

fn fmt_layer<S, W>(format: LogFormat, writer: W, ansi: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(ansi)
        .with_writer(writer);

    match format {
        LogFormat::Text => layer.with_thread_ids(false).boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("debug", true).unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("WARN", true).unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("verbose", true).is_err());
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("json", true).unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("text", true).unwrap(), LogFormat::Text);
        assert!(LogFormat::from_str("xml", true).is_err());
    }

    #[test]
    fn test_env_filter_strings() {
        assert_eq!(LogLevel::Debug.to_env_filter(), "debug");
        assert_eq!(LogLevel::Error.to_env_filter(), "error");
    }

    #[test]
    fn test_custom_log_file_creates_parent_dirs() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let log_file = temp_dir.path().join("missing").join("deeper").join("run.log");

        let path = prepare_log_path(Some(log_file.to_string_lossy().to_string())).unwrap();
        assert_eq!(path, log_file);
        assert!(log_file.parent().unwrap().is_dir());
        assert!(!log_file.exists());
    }

    #[test]
    fn test_bare_custom_file_name() {
        let path = prepare_log_path(Some("run.log".to_string())).unwrap();
        assert_eq!(path, PathBuf::from("run.log"));
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, LogLevel::Warn);
        assert!(!config.console_output);
        assert_eq!(config.file_path, None);
        assert_eq!(config.format, LogFormat::Text);
    }
}
