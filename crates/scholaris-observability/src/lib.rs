//! Scholaris Observability
//!
//! Structured logging for the client:
//! - a console layer on stderr (compact, or JSON when `LOG_JSON` is set)
//! - an optional daily-rolling JSON file when `LOG_DIR` is set
//!
//! Stdout is left to command output.
//!
//! ```no_run
//! use scholaris_config::LoggingConfig;
//!
//! scholaris_observability::init_logging(&LoggingConfig::from_env()).ok();
//! tracing::info!("ready");
//! ```

use std::fs;
use std::path::PathBuf;

use scholaris_config::LoggingConfig;
use thiserror::Error;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Name of the rolling log file inside `LOG_DIR`.
pub const LOG_FILE_PREFIX: &str = "scholaris.json";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("a global logger is already installed")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// Builds the default filter directive for `level`.
///
/// Noisy HTTP dependencies are held at `warn`.
pub fn default_directive(level: &str) -> String {
    format!("scholaris={level},reqwest=warn,hyper=warn,hyper_util=warn,rustls=warn")
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `config.level` when it is set.
///
/// # Errors
///
/// Fails when the log directory cannot be created or a subscriber is already
/// installed (tests commonly hit the latter and ignore it).
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.level)));

    let compact_layer = (!config.json_console).then(|| {
        fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
    });

    let json_console_layer = config.json_console.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
    });

    let file_layer = match &config.directory {
        Some(dir) => {
            fs::create_dir_all(dir).map_err(|source| LoggingError::Directory {
                path: dir.clone(),
                source,
            })?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .json()
                    .with_writer(appender)
                    .with_ansi(false)
                    .with_current_span(true)
                    .with_span_list(true),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(compact_layer)
        .with(json_console_layer)
        .with(file_layer)
        .try_init()?;

    tracing::debug!(
        level = %config.level,
        json = config.json_console,
        directory = ?config.directory,
        "logging initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_uses_level() {
        let directive = default_directive("debug");
        assert!(directive.starts_with("scholaris=debug"));
        assert!(directive.contains("reqwest=warn"));
    }

    #[test]
    fn test_init_creates_directory_and_rejects_second_install() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let config = LoggingConfig {
            directory: Some(log_dir.clone()),
            ..Default::default()
        };

        let first = init_logging(&config);
        assert!(log_dir.is_dir());
        assert!(first.is_ok());

        let second = init_logging(&config);
        assert!(matches!(second, Err(LoggingError::AlreadyInitialized(_))));
    }
}
