use std::path::PathBuf;

/// Logging settings.
///
/// - `LOG_LEVEL`: Level for scholaris crates when `RUST_LOG` is unset (default: `info`)
/// - `LOG_DIR`: When set, a daily-rolling JSON log is written there
/// - `LOG_JSON`: Emit console output as JSON instead of compact text (default: false)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: Option<PathBuf>,
    pub json_console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            json_console: false,
        }
    }
}

impl LoggingConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_source(&crate::env_source)
    }

    pub fn from_source(source: &dyn Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            level: source("LOG_LEVEL")
                .map(|l| l.trim().to_ascii_lowercase())
                .filter(|l| !l.is_empty())
                .unwrap_or(defaults.level),
            directory: source("LOG_DIR")
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from),
            json_console: crate::flag(source, "LOG_JSON", defaults.json_console),
        }
    }
}
