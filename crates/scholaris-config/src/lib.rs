//! # Scholaris Config
//!
//! Configuration types for the Scholaris client, loaded from environment variables:
//!
//! - [`api`]: REST API location and identification
//! - [`credentials`]: Where the access token is persisted between runs
//! - [`limits`]: Per-role academy membership caps
//! - [`logging`]: Log level and optional JSON log directory
//! - [`toast`]: Notification durations and queue size
//!
//! Every struct has a `Default` and a `from_env()`; variables that are unset
//! or fail to parse fall back to the default value.
//!
//! # Example
//!
//! ```ignore
//! use scholaris_config::ClientConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = ClientConfig::from_env();
//! println!("talking to {}", config.api.base_url);
//! ```

pub mod api;
pub mod credentials;
pub mod limits;
pub mod logging;
pub mod toast;

// Re-export commonly used types at crate root
pub use api::ApiConfig;
pub use credentials::CredentialConfig;
pub use limits::MembershipLimitConfig;
pub use logging::LoggingConfig;
pub use toast::ToastConfig;

/// Everything the client needs, gathered in one place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub credentials: CredentialConfig,
    pub limits: MembershipLimitConfig,
    pub logging: LoggingConfig,
    pub toast: ToastConfig,
}

impl ClientConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_source(&env_source)
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_source(source: &dyn Fn(&str) -> Option<String>) -> Self {
        Self {
            api: ApiConfig::from_source(source),
            credentials: CredentialConfig::from_source(source),
            limits: MembershipLimitConfig::from_source(source),
            logging: LoggingConfig::from_source(source),
            toast: ToastConfig::from_source(source),
        }
    }
}

pub(crate) fn env_source(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

pub(crate) fn parsed<T: std::str::FromStr>(
    source: &dyn Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    source(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

pub(crate) fn flag(source: &dyn Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    match source(key).map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_empty_source_is_default() {
        let config = ClientConfig::from_source(&|_| None);
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_overrides_applied() {
        let source = source_from(&[
            ("SCHOLARIS_API_URL", "https://api.example.com/v1/"),
            ("SCHOLARIS_TEACHER_ACADEMY_LIMIT", "7"),
            ("SCHOLARIS_CLIENT_LIMIT_CHECK", "off"),
            ("SCHOLARIS_TOAST_MAX_VISIBLE", "2"),
        ]);
        let config = ClientConfig::from_source(&source);
        assert_eq!(config.api.base_url, "https://api.example.com/v1");
        assert_eq!(config.limits.teacher_limit, 7);
        assert!(!config.limits.client_check);
        assert_eq!(config.toast.max_visible, 2);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let source = source_from(&[
            ("SCHOLARIS_STUDENT_ACADEMY_LIMIT", "many"),
            ("SCHOLARIS_TOAST_DURATION_MS", "-5"),
            ("SCHOLARIS_CLIENT_LIMIT_CHECK", "maybe"),
        ]);
        let config = ClientConfig::from_source(&source);
        assert_eq!(config.limits.student_limit, 5);
        assert_eq!(config.toast.default_duration_ms, 5000);
        assert!(config.limits.client_check);
    }
}
