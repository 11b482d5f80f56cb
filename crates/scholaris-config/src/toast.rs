/// Notification timing.
///
/// - `SCHOLARIS_TOAST_DURATION_MS`: Lifetime of success/info/warning toasts (default: 5000)
/// - `SCHOLARIS_TOAST_ERROR_DURATION_MS`: Lifetime of error toasts (default: 8000)
/// - `SCHOLARIS_TOAST_MAX_VISIBLE`: Queue size; the oldest toast is dropped past it (default: 5)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastConfig {
    pub default_duration_ms: u64,
    pub error_duration_ms: u64,
    pub max_visible: usize,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 5000,
            error_duration_ms: 8000,
            max_visible: 5,
        }
    }
}

impl ToastConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_source(&crate::env_source)
    }

    pub fn from_source(source: &dyn Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            default_duration_ms: crate::parsed(
                source,
                "SCHOLARIS_TOAST_DURATION_MS",
                defaults.default_duration_ms,
            ),
            error_duration_ms: crate::parsed(
                source,
                "SCHOLARIS_TOAST_ERROR_DURATION_MS",
                defaults.error_duration_ms,
            ),
            max_visible: crate::parsed(source, "SCHOLARIS_TOAST_MAX_VISIBLE", defaults.max_visible)
                .max(1),
        }
    }
}
