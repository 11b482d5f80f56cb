/// Location of the REST API.
///
/// # Environment Variables
///
/// - `SCHOLARIS_API_URL`: Base URL including any path prefix (default: `http://localhost:3000/api`)
/// - `SCHOLARIS_USER_AGENT`: User agent sent with every request (default: `scholaris/<version>`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_source(&crate::env_source)
    }

    pub fn from_source(source: &dyn Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: source("SCHOLARIS_API_URL")
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.base_url),
            user_agent: source("SCHOLARIS_USER_AGENT")
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or(defaults.user_agent),
        }
    }

    /// Joins an endpoint path onto the base URL.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn default_user_agent() -> String {
    format!("scholaris/{}", env!("CARGO_PKG_VERSION"))
}
