use std::path::PathBuf;

/// Where the access token is persisted between runs.
///
/// # Environment Variables
///
/// - `SCHOLARIS_CREDENTIALS_PATH`: Credential file (default: `<config dir>/scholaris/credentials.json`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CredentialConfig {
    pub path: PathBuf,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: base.join("scholaris").join("credentials.json"),
        }
    }
}

impl CredentialConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_source(&crate::env_source)
    }

    pub fn from_source(source: &dyn Fn(&str) -> Option<String>) -> Self {
        match source("SCHOLARIS_CREDENTIALS_PATH").filter(|p| !p.trim().is_empty()) {
            Some(path) => Self {
                path: PathBuf::from(path),
            },
            None => Self::default(),
        }
    }
}
