//! Configuration service.
//!
//! Loads [`ClientConfig`] from `config.toml` and applies environment overrides.

use std::path::{Path, PathBuf};

use certdesk_core::config::ClientConfig;
use certdesk_core::error::Result;

use crate::paths::CertdeskPaths;
use crate::storage::TomlFile;

/// Overrides the API base URL.
pub const ENV_API_URL: &str = "CERTDESK_API_URL";
/// Points at an alternate config file.
pub const ENV_CONFIG_PATH: &str = "CERTDESK_CONFIG";

pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses `$CERTDESK_CONFIG` if set, otherwise the platform config file.
    pub fn new() -> Result<Self> {
        let path = match std::env::var_os(ENV_CONFIG_PATH) {
            Some(path) => PathBuf::from(path),
            None => CertdeskPaths::config_file()?,
        };
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration. A missing file yields the defaults; a malformed
    /// one is an error rather than being silently replaced.
    pub fn load(&self) -> Result<ClientConfig> {
        let mut config = match TomlFile::<ClientConfig>::new(self.path.clone()).load()? {
            Some(config) => config,
            None => {
                tracing::debug!(
                    "[ConfigService] No config at {}, using defaults",
                    self.path.display()
                );
                ClientConfig::default()
            }
        };

        if let Ok(url) = std::env::var(ENV_API_URL)
            && !url.trim().is_empty()
        {
            config.api.base_url = url.trim().to_string();
        }

        Ok(config)
    }

    /// Session store file: `storage.path` if configured, otherwise the platform default.
    pub fn session_file(&self, config: &ClientConfig) -> Result<PathBuf> {
        match &config.storage.path {
            Some(path) => Ok(path.clone()),
            None => Ok(CertdeskPaths::session_file()?),
        }
    }
}
