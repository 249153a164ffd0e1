//! Client configuration model.
//!
//! Loaded from `config.toml` by `certdesk_infrastructure::ConfigService`.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_NAMESPACE: &str = "certdesk";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            storage: StorageSettings::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. Expiry is reported as a non-auth failure.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Prefix for every persisted key.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Session store file. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            path: None,
        }
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_document() {
        let config: ClientConfig = toml::from_str(
            r#"
            log_level = "debug"

            [api]
            base_url = "https://certs.example.edu"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://certs.example.edu");
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.storage.namespace, "certdesk");
        assert_eq!(config.log_level, "debug");
    }
}
