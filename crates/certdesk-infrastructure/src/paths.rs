//! Platform path resolution for certdesk files.
//!
//! ```text
//! ~/.config/certdesk/          # config_dir()
//! └── config.toml
//!
//! ~/.local/share/certdesk/     # data_dir()
//! └── session.toml             # persisted session record
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "certdesk";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config/data directory could not be determined.
    BaseDirNotFound(&'static str),
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::BaseDirNotFound(kind) => write!(f, "Cannot find {} directory", kind),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for certdesk_core::CertdeskError {
    fn from(err: PathError) -> Self {
        certdesk_core::CertdeskError::config(err.to_string())
    }
}

pub struct CertdeskPaths;

impl CertdeskPaths {
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::BaseDirNotFound("config"))
    }

    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::BaseDirNotFound("data"))
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("session.toml"))
    }
}
