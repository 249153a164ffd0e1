//! Error types for certdesk.

use thiserror::Error;

/// The shared error type for the certdesk crates.
///
/// Remote API failures have their own type ([`crate::api::ApiError`]) because the
/// data sync layer inspects their HTTP status; everything else funnels through here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CertdeskError {
    /// Persistent key-value store failure (read, write or clear).
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication against the remote API failed.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Remote API failure outside the data sync path.
    #[error("Remote API error: {0}")]
    Remote(#[from] crate::api::ApiError),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CertdeskError {
    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<std::io::Error> for CertdeskError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CertdeskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CertdeskError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for CertdeskError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CertdeskError>`.
pub type Result<T> = std::result::Result<T, CertdeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CertdeskError = io.into();
        match err {
            CertdeskError::Io { message } => assert!(message.contains("PermissionDenied")),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse: std::result::Result<toml::Table, _> = toml::from_str("not = [valid");
        let err: CertdeskError = parse.unwrap_err().into();
        assert!(matches!(err, CertdeskError::Serialization { ref format, .. } if format == "TOML"));
    }

    #[test]
    fn test_type_checks() {
        assert!(CertdeskError::storage("disk full").is_storage());
        assert!(CertdeskError::config("bad url").is_config());
        assert!(!CertdeskError::internal("x").is_storage());
    }
}
