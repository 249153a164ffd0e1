use thiserror::Error;

/// Failure of a remote API call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The request did not complete within the configured timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Connection-level failure (DNS, refused, TLS, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// HTTP status code carried by the failure, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 401 and 403 mean the credential is invalid or expired.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status_code(), Some(401 | 403))
    }
}
