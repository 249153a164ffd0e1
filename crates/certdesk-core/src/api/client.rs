//! Remote API client trait.

use async_trait::async_trait;

use super::error::ApiError;
use crate::records::{Certificate, Notice, NoticeId};
use crate::user::{CertificateFeed, Credentials, LoginPayload};

/// The remote API as seen by the session core.
///
/// Every authenticated call receives the bearer token explicitly; the client
/// holds no session state of its own. Implementations are expected to apply a
/// per-request timeout and report expiry as [`ApiError::Timeout`].
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// `POST /api/login`
    async fn login(&self, credentials: &Credentials) -> Result<LoginPayload, ApiError>;

    /// `GET /api/notices`
    async fn fetch_notices(&self, token: &str) -> Result<Vec<Notice>, ApiError>;

    /// `GET` on the feed's endpoint.
    async fn fetch_certificates(
        &self,
        token: &str,
        feed: CertificateFeed,
    ) -> Result<Vec<Certificate>, ApiError>;

    /// `POST /api/notices/{id}/read`
    async fn mark_notice_read(&self, token: &str, notice_id: NoticeId) -> Result<(), ApiError>;
}
