//! Remote API port.
//!
//! The core only depends on the [`ApiClient`] trait; the HTTP implementation
//! lives in `certdesk-infrastructure`.

mod client;
mod error;

pub use client::ApiClient;
pub use error::ApiError;

/// Endpoint paths, relative to the configured base URL.
pub mod endpoints {
    use crate::records::NoticeId;

    pub const LOGIN: &str = "/api/login";
    pub const NOTICES: &str = "/api/notices";
    pub const MY_CERTIFICATES: &str = "/api/certificates/mine";
    pub const PENDING_REVIEW_CERTIFICATES: &str = "/api/certificates/review/pending";

    pub fn notice_read(notice_id: NoticeId) -> String {
        format!("/api/notices/{}/read", notice_id)
    }
}
