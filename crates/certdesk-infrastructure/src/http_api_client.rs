//! reqwest implementation of the remote API.

use std::time::Duration;

use async_trait::async_trait;
use certdesk_core::api::{ApiClient, ApiError, endpoints};
use certdesk_core::config::ApiSettings;
use certdesk_core::error::{CertdeskError, Result};
use certdesk_core::records::{Certificate, Notice, NoticeId};
use certdesk_core::user::{CertificateFeed, Credentials, LoginPayload};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

/// Longest error body carried into an [`ApiError::Status`] message.
const MAX_ERROR_BODY: usize = 512;

/// [`ApiClient`] over HTTP with a per-request timeout.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        Self::with_timeout(&settings.base_url, settings.timeout())
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CertdeskError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> std::result::Result<Response, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            body
        };

        Err(ApiError::status(status.as_u16(), message))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> std::result::Result<T, ApiError> {
        tracing::debug!("[HttpApiClient] GET {}", path);
        let response = self
            .send(self.client.get(self.url(path)).bearer_auth(token))
            .await?;
        response.json::<T>().await.map_err(map_reqwest_error)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout(err.to_string())
    } else if err.is_decode() {
        ApiError::Decode(err.to_string())
    } else if let Some(status) = err.status() {
        ApiError::status(status.as_u16(), err.to_string())
    } else {
        ApiError::Transport(err.to_string())
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn login(&self, credentials: &Credentials) -> std::result::Result<LoginPayload, ApiError> {
        tracing::debug!("[HttpApiClient] POST {}", endpoints::LOGIN);
        let response = self
            .send(self.client.post(self.url(endpoints::LOGIN)).json(credentials))
            .await?;
        response
            .json::<LoginPayload>()
            .await
            .map_err(map_reqwest_error)
    }

    async fn fetch_notices(&self, token: &str) -> std::result::Result<Vec<Notice>, ApiError> {
        self.get_json(endpoints::NOTICES, token).await
    }

    async fn fetch_certificates(
        &self,
        token: &str,
        feed: CertificateFeed,
    ) -> std::result::Result<Vec<Certificate>, ApiError> {
        self.get_json(feed.endpoint, token).await
    }

    async fn mark_notice_read(
        &self,
        token: &str,
        notice_id: NoticeId,
    ) -> std::result::Result<(), ApiError> {
        let path = endpoints::notice_read(notice_id);
        tracing::debug!("[HttpApiClient] POST {}", path);
        self.send(
            self.client
                .post(self.url(&path))
                .bearer_auth(token)
                .json(&serde_json::json!({})),
        )
        .await?;
        Ok(())
    }
}
