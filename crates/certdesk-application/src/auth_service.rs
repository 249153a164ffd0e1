//! Credential exchange against the remote API.

use std::sync::Arc;

use certdesk_core::api::ApiClient;
use certdesk_core::error::{CertdeskError, Result};
use certdesk_core::routing::Navigator;
use certdesk_core::user::Credentials;

use crate::session_controller::SessionController;

/// Authenticates credentials and hands the resulting identity to the
/// [`SessionController`].
pub struct AuthService {
    api: Arc<dyn ApiClient>,
    controller: Arc<SessionController>,
}

impl AuthService {
    pub fn new(api: Arc<dyn ApiClient>, controller: Arc<SessionController>) -> Self {
        Self { api, controller }
    }

    /// Rejected credentials map to [`CertdeskError::Auth`]; other remote
    /// failures to [`CertdeskError::Remote`]. The session is untouched on error.
    pub async fn sign_in(&self, credentials: &Credentials, navigator: &dyn Navigator) -> Result<()> {
        tracing::debug!("[AuthService] Signing in {}", credentials.email);

        let payload = self.api.login(credentials).await.map_err(|e| {
            if e.is_auth_failure() {
                tracing::warn!("[AuthService] Credentials rejected for {}", credentials.email);
                CertdeskError::auth("Invalid email or password")
            } else {
                tracing::error!("[AuthService] Login request failed: {}", e);
                CertdeskError::from(e)
            }
        })?;

        self.controller.login(payload, navigator)
    }
}
