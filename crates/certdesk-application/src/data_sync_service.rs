//! Post-login data synchronization.
//!
//! Fetches notices and the role's certificate feed concurrently, then applies
//! both to the session in one update. Failures never reach the caller: they are
//! logged, and a rejected credential ends the session.

use std::sync::Arc;

use certdesk_core::api::{ApiClient, ApiError};
use certdesk_core::records::{Certificate, Notice, NoticeId};
use certdesk_core::routing::Navigator;
use certdesk_core::session::{SessionState, SyncPayload, SyncStatus};
use certdesk_core::user::{CertificateFeed, CertificateTarget, Role};
use futures::future::OptionFuture;

use crate::session_controller::SessionController;

/// What a fetch captured at entry. Results are only applied while the session
/// epoch still matches.
#[derive(Debug, Clone)]
struct SyncTicket {
    epoch: u64,
    token: String,
    feed: Option<CertificateFeed>,
}

pub struct DataSyncService {
    state: Arc<SessionState>,
    api: Arc<dyn ApiClient>,
    controller: Arc<SessionController>,
}

impl DataSyncService {
    pub fn new(api: Arc<dyn ApiClient>, controller: Arc<SessionController>) -> Self {
        Self {
            state: controller.state().clone(),
            api,
            controller,
        }
    }

    /// Loads the collections the current role needs.
    ///
    /// No-op when logged out. The sync status is `Loading` while requests are in
    /// flight and `Loaded` afterwards, whether or not they succeeded. If the
    /// session was replaced mid-flight the results are dropped untouched.
    pub async fn fetch_initial_data(&self, navigator: &dyn Navigator) {
        let Some(ticket) = self.begin_sync() else {
            tracing::debug!("[DataSyncService] Not logged in, skipping initial fetch");
            return;
        };
        tracing::debug!(
            "[DataSyncService] Fetching initial data (epoch {}, feed {:?})",
            ticket.epoch,
            ticket.feed.map(|feed| feed.endpoint)
        );

        let token = ticket.token.as_str();
        let notices = self.api.fetch_notices(token);
        let certificates: OptionFuture<_> = ticket
            .feed
            .map(|feed| async move {
                (feed.target, self.api.fetch_certificates(token, feed).await)
            })
            .into();
        let (notices, certificates) = futures::join!(notices, certificates);

        match merge_results(notices, certificates) {
            Ok(payload) => self.complete(&ticket, payload),
            Err(e) => self.fail(&ticket, e, navigator),
        }
    }

    /// Marks a notice as read, then refreshes everything once.
    ///
    /// No-op when logged out. A failure is logged and nothing else changes.
    pub async fn mark_notice_read(&self, notice_id: NoticeId, navigator: &dyn Navigator) {
        let token = self.state.read(|session| {
            session
                .is_logged_in()
                .then(|| session.token().map(str::to_owned))
                .flatten()
        });
        let Some(token) = token else {
            tracing::debug!("[DataSyncService] Not logged in, ignoring read marker");
            return;
        };

        match self.api.mark_notice_read(&token, notice_id).await {
            Ok(()) => {
                tracing::debug!("[DataSyncService] Notice {} marked as read", notice_id);
                self.fetch_initial_data(navigator).await;
            }
            Err(e) => {
                tracing::error!(
                    "[DataSyncService] Failed to mark notice {} as read: {}",
                    notice_id,
                    e
                );
            }
        }
    }

    /// Flips the status to `Loading` and captures the epoch, token and feed,
    /// all in one update.
    fn begin_sync(&self) -> Option<SyncTicket> {
        let mut ticket = None;
        self.state.update_if(|session| {
            if !session.is_logged_in() {
                return false;
            }
            let Some(token) = session.token() else {
                return false;
            };
            ticket = Some(SyncTicket {
                epoch: session.epoch(),
                token: token.to_string(),
                feed: session.role().and_then(Role::certificate_feed),
            });
            session.sync_status = SyncStatus::Loading;
            true
        });
        ticket
    }

    fn complete(&self, ticket: &SyncTicket, payload: SyncPayload) {
        let notices = payload.notices.len();
        let applied = self.state.update_if(|session| {
            if session.epoch() != ticket.epoch {
                return false;
            }
            session.apply_sync(payload);
            session.sync_status = SyncStatus::Loaded;
            true
        });

        if applied {
            tracing::info!("[DataSyncService] Initial data loaded: {} notices", notices);
        } else {
            tracing::debug!(
                "[DataSyncService] Session changed during fetch (epoch {}), discarding results",
                ticket.epoch
            );
        }
    }

    fn fail(&self, ticket: &SyncTicket, error: ApiError, navigator: &dyn Navigator) {
        if self.state.read(|session| session.epoch()) != ticket.epoch {
            tracing::debug!(
                "[DataSyncService] Session changed during fetch (epoch {}), ignoring error: {}",
                ticket.epoch,
                error
            );
            return;
        }

        tracing::error!("[DataSyncService] Failed to fetch initial data: {}", error);

        if error.is_auth_failure() {
            tracing::warn!("[DataSyncService] Credentials rejected, logging out");
            if let Err(e) = self.controller.logout(navigator) {
                tracing::warn!("[DataSyncService] Logout after rejection incomplete: {}", e);
            }
        }

        // A forced logout moved the epoch; the flag belongs to the session it left behind.
        let epoch = self.state.read(|session| session.epoch());
        self.state.update_if(|session| {
            if session.epoch() != epoch {
                return false;
            }
            session.sync_status = SyncStatus::Loaded;
            true
        });
    }
}

/// Combines the fan-out results. When both requests fail, an auth failure wins
/// so a rejected credential is never masked by an unrelated error.
fn merge_results(
    notices: Result<Vec<Notice>, ApiError>,
    certificates: Option<(CertificateTarget, Result<Vec<Certificate>, ApiError>)>,
) -> Result<SyncPayload, ApiError> {
    let certificates = certificates
        .map(|(target, result)| result.map(|list| (target, list)))
        .transpose();

    match (notices, certificates) {
        (Ok(notices), Ok(certificates)) => Ok(SyncPayload {
            notices,
            certificates,
        }),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
        (Err(notices_err), Err(certificates_err)) => {
            if certificates_err.is_auth_failure() && !notices_err.is_auth_failure() {
                Err(certificates_err)
            } else {
                Err(notices_err)
            }
        }
    }
}
