//! Session domain model.

use chrono::{DateTime, Utc};

use crate::records::{Certificate, Notice};
use crate::user::{CertificateTarget, Role, SessionUser};

/// Progress of the post-login fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncStatus {
    /// No fetch has been started for the current identity.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch settled, successfully or not.
    Loaded,
}

/// Results of one completed sync, applied to the session in a single step.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncPayload {
    pub notices: Vec<Notice>,
    /// Present only when the role has a certificate feed.
    pub certificates: Option<(CertificateTarget, Vec<Certificate>)>,
}

/// The in-memory session: identity plus the collections fetched for it.
///
/// Collections are replaced wholesale and never persisted.
///
/// # Epoch
///
/// `epoch` increases on every identity change (login or logout). Async work
/// captures it when it starts and only writes back if it is unchanged, so a
/// request issued for a previous identity can never leak into the current one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: SessionUser,
    pub notices: Vec<Notice>,
    pub certificates: Vec<Certificate>,
    pub certificates_pending_review: Vec<Certificate>,
    pub sync_status: SyncStatus,
    pub last_synced_at: Option<DateTime<Utc>>,
    epoch: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_logged_in
    }

    pub fn role(&self) -> Option<Role> {
        self.user.role
    }

    pub fn token(&self) -> Option<&str> {
        self.user.token.as_deref()
    }

    /// Two-state view of `sync_status`: "loading" and "not started" both read as false.
    pub fn is_initial_data_loaded(&self) -> bool {
        self.sync_status == SyncStatus::Loaded
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Restores a persisted identity on startup. Collections are left as they are.
    pub fn restore(&mut self, user: SessionUser) {
        self.user = user;
    }

    /// Switches to a freshly authenticated identity.
    ///
    /// Starts a new epoch and drops every collection fetched for the previous
    /// identity, including the one the new role would not refresh.
    pub fn begin(&mut self, user: SessionUser) {
        let epoch = self.epoch + 1;
        *self = Self {
            user,
            epoch,
            ..Self::default()
        };
    }

    /// Returns to the logged-out initial value, starting a new epoch.
    pub fn reset(&mut self) {
        let epoch = self.epoch + 1;
        *self = Self {
            epoch,
            ..Self::default()
        };
    }

    pub fn set_avatar_url(&mut self, avatar_url: Option<String>) {
        self.user.avatar_url = avatar_url;
    }

    /// Applies a completed sync. The collection the payload does not carry is
    /// left untouched.
    pub fn apply_sync(&mut self, payload: SyncPayload) {
        self.notices = payload.notices;
        match payload.certificates {
            Some((CertificateTarget::Mine, certificates)) => self.certificates = certificates,
            Some((CertificateTarget::PendingReview, certificates)) => {
                self.certificates_pending_review = certificates
            }
            None => {}
        }
        self.last_synced_at = Some(Utc::now());
    }

    /// True when both sessions hold the same identity, collections and sync status.
    ///
    /// Ignores the epoch and the sync timestamp, which differ between otherwise
    /// equivalent sessions.
    pub fn same_state_as(&self, other: &Session) -> bool {
        self.user == other.user
            && self.notices == other.notices
            && self.certificates == other.certificates
            && self.certificates_pending_review == other.certificates_pending_review
            && self.sync_status == other.sync_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::LoginPayload;

    fn student() -> SessionUser {
        SessionUser::from_login(LoginPayload {
            token: "t".to_string(),
            name: "Ana".to_string(),
            role: Role::Student,
            modality: None,
            avatar_url: None,
        })
    }

    #[test]
    fn test_new_session_is_logged_out() {
        let session = Session::new();
        assert!(!session.is_logged_in());
        assert!(!session.is_initial_data_loaded());
        assert_eq!(session.sync_status, SyncStatus::Idle);
        assert!(session.notices.is_empty());
    }

    #[test]
    fn test_begin_clears_previous_collections_and_bumps_epoch() {
        let mut session = Session::new();
        session.certificates_pending_review = vec![Certificate::new(1, "old")];
        session.sync_status = SyncStatus::Loaded;

        session.begin(student());

        assert_eq!(session.epoch(), 1);
        assert!(session.is_logged_in());
        assert!(session.certificates_pending_review.is_empty());
        assert_eq!(session.sync_status, SyncStatus::Idle);
    }

    #[test]
    fn test_reset_is_idempotent_apart_from_epoch() {
        let mut session = Session::new();
        session.begin(student());
        session.notices = vec![Notice::new(1, "n")];

        session.reset();
        let once = session.clone();
        session.reset();

        assert!(session.same_state_as(&once));
        assert!(session.same_state_as(&Session::new()));
        assert_eq!(session.epoch(), once.epoch() + 1);
    }

    #[test]
    fn test_apply_sync_leaves_other_collection() {
        let mut session = Session::new();
        session.certificates_pending_review = vec![Certificate::new(9, "kept")];

        session.apply_sync(SyncPayload {
            notices: vec![Notice::new(1, "n1")],
            certificates: Some((CertificateTarget::Mine, vec![Certificate::new(2, "c1")])),
        });

        assert_eq!(session.notices, vec![Notice::new(1, "n1")]);
        assert_eq!(session.certificates, vec![Certificate::new(2, "c1")]);
        assert_eq!(session.certificates_pending_review, vec![Certificate::new(9, "kept")]);
        assert!(session.last_synced_at.is_some());
    }
}
