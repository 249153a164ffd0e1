//! Session lifecycle: restore, login, logout and avatar updates.
//!
//! Every operation here is synchronous. The persistent store is written and the
//! shared [`SessionState`] is replaced without a suspension point in between, so
//! observers never see the store and the session disagree.

use std::sync::Arc;

use certdesk_core::error::Result;
use certdesk_core::routing::{Navigator, paths};
use certdesk_core::session::{Session, SessionState, SessionStorage};
use certdesk_core::user::{LoginPayload, SessionUser, normalize_avatar_url};

pub struct SessionController {
    state: Arc<SessionState>,
    storage: SessionStorage,
}

impl SessionController {
    pub fn new(state: Arc<SessionState>, storage: SessionStorage) -> Self {
        Self { state, storage }
    }

    pub fn state(&self) -> &Arc<SessionState> {
        &self.state
    }

    pub fn storage(&self) -> &SessionStorage {
        &self.storage
    }

    /// Restores a persisted session, if a token was stored.
    ///
    /// Call once before the first navigation is evaluated. A store that cannot
    /// be read is treated as holding no session.
    pub fn init_session(&self) {
        let record = match self.storage.load() {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    "[SessionController] Failed to read persisted session, starting logged out: {}",
                    e
                );
                None
            }
        };

        let Some(record) = record else {
            tracing::debug!("[SessionController] No persisted session");
            return;
        };

        let user = SessionUser::from_record(record);
        tracing::info!(
            "[SessionController] Restored session: name={}, role={:?}",
            user.name,
            user.role
        );
        self.state.update(|session| session.restore(user));
    }

    /// Starts a session for a freshly authenticated user and navigates to the
    /// landing page.
    ///
    /// The store is written first. If that fails the namespace is cleared, the
    /// in-memory session is left as it was and no navigation happens.
    pub fn login(&self, payload: LoginPayload, navigator: &dyn Navigator) -> Result<()> {
        let user = SessionUser::from_login(payload);

        if let Err(e) = self.storage.save(&user) {
            tracing::error!("[SessionController] Failed to persist login: {}", e);
            if let Err(clear_err) = self.storage.clear() {
                tracing::warn!(
                    "[SessionController] Failed to clear partial login: {}",
                    clear_err
                );
            }
            return Err(e);
        }

        tracing::info!(
            "[SessionController] Logged in: name={}, role={:?}",
            user.name,
            user.role
        );
        self.state.update(|session| session.begin(user));
        navigator.navigate(paths::LANDING);
        Ok(())
    }

    /// Ends the session and navigates to the login page. Idempotent.
    ///
    /// The in-memory reset and the navigation always happen; a failure to clear
    /// the store is returned afterwards.
    pub fn logout(&self, navigator: &dyn Navigator) -> Result<()> {
        self.state.update(Session::reset);
        let cleared = self.storage.clear();
        if let Err(e) = &cleared {
            tracing::warn!("[SessionController] Failed to clear persisted session: {}", e);
        }

        tracing::info!("[SessionController] Logged out");
        navigator.navigate(paths::LOGIN);
        cleared
    }

    /// Replaces the avatar URL. `None`, `""` and `"null"` remove it.
    ///
    /// A logged-out session only changes in memory; there is no record to write to.
    pub fn update_avatar(&self, avatar_url: Option<&str>) -> Result<()> {
        let avatar_url = normalize_avatar_url(avatar_url);

        if self.state.read(Session::is_logged_in) {
            self.storage.save_avatar_url(avatar_url.as_deref())?;
        }

        tracing::debug!(
            "[SessionController] Avatar {}",
            if avatar_url.is_some() { "updated" } else { "removed" }
        );
        self.state
            .update(|session| session.set_avatar_url(avatar_url));
        Ok(())
    }
}
