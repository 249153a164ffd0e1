//! Shared session state with explicit change notification.

use tokio::sync::watch;

use super::model::Session;

/// Owner of the application's single [`Session`].
///
/// Created once by the composition root and shared by reference (usually an
/// `Arc<SessionState>`). Every mutation is a synchronous closure, so a write
/// can never straddle an `.await` and readers always see a whole session.
/// Observers subscribe to receive the new snapshot after each change.
pub struct SessionState {
    tx: watch::Sender<Session>,
}

impl SessionState {
    /// Creates a logged-out session.
    pub fn new() -> Self {
        Self::with_session(Session::default())
    }

    pub fn with_session(session: Session) -> Self {
        let (tx, _rx) = watch::channel(session);
        Self { tx }
    }

    /// Returns a copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Reads the current session without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Mutates the session and notifies subscribers.
    pub fn update(&self, f: impl FnOnce(&mut Session)) {
        self.tx.send_modify(f);
    }

    /// Mutates the session only if `f` reports a change; subscribers are
    /// notified only in that case. Returns whether a change was made.
    pub fn update_if(&self, f: impl FnOnce(&mut Session) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }

    /// Subscribes to session changes.
    ///
    /// The receiver starts with the current session marked as seen; call
    /// `changed().await` to wait for the next mutation.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
