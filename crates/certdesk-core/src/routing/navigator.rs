/// Well-known application paths.
pub mod paths {
    pub const ROOT: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    pub const FORGOT_PASSWORD: &str = "/forgot-password";
    pub const RESET_PASSWORD: &str = "/reset-password";

    /// Authenticated landing page.
    pub const LANDING: &str = "/home";

    /// Pages reachable without a session.
    pub const PUBLIC: [&str; 4] = [LOGIN, REGISTER, FORGOT_PASSWORD, RESET_PASSWORD];

    pub fn is_public(path: &str) -> bool {
        PUBLIC.contains(&path)
    }
}

/// Capability to move the host application to another path.
///
/// Injected into `login`/`logout` and the sync service; independent of the
/// route guard's own allow/redirect decisions.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// A navigator that ignores every request, for hosts without navigation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, path: &str) {
        tracing::trace!("[NoopNavigator] Ignoring navigation to {}", path);
    }
}
