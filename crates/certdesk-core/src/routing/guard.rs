//! Navigation guard.

use super::navigator::paths;
use super::route::{RouteMeta, RouteTable};
use crate::user::SessionUser;

/// Where a denied navigation is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Landing,
}

impl Redirect {
    pub fn path(self) -> &'static str {
        match self {
            Redirect::Login => paths::LOGIN,
            Redirect::Landing => paths::LANDING,
        }
    }
}

/// Outcome of a guard evaluation. There is no pending or failed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Redirect),
}

impl GuardDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, GuardDecision::Allow)
    }

    /// Path the host should go to instead, if navigation was denied.
    pub fn redirect_path(self) -> Option<&'static str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::Redirect(redirect) => Some(redirect.path()),
        }
    }
}

/// Stateless navigation guard, evaluated before every navigation.
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    table: RouteTable,
}

impl RouteGuard {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    pub fn standard() -> Self {
        Self::new(RouteTable::standard())
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Resolves `path` through the route table and evaluates it.
    pub fn check(&self, path: &str, user: &SessionUser) -> GuardDecision {
        let resolved = self.table.resolve(path);
        let decision = Self::evaluate(&resolved.path, &resolved.meta, user);
        tracing::debug!(
            "[RouteGuard] {} (resolved {}) -> {:?}",
            path,
            resolved.path,
            decision
        );
        decision
    }

    /// The guard rules, applied in order:
    ///
    /// 1. non-public path while logged out → login
    /// 2. route declares a role the user does not hold → landing (even when
    ///    logged out, if rule 1 did not fire)
    /// 3. logged in on a public path → landing, except the password reset page
    /// 4. allow
    pub fn evaluate(path: &str, meta: &RouteMeta, user: &SessionUser) -> GuardDecision {
        let is_public = paths::is_public(path);

        if !is_public && !user.is_logged_in {
            return GuardDecision::Redirect(Redirect::Login);
        }

        if let Some(required) = meta.role
            && user.role != Some(required)
        {
            return GuardDecision::Redirect(Redirect::Landing);
        }

        if user.is_logged_in && is_public && path != paths::RESET_PASSWORD {
            return GuardDecision::Redirect(Redirect::Landing);
        }

        GuardDecision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::{LoginPayload, Role};

    fn logged_in(role: Role) -> SessionUser {
        SessionUser::from_login(LoginPayload {
            token: "t".to_string(),
            name: "n".to_string(),
            role,
            modality: None,
            avatar_url: None,
        })
    }

    fn logged_out() -> SessionUser {
        SessionUser::default()
    }

    #[test]
    fn test_protected_page_requires_login() {
        let guard = RouteGuard::standard();
        assert_eq!(
            guard.check("/home", &logged_out()),
            GuardDecision::Redirect(Redirect::Login)
        );
        assert_eq!(
            guard.check("/", &logged_out()),
            GuardDecision::Redirect(Redirect::Login)
        );
    }

    #[test]
    fn test_role_mismatch_redirects_to_landing() {
        let admin_meta = RouteMeta::for_role(Role::Admin);
        assert_eq!(
            RouteGuard::evaluate("/admin", &admin_meta, &logged_in(Role::Student)),
            GuardDecision::Redirect(Redirect::Landing)
        );
        assert_eq!(
            RouteGuard::standard().check("/review", &logged_in(Role::Student)),
            GuardDecision::Redirect(Redirect::Landing)
        );
    }

    #[test]
    fn test_role_mismatch_on_public_path_while_logged_out() {
        // Rule 1 does not fire for public paths, so rule 2 decides
        let meta = RouteMeta::for_role(Role::Admin);
        assert_eq!(
            RouteGuard::evaluate("/login", &meta, &logged_out()),
            GuardDecision::Redirect(Redirect::Landing)
        );
    }

    #[test]
    fn test_matching_role_is_allowed() {
        let guard = RouteGuard::standard();
        assert!(guard.check("/certificates", &logged_in(Role::Student)).is_allowed());
        assert!(guard.check("/review-log", &logged_in(Role::Teacher)).is_allowed());
        assert!(guard.check("/users/new", &logged_in(Role::Admin)).is_allowed());
    }

    #[test]
    fn test_logged_in_user_leaves_public_pages() {
        let guard = RouteGuard::standard();
        let user = logged_in(Role::Teacher);
        assert_eq!(
            guard.check("/login", &user),
            GuardDecision::Redirect(Redirect::Landing)
        );
        assert_eq!(
            guard.check("/register", &user),
            GuardDecision::Redirect(Redirect::Landing)
        );
        assert_eq!(guard.check("/reset-password", &user), GuardDecision::Allow);
    }

    #[test]
    fn test_logged_out_user_reaches_public_pages() {
        let guard = RouteGuard::standard();
        for path in paths::PUBLIC {
            assert_eq!(guard.check(path, &logged_out()), GuardDecision::Allow, "{path}");
        }
    }

    #[test]
    fn test_redirect_paths() {
        assert_eq!(
            GuardDecision::Redirect(Redirect::Login).redirect_path(),
            Some("/login")
        );
        assert_eq!(
            GuardDecision::Redirect(Redirect::Landing).redirect_path(),
            Some("/home")
        );
        assert_eq!(GuardDecision::Allow.redirect_path(), None);
    }

    #[test]
    fn test_shared_pages_allowed_for_any_role() {
        let guard = RouteGuard::standard();
        for role in [Role::Student, Role::Teacher, Role::Admin] {
            assert!(guard.check("/notices", &logged_in(role)).is_allowed());
            assert!(guard.check("/profile", &logged_in(role)).is_allowed());
        }
    }

    #[test]
    fn test_public_list_decides_login_not_requires_auth() {
        assert_eq!(
            RouteGuard::evaluate("/about", &RouteMeta::PUBLIC, &logged_out()),
            GuardDecision::Redirect(Redirect::Login)
        );
        assert!(
            RouteGuard::evaluate("/register", &RouteMeta::AUTHENTICATED, &logged_out())
                .is_allowed()
        );
    }
}
