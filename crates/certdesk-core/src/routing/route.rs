//! Route metadata and the application route table.

use super::navigator::paths;
use crate::user::Role;

/// Guard-relevant metadata attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteMeta {
    /// Informational. The guard decides login requirements from the public
    /// path list, not from this flag.
    pub requires_auth: bool,
    pub role: Option<Role>,
}

impl RouteMeta {
    pub const PUBLIC: Self = Self {
        requires_auth: false,
        role: None,
    };

    pub const AUTHENTICATED: Self = Self {
        requires_auth: true,
        role: None,
    };

    pub const fn for_role(role: Role) -> Self {
        Self {
            requires_auth: true,
            role: Some(role),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub name: String,
    pub meta: RouteMeta,
}

impl Route {
    pub fn new(path: impl Into<String>, name: impl Into<String>, meta: RouteMeta) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            meta,
        }
    }
}

/// A resolved navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Normalized path, after alias expansion.
    pub path: String,
    /// Route name, `None` for paths the table does not know.
    pub name: Option<String>,
    pub meta: RouteMeta,
}

/// Ordered set of routes plus path aliases.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    aliases: Vec<(String, String)>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The certificate tracking application's routes.
    pub fn standard() -> Self {
        Self::new()
            .alias(paths::ROOT, paths::LANDING)
            .route(Route::new(paths::LOGIN, "login", RouteMeta::PUBLIC))
            .route(Route::new(paths::REGISTER, "register", RouteMeta::PUBLIC))
            .route(Route::new(
                paths::FORGOT_PASSWORD,
                "forgot-password",
                RouteMeta::PUBLIC,
            ))
            .route(Route::new(
                paths::RESET_PASSWORD,
                "reset-password",
                RouteMeta::PUBLIC,
            ))
            .route(Route::new(paths::LANDING, "home", RouteMeta::AUTHENTICATED))
            .route(Route::new("/notices", "notices", RouteMeta::AUTHENTICATED))
            .route(Route::new("/profile", "profile", RouteMeta::AUTHENTICATED))
            .route(Route::new(
                "/certificates",
                "certificates",
                RouteMeta::for_role(Role::Student),
            ))
            .route(Route::new(
                "/review",
                "review",
                RouteMeta::for_role(Role::Teacher),
            ))
            .route(Route::new(
                "/review-log",
                "review-log",
                RouteMeta::for_role(Role::Teacher),
            ))
            .route(Route::new(
                "/review-history",
                "review-history",
                RouteMeta::for_role(Role::Teacher),
            ))
            .route(Route::new("/users", "users", RouteMeta::for_role(Role::Admin)))
            .route(Route::new(
                "/users/new",
                "users-new",
                RouteMeta::for_role(Role::Admin),
            ))
    }

    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Makes `from` resolve to `to`.
    pub fn alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.aliases.push((from.into(), to.into()));
        self
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolves a raw path: strips the query/fragment and a trailing slash,
    /// expands aliases, then looks up the route. Unknown paths resolve with
    /// empty metadata.
    pub fn resolve(&self, raw_path: &str) -> ResolvedRoute {
        let path = normalize_path(raw_path);
        let path = self
            .aliases
            .iter()
            .find(|(from, _)| *from == path)
            .map(|(_, to)| to.clone())
            .unwrap_or(path);

        match self.routes.iter().find(|route| route.path == path) {
            Some(route) => ResolvedRoute {
                path,
                name: Some(route.name.clone()),
                meta: route.meta,
            },
            None => ResolvedRoute {
                path,
                name: None,
                meta: RouteMeta::default(),
            },
        }
    }
}

fn normalize_path(raw_path: &str) -> String {
    let path = raw_path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();

    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        paths::ROOT.to_string()
    } else {
        trimmed.to_string()
    }
}
