//! Routing: route table, navigation guard and the navigator capability.

mod guard;
mod navigator;
mod route;

pub use guard::{GuardDecision, Redirect, RouteGuard};
pub use navigator::{Navigator, NoopNavigator, paths};
pub use route::{ResolvedRoute, Route, RouteMeta, RouteTable};
