//! Navigation shell: nav items and per-navigation route decisions.

use inkpress_routes::{default_whitelist, evaluate, routes, RouteDecision};

/// Where the catch-all route sends the viewer.
pub const CATCH_ALL_TARGET: &str = "/";

/// A navigation chrome entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub path: &'static str,
}

/// The nav items: routes flagged visible, in table order.
pub fn nav_items() -> Vec<NavItem> {
    routes()
        .iter()
        .filter(|route| route.visible)
        .map(|route| NavItem {
            name: route.name,
            path: route.path,
        })
        .collect()
}

/// Decide the requested route against the shipped whitelist.
pub fn decide_route(path: &str, has_session: bool) -> RouteDecision {
    evaluate(path, has_session, default_whitelist())
}
