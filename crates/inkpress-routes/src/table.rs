//! The client-visible route table.

use serde::Serialize;

/// A route entry: path pattern plus its navigation visibility flag.
#[derive(Debug, Clone, Serialize)]
pub struct RouteConfig {
    pub name: &'static str,
    pub path: &'static str,
    /// Whether the route appears in the navigation chrome. Independent of
    /// access control.
    pub visible: bool,
}

/// The route table. `*` is the catch-all, redirected to `/` by the shell.
pub fn routes() -> &'static [RouteConfig] {
    &ROUTES
}

static ROUTES: [RouteConfig; 11] = [
    RouteConfig {
        name: "Home",
        path: "/",
        visible: true,
    },
    RouteConfig {
        name: "Explore",
        path: "/explore",
        visible: true,
    },
    RouteConfig {
        name: "Search",
        path: "/search",
        visible: true,
    },
    RouteConfig {
        name: "Pricing",
        path: "/pricing",
        visible: true,
    },
    RouteConfig {
        name: "Newsletter",
        path: "/newsletter",
        visible: true,
    },
    RouteConfig {
        name: "Write",
        path: "/create",
        visible: false,
    },
    RouteConfig {
        name: "Post",
        path: "/post/:slug",
        visible: false,
    },
    RouteConfig {
        name: "Analytics",
        path: "/analytics",
        visible: false,
    },
    RouteConfig {
        name: "Payment Success",
        path: "/payment-success",
        visible: false,
    },
    RouteConfig {
        name: "Login",
        path: "/login",
        visible: false,
    },
    RouteConfig {
        name: "Not Found",
        path: "*",
        visible: false,
    },
];

/// Paths reachable without an authenticated session.
///
/// Note the absence of a trailing `*`: everything not listed here requires
/// a session.
pub fn default_whitelist() -> &'static [&'static str] {
    &[
        "/",
        "/login",
        "/explore",
        "/search",
        "/pricing",
        "/newsletter",
        "/post/*",
        "/profile/*",
        "/payment-success",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_table_covers_client_routes() {
        let paths: Vec<&str> = routes().iter().map(|r| r.path).collect();
        for expected in [
            "/",
            "/explore",
            "/search",
            "/pricing",
            "/newsletter",
            "/create",
            "/post/:slug",
            "/analytics",
            "/payment-success",
            "/login",
            "*",
        ] {
            assert!(paths.contains(&expected), "missing route {expected}");
        }
    }

    #[test]
    fn test_gated_routes_are_not_in_navigation() {
        for route in routes() {
            if matches!(route.path, "/create" | "/analytics") {
                assert!(!route.visible, "{} should not be in navigation", route.path);
            }
        }
    }

    #[test]
    fn test_default_whitelist_has_no_catch_all() {
        assert!(!default_whitelist().contains(&"*"));
        assert!(default_whitelist().contains(&"/post/*"));
    }
}
