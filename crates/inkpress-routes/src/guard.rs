//! Whitelist route guard.

use serde::Serialize;
use tracing::debug;

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    /// Render the requested route.
    Allow,
    /// No session and the path is not public: send the viewer to the entry
    /// point.
    RedirectToLogin,
}

fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

/// Whether `path` matches an entry of the whitelist.
///
/// Entries match exactly, except a trailing `*` segment which matches any
/// suffix (`/post/*` matches `/post/my-slug` and the bare `/post`); a bare
/// `*` entry matches every path.
pub fn is_whitelisted(path: &str, whitelist: &[&str]) -> bool {
    let path = normalize(path);
    whitelist.iter().any(|entry| {
        if *entry == "*" {
            return true;
        }
        match entry.strip_suffix("/*") {
            Some(prefix) => {
                path == normalize(prefix) || path.starts_with(&format!("{}/", normalize(prefix)))
            }
            None => path == normalize(entry),
        }
    })
}

/// Decide whether to render `path` for a viewer with or without a session.
pub fn evaluate(path: &str, has_session: bool, whitelist: &[&str]) -> RouteDecision {
    if has_session || is_whitelisted(path, whitelist) {
        RouteDecision::Allow
    } else {
        debug!(path, "Route not whitelisted; redirecting to login");
        RouteDecision::RedirectToLogin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::default_whitelist;

    #[test]
    fn test_exact_match() {
        assert!(is_whitelisted("/pricing", default_whitelist()));
        assert!(is_whitelisted("/", default_whitelist()));
        assert!(!is_whitelisted("/settings", default_whitelist()));
    }

    #[test]
    fn test_wildcard_matches_suffix() {
        assert!(is_whitelisted("/post/my-slug", default_whitelist()));
        assert!(is_whitelisted("/post/my-slug/comments", default_whitelist()));
        assert!(is_whitelisted("/profile/ada", default_whitelist()));
        assert!(is_whitelisted("/post", default_whitelist()));
    }

    #[test]
    fn test_wildcard_does_not_leak_to_siblings() {
        assert!(!is_whitelisted("/posts", default_whitelist()));
        assert!(!is_whitelisted("/postman", default_whitelist()));
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        assert!(is_whitelisted("/pricing/", default_whitelist()));
        assert!(is_whitelisted("/post/my-slug/", default_whitelist()));
    }

    #[test]
    fn test_bare_star_matches_everything() {
        let whitelist = ["*"];
        assert!(is_whitelisted("/anything/at/all", &whitelist));
        assert_eq!(
            evaluate("/settings", false, &whitelist),
            RouteDecision::Allow
        );
    }

    #[test]
    fn test_guard_without_session() {
        // whitelisted path: access granted without a session
        assert_eq!(
            evaluate("/post/my-slug", false, default_whitelist()),
            RouteDecision::Allow
        );
        // unlisted path: redirected
        assert_eq!(
            evaluate("/settings", false, default_whitelist()),
            RouteDecision::RedirectToLogin
        );
        assert_eq!(
            evaluate("/analytics", false, default_whitelist()),
            RouteDecision::RedirectToLogin
        );
    }

    #[test]
    fn test_guard_with_session_allows_everything() {
        assert_eq!(
            evaluate("/settings", true, default_whitelist()),
            RouteDecision::Allow
        );
        assert_eq!(
            evaluate("/analytics", true, default_whitelist()),
            RouteDecision::Allow
        );
    }
}
