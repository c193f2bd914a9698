//! Admin session check
//!
//! The back-office routes are gated by a single shared token, carried either
//! in the `admin_session` cookie or an `x-admin-token` header. No further
//! auth semantics live here; identity is the SaaS auth provider's problem.

/// Cookie holding the admin session token
pub const ADMIN_COOKIE: &str = "admin_session";
/// Header alternative used by the admin SPA's fetch calls
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Extract the admin session value from a `Cookie` header.
pub fn session_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(ADMIN_COOKIE).and_then(|rest| rest.strip_prefix('=')))
}

/// Check an incoming request's credentials against the configured token.
/// An empty configured token locks the admin surface entirely.
pub fn is_authorized(
    cookie_header: Option<&str>,
    token_header: Option<&str>,
    expected: &str,
) -> bool {
    if expected.is_empty() {
        return false;
    }
    if token_header == Some(expected) {
        return true;
    }
    cookie_header
        .and_then(session_from_cookie_header)
        .map(|session| session == expected)
        .unwrap_or(false)
}
