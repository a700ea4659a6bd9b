//! Session cookie construction.

use axum_extra::extract::cookie::{Cookie, SameSite};
use newsdesk_auth::{SESSION_COOKIE, SESSION_TTL_SECS};
use time::Duration;

/// Cookie carrying a freshly issued session token.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::seconds(SESSION_TTL_SECS))
        .build()
}

/// Empty, immediately expiring cookie that makes the client drop the session.
pub fn cleared_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(Duration::ZERO)
        .build()
}
