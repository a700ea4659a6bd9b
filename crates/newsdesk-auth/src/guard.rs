//! Request-facing session check.

use std::sync::Arc;

use crate::claims::{Claims, now_secs};
use crate::signer::SessionSigner;

/// Name of the cookie carrying the admin session token.
pub const SESSION_COOKIE: &str = "admin_session";

/// Outcome of checking a request's session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed(Claims),
    /// No cookie, bad signature, malformed or expired. Deliberately not
    /// broken down further.
    Denied,
}

impl Access {
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }

    pub const fn claims(&self) -> Option<&Claims> {
        match self {
            Self::Allowed(claims) => Some(claims),
            Self::Denied => None,
        }
    }
}

/// Turns an inbound session cookie value into an [`Access`] decision.
///
/// Holds no mutable state; clones share the same signer and can be used
/// from any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    signer: Arc<SessionSigner>,
}

impl SessionGuard {
    pub const fn new(signer: Arc<SessionSigner>) -> Self {
        Self { signer }
    }

    pub fn signer(&self) -> &SessionSigner {
        &self.signer
    }

    /// Check a cookie value against the wall clock.
    pub fn authenticate(&self, cookie: Option<&str>) -> Access {
        self.authenticate_at(cookie, now_secs())
    }

    pub fn authenticate_at(&self, cookie: Option<&str>, now: i64) -> Access {
        cookie
            .filter(|token| !token.is_empty())
            .and_then(|token| self.signer.claims_at(token, now))
            .map_or(Access::Denied, Access::Allowed)
    }
}
