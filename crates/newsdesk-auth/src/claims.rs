//! Claims carried inside an admin session token.

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Validity window of a session, in seconds (8 hours). Also the cookie
/// `Max-Age`.
pub const SESSION_TTL_SECS: i64 = 8 * 60 * 60;

/// Issue/expiry timestamps of a session, in unix seconds.
///
/// Serialized as `{"iat": .., "exp": ..}`. `exp > iat` always holds; a
/// payload that violates it does not deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawClaims")]
pub struct Claims {
    #[serde(rename = "iat")]
    issued_at: i64,
    #[serde(rename = "exp")]
    expires_at: i64,
}

#[derive(Deserialize)]
struct RawClaims {
    iat: i64,
    exp: i64,
}

impl TryFrom<RawClaims> for Claims {
    type Error = AuthError;

    fn try_from(raw: RawClaims) -> Result<Self, Self::Error> {
        Self::new(raw.iat, raw.exp)
    }
}

impl Claims {
    pub fn new(issued_at: i64, expires_at: i64) -> Result<Self, AuthError> {
        if expires_at <= issued_at {
            return Err(AuthError::InvalidClaims {
                issued_at,
                expires_at,
            });
        }
        Ok(Self {
            issued_at,
            expires_at,
        })
    }

    /// Claims for a session starting at `now` and lasting [`SESSION_TTL_SECS`].
    pub fn starting_at(now: i64) -> Result<Self, AuthError> {
        Self::new(now, now.saturating_add(SESSION_TTL_SECS))
    }

    pub const fn issued_at(&self) -> i64 {
        self.issued_at
    }

    pub const fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// Hard boundary, no leeway: expired from `expires_at` onwards.
    pub const fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

/// Current wall-clock time in unix seconds.
pub fn now_secs() -> i64 {
    #[allow(clippy::cast_possible_wrap)]
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64;
    secs
}
