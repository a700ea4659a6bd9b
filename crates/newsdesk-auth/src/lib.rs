//! `Newsdesk` admin session library
//!
//! Stateless, signed, expiring session tokens for the admin area. Nothing is
//! stored server-side: a token carries its own issue/expiry claims and an
//! HMAC over them, and every request re-verifies it.
//!
//! ## Token layout
//!
//! `base64url(json claims) "." base64url(HMAC-SHA256(key, encoded claims))`
//!
//! - **Codec**: URL-safe base64 without padding, so tokens fit in a cookie
//! - **Signer**: HMAC-SHA256 keyed by the server secret (at least 32 characters)
//! - **Guard**: cookie value in, `Allowed` / `Denied` out

pub mod claims;
pub mod codec;
pub mod error;
pub mod guard;
pub mod password;
pub mod signer;

pub use claims::{Claims, SESSION_TTL_SECS, now_secs};
pub use error::AuthError;
pub use guard::{Access, SESSION_COOKIE, SessionGuard};
pub use password::AdminPassword;
pub use signer::{MIN_SECRET_CHARS, SessionSigner};
