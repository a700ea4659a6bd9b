//! Admin password check.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::error::AuthError;

/// The configured admin password.
///
/// Comparison is constant-time in the content. Length mismatches return
/// early, which only reveals the password length.
#[derive(Clone)]
pub struct AdminPassword(Zeroizing<String>);

impl fmt::Debug for AdminPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminPassword(<redacted>)")
    }
}

impl AdminPassword {
    pub fn new(password: &str) -> Result<Self, AuthError> {
        if password.is_empty() {
            return Err(AuthError::Configuration("ADMIN_PASSWORD is not set".into()));
        }
        Ok(Self(Zeroizing::new(password.to_owned())))
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}
