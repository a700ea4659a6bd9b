//! Shared application state.

use std::sync::Arc;

use newsdesk_auth::{AdminPassword, AuthError, SessionGuard, SessionSigner};
use newsdesk_core::AdminConfig;

/// Immutable state shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub guard: SessionGuard,
    pub password: Arc<AdminPassword>,
    /// Add `Secure` to the session cookie.
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(password: AdminPassword, signer: SessionSigner, secure_cookies: bool) -> Self {
        Self {
            guard: SessionGuard::new(Arc::new(signer)),
            password: Arc::new(password),
            secure_cookies,
        }
    }

    /// Validate credentials from `config` and build the state.
    ///
    /// A missing password, missing secret or short secret is an error here,
    /// so the server refuses to start instead of serving an open admin area.
    pub fn from_config(config: &AdminConfig) -> newsdesk_core::Result<Self> {
        let password = AdminPassword::new(config.require_password()?).map_err(config_error)?;
        let signer = SessionSigner::new(config.require_secret()?).map_err(config_error)?;
        Ok(Self::new(password, signer, config.secure_cookies()))
    }
}

fn config_error(err: AuthError) -> newsdesk_core::Error {
    match err {
        AuthError::Configuration(msg) => newsdesk_core::Error::Config(msg),
        other => newsdesk_core::Error::Config(other.to_string()),
    }
}
