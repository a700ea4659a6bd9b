//! Configuration resolution for the Newsdesk admin server.
//!
//! Values are layered, lowest to highest priority:
//! 1. Built-in defaults
//! 2. Settings file (JSON, optional)
//! 3. Environment variables and CLI arguments (resolved by the binary)
//!
//! The admin password and signing secret have no defaults. A missing value
//! is reported as [`Error::Config`] at startup rather than leaving the admin
//! area open.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Port the admin server binds to when nothing else is configured.
pub const DEFAULT_PORT: u16 = 8080;

/// Admin server configuration.
///
/// Every field is optional so that layers can be merged field by field.
#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    /// Password accepted by the login endpoint.
    #[serde(default)]
    pub admin_password: Option<String>,
    /// Secret the session signing key is derived from.
    #[serde(default)]
    pub admin_secret: Option<String>,
    #[serde(default)]
    pub listen_addr: Option<SocketAddr>,
    /// Mark the session cookie `Secure` (HTTPS deployments).
    #[serde(default)]
    pub secure_cookies: Option<bool>,
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("admin_password", &redacted(self.admin_password.as_deref()))
            .field("admin_secret", &redacted(self.admin_secret.as_deref()))
            .field("listen_addr", &self.listen_addr)
            .field("secure_cookies", &self.secure_cookies)
            .finish()
    }
}

const fn redacted(value: Option<&str>) -> &'static str {
    match value {
        Some(_) => "<redacted>",
        None => "<unset>",
    }
}

impl AdminConfig {
    /// Address to listen on, falling back to `0.0.0.0:8080`.
    pub fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    pub fn secure_cookies(&self) -> bool {
        self.secure_cookies.unwrap_or(false)
    }

    /// The configured admin password, or an error if unset or empty.
    pub fn require_password(&self) -> Result<&str> {
        non_empty(self.admin_password.as_deref(), "ADMIN_PASSWORD")
    }

    /// The configured signing secret, or an error if unset or empty.
    ///
    /// Length rules are enforced by the signer that consumes it.
    pub fn require_secret(&self) -> Result<&str> {
        non_empty(self.admin_secret.as_deref(), "ADMIN_SECRET")
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merge(&mut self, other: Self) {
        if other.admin_password.is_some() {
            self.admin_password = other.admin_password;
        }
        if other.admin_secret.is_some() {
            self.admin_secret = other.admin_secret;
        }
        if other.listen_addr.is_some() {
            self.listen_addr = other.listen_addr;
        }
        if other.secure_cookies.is_some() {
            self.secure_cookies = other.secure_cookies;
        }
    }
}

fn non_empty<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::Config(format!("{name} is not set"))),
    }
}

/// Resolve the admin configuration.
///
/// `settings_file` is read when given; `overrides` (environment and CLI
/// values) are applied last.
pub fn load_config(settings_file: Option<&Path>, overrides: AdminConfig) -> Result<AdminConfig> {
    let mut config = AdminConfig::default();

    if let Some(path) = settings_file {
        let file = load_config_file(path)?;
        config.merge(file);
    }

    config.merge(overrides);
    Ok(config)
}

fn load_config_file(path: &Path) -> Result<AdminConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_8080_without_secure_cookies() {
        let config = AdminConfig::default();
        assert_eq!(config.listen_addr().port(), DEFAULT_PORT);
        assert!(!config.secure_cookies());
    }

    #[test]
    fn missing_credentials_are_config_errors() {
        let config = AdminConfig::default();
        assert!(matches!(config.require_password(), Err(Error::Config(_))));
        assert!(matches!(config.require_secret(), Err(Error::Config(_))));

        let empty = AdminConfig {
            admin_password: Some(String::new()),
            ..AdminConfig::default()
        };
        assert!(empty.require_password().is_err());
    }

    #[test]
    fn overrides_win_over_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin.json");
        std::fs::write(
            &path,
            r#"{"admin_password": "from-file", "listen_addr": "127.0.0.1:9000", "secure_cookies": true}"#,
        )
        .unwrap();

        let overrides = AdminConfig {
            admin_password: Some("from-env".into()),
            ..AdminConfig::default()
        };
        let config = load_config(Some(&path), overrides).unwrap();

        assert_eq!(config.require_password().unwrap(), "from-env");
        assert_eq!(config.listen_addr(), "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert!(config.secure_cookies());
    }

    #[test]
    fn unknown_settings_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin.json");
        std::fs::write(&path, r#"{"admin_pasword": "typo"}"#).unwrap();

        let err = load_config(Some(&path), AdminConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("Failed to parse config file"));
        assert!(err.to_string().contains("admin.json"));
    }

    #[test]
    fn missing_settings_file_is_reported() {
        let err = load_config(Some(Path::new("/nonexistent/admin.json")), AdminConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("/nonexistent/admin.json"));
    }

    #[test]
    fn debug_output_redacts_credentials() {
        let config = AdminConfig {
            admin_password: Some("hunter2-password".into()),
            admin_secret: Some("s".repeat(40)),
            ..AdminConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains(&"s".repeat(40)));
        assert!(rendered.contains("<redacted>"));
    }
}
