//! Auth error types.

/// Errors from issuing tokens or building the signer.
///
/// Verification never produces one of these: a token that fails to verify
/// for any reason is simply rejected.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing or unusable secret/password. Fatal; never falls back to an
    /// unsigned mode.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid claims: expiry {expires_at} is not after issue time {issued_at}")]
    InvalidClaims { issued_at: i64, expires_at: i64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
