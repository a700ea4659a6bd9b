//! Error types for `Newsdesk` core library.

use thiserror::Error;

/// Result type alias using `Newsdesk` Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for `Newsdesk` operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
