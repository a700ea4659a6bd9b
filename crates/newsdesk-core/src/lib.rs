//! `Newsdesk` Core Library
//!
//! Shared functionality for `Newsdesk` components:
//! - Admin configuration loading and validation
//! - Tracing/logging initialization
//! - Common error types

pub mod config;
pub mod error;
pub mod tracing_init;

pub use config::AdminConfig;
pub use error::{Error, Result};
