//! services/client/src/error.rs
//!
//! Defines the primary error type for the `docquery` client.

use crate::config::ConfigError;
use docquery_core::ValidationError;

/// The primary error type for the client binary.
///
/// Transport failures during a session never end up here; the session
/// controller absorbs them. This covers startup and terminal I/O.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Local input was rejected before anything was sent (e.g. an empty file).
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Building the HTTP client failed (e.g. TLS backend initialisation).
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Represents a standard Input/Output error (reading a file, the terminal).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}
