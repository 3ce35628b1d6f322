//! Error types for study-client
//!
//! This module provides error handling for the library, including:
//! - A typed `Unauthorized` variant for 401 responses, so callers (and the
//!   composition root) can translate authentication failure into a
//!   navigation action instead of the HTTP layer forcing one
//! - Structured application errors carrying the server's status and the
//!   human-readable message extracted from the conventional error body
//! - Transport failures (including the request timeout) via `reqwest::Error`

use thiserror::Error;

/// Result type alias for study-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Notification text used when the server provides no readable error message
/// (network failure, timeout, or an error body without an `error` field).
pub const GENERIC_CONNECTION_ERROR: &str = "server connection failed";

/// Main error type for study-client
///
/// Every failed API call resolves to exactly one variant. The failure
/// taxonomy is: transport/network failure (includes timeout), non-2xx
/// application error, and authentication failure (401, split out so the
/// caller can react to it without inspecting status codes).
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "base_url")
        key: Option<String>,
    },

    /// The server rejected the request with 401 — the session is no longer
    /// valid. The composition root should navigate to the login route.
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// Message extracted from the error body, or the generic fallback
        message: String,
    },

    /// The server returned a non-2xx status other than 401
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the server
        status: u16,
        /// Message extracted from the error body, or the generic fallback
        message: String,
    },

    /// Network error (connection failure, timeout, malformed response body)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// PDF document generation failed
    #[error("PDF generation error: {0}")]
    Pdf(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The text to surface in a transient user notification for this error.
    ///
    /// Application errors carry the message the server supplied; transport
    /// failures collapse to [`GENERIC_CONNECTION_ERROR`] because there is no
    /// response body to read a message from.
    pub fn user_message(&self) -> String {
        match self {
            Error::Unauthorized { message } | Error::Api { message, .. } => message.clone(),
            Error::Network(_) => GENERIC_CONNECTION_ERROR.to_string(),
            other => other.to_string(),
        }
    }
}
