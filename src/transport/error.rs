//! Error types for HTTP operations.

use thiserror::Error;

/// Error type for HTTP transport operations.
///
/// Describes what went wrong on the wire. The postcode client never retries;
/// these errors surface to the caller unchanged.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The transport itself could not be constructed (TLS backend, bad user agent, ...).
    #[error("Invalid HTTP client configuration: {0}")]
    Configuration(String),
}
