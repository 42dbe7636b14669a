//! Error types for postcode client operations.

use thiserror::Error;

use crate::transport::HttpError;

/// Error type for [`PostcodeClient`](super::PostcodeClient) operations.
///
/// "No match" on list-returning endpoints is not an error: those methods
/// return an empty `Vec`. [`NotFound`](Self::NotFound) is reserved for
/// lookups of one specific resource.
#[derive(Debug, Error)]
pub enum PostcodeError {
    /// The transport failed (DNS, connection, timeout).
    #[error("Transport error: {0}")]
    Transport(#[from] HttpError),

    /// The API answered 404, or `result` was null for a single-resource lookup.
    #[error("Not found: {resource}")]
    NotFound {
        /// API path of the resource that does not exist
        resource: String,
    },

    /// The API answered with a non-success status other than 404.
    #[error("API returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: http::StatusCode,
        /// The `error` field of the API response, or the canonical reason
        message: String,
    },

    /// The body was not a JSON envelope with a `result` of the expected shape.
    #[error("Malformed response: {reason}")]
    MalformedResponse {
        /// What was wrong with the body
        reason: String,
    },

    /// A required text input was blank.
    #[error("{field} must not be empty")]
    EmptyInput {
        /// Name of the input
        field: &'static str,
    },

    /// A bulk call was given no items.
    #[error("Bulk request must contain at least one {item}")]
    EmptyBatch {
        /// What the batch contains
        item: &'static str,
    },

    /// A bulk call was given more items than the API accepts.
    #[error("Bulk request contains {len} {item} entries, the API accepts at most {max}")]
    BatchTooLarge {
        /// What the batch contains
        item: &'static str,
        /// Number of items provided
        len: usize,
        /// API maximum
        max: usize,
    },

    /// A coordinate was NaN or infinite.
    #[error("Invalid {axis}: {value} is not a finite number")]
    InvalidCoordinate {
        /// `longitude` or `latitude`
        axis: &'static str,
        /// The rejected value
        value: f64,
    },

    /// The base URL cannot have API paths appended to it.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// An input would be dropped from the URL path (`.` or `..`).
    #[error("'{segment}' cannot be sent as a path segment")]
    InvalidPathSegment {
        /// The rejected segment
        segment: String,
    },

    /// The request body could not be encoded as JSON.
    #[error("Failed to encode request body: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl PostcodeError {
    /// Creates a `MalformedResponse` error.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Returns true if the error means the requested resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if the error came from the transport rather than the API.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
