//! Client for the postcodes.io API.
//!
//! This module provides:
//! - The client itself ([`PostcodeClient`])
//! - Path and query construction ([`Endpoint`], [`format_coordinate`])
//! - Response envelope decoding ([`ResultEnvelope`], [`unwrap_result`])
//! - Wire data types ([`PostcodeDetails`], [`Geolocation`], [`ReverseGeocodeEntry`])
//! - Errors ([`PostcodeError`])
//!
//! # Result policy
//!
//! Each endpoint decides once what a null `result` means:
//! - single-resource lookups (`get_postcode`, `get_outward_code`,
//!   `get_random_postcode`, `get_terminated_postcode`) fail with
//!   [`PostcodeError::NotFound`]
//! - list endpoints (`query`, `nearest`, `autocomplete`, the coordinate and
//!   nearest-outcode searches, `bulk_reverse_geocoding`) return an empty `Vec`
//! - `validate` and `get_postcodes` treat null as a malformed response
//!
//! An HTTP 404 is [`PostcodeError::NotFound`] on every endpoint.

mod endpoint;
mod envelope;
mod error;
mod service;
mod types;

#[cfg(test)]
mod envelope_tests;

pub use endpoint::{
    DEFAULT_NEAREST_LIMIT, DEFAULT_NEAREST_RADIUS, Endpoint, MAX_NEAREST_LIMIT,
    MAX_NEAREST_RADIUS, clamp_limit, clamp_radius, format_coordinate, is_dot_segment,
};
pub use envelope::{ResultEnvelope, error_message, unwrap_result};
pub use error::PostcodeError;
pub use service::{DEFAULT_BASE_URL, MAX_BULK_GEOLOCATIONS, MAX_BULK_POSTCODES, PostcodeClient};
pub use types::{BulkEntry, Geolocation, PostcodeDetails, ReverseGeocodeEntry};
