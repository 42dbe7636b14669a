//! postcodes-io: a client for the postcodes.io UK postcode API
//!
//! Validates, looks up and reverse geocodes UK postcodes. The transport is
//! injected through [`transport::HttpClient`], so the client can be driven by
//! [`transport::ReqwestClient`] in production and by a scripted mock in tests.

pub mod client;
pub mod config;
pub mod transport;
pub mod validation;

#[cfg(test)]
mod test_fixtures;
