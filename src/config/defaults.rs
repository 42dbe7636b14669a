//! Default values for configuration options.

use std::time::Duration;

/// Default API base URL.
pub const BASE_URL: &str = crate::client::DEFAULT_BASE_URL;

/// Default request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default `User-Agent` header value.
pub const USER_AGENT: &str = concat!("postcodes-io/", env!("CARGO_PKG_VERSION"));

/// Default path written by `postcodes init`.
pub const CONFIG_FILE: &str = "postcodes.toml";

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}
