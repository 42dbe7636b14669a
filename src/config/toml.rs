//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API endpoint section
    #[serde(default)]
    pub api: ApiSection,

    /// HTTP transport section
    #[serde(default)]
    pub http: HttpSection,
}

/// API endpoint section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// Base URL all endpoint paths are appended to
    pub base_url: Option<String>,
}

/// HTTP transport section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    /// Request timeout in seconds
    pub timeout: Option<u64>,

    /// `User-Agent` header value
    pub user_agent: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    format!(
        r#"# postcodes configuration file
# Pass it with: postcodes --config postcodes.toml <command>

[api]
# Base URL of the postcodes.io API (default: {base_url})
# Point this at a self-hosted instance if you run one.
# base_url = "{base_url}"

[http]
# Request timeout in seconds (default: {timeout})
# timeout = {timeout}

# User-Agent header sent with every request (default: {user_agent})
# user_agent = "{user_agent}"
"#,
        base_url = super::defaults::BASE_URL,
        timeout = super::defaults::TIMEOUT_SECS,
        user_agent = super::defaults::USER_AGENT,
    )
}
