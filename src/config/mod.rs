//! Configuration layer for the `postcodes` command-line tool.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`], [`Action`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - `--base-url`, `--timeout`, `--user-agent`
//! 2. **TOML config file** - `[api]` and `[http]` sections
//! 3. **Built-in defaults** - the public API, a 30 second timeout, the crate user agent
//!
//! Only transport settings are configurable. What a command sends is decided
//! by its arguments alone.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Action, Cli, Command, parse_geolocation};
pub use error::ConfigError;
pub use toml::{ApiSection, HttpSection, TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
