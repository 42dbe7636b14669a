//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::client::Geolocation;

/// postcodes: query the postcodes.io UK postcode API
///
/// Looks up, validates and reverse geocodes UK postcodes. Results are
/// printed as JSON.
#[derive(Debug, Parser)]
#[command(name = "postcodes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// API base URL
    #[arg(long = "base-url", global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long = "user-agent", global = true)]
    pub user_agent: Option<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for postcodes
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = super::defaults::CONFIG_FILE)]
        output: PathBuf,
    },

    #[command(flatten)]
    Action(Action),
}

/// Commands that answer a postcode question.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Action {
    /// Ask the API whether a postcode exists (exit code 3 if not)
    Validate {
        /// Postcode to validate
        postcode: String,
    },

    /// Check the postcode format offline (exit code 3 if invalid)
    Check {
        /// Postcode to check
        postcode: String,
    },

    /// Look up a single postcode
    Lookup {
        /// Postcode to look up
        postcode: String,
    },

    /// Look up many postcodes in one request
    Bulk {
        /// Postcodes to look up (at most 100)
        #[arg(required = true)]
        postcodes: Vec<String>,

        /// Only return these fields (repeatable or comma separated)
        #[arg(long, value_delimiter = ',', value_name = "FIELD")]
        filter: Vec<String>,
    },

    /// Look up an outward code
    Outcode {
        /// Outward code, e.g. N11
        outcode: String,
    },

    /// Return a random postcode
    Random,

    /// Free-text postcode search
    Query {
        /// Search text
        text: String,
    },

    /// Postcodes nearest to a postcode
    Nearest {
        /// Postcode to search around
        postcode: String,
    },

    /// Look up a terminated postcode
    Terminated {
        /// Terminated postcode
        postcode: String,
    },

    /// Complete a partial postcode
    Autocomplete {
        /// Start of a postcode
        partial: String,
    },

    /// Outward codes nearest to a coordinate
    OutcodesNear {
        /// Longitude in decimal degrees
        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        /// Latitude in decimal degrees
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
    },

    /// Outward codes nearest to an outward code
    NearestOutcode {
        /// Outward code to search around
        outcode: String,

        /// Maximum number of results (default 10, at most 100)
        #[arg(long)]
        limit: Option<u32>,

        /// Search radius in meters (default 5000, at most 25000)
        #[arg(long)]
        radius: Option<u32>,
    },

    /// Postcodes nearest to a coordinate
    PostcodesNear {
        /// Longitude in decimal degrees
        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        /// Latitude in decimal degrees
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
    },

    /// Reverse geocode many points in one request
    Reverse {
        /// Points as lon,lat[,radius[,limit]] (at most 100)
        #[arg(
            required = true,
            value_name = "LON,LAT[,RADIUS[,LIMIT]]",
            value_parser = parse_geolocation,
            allow_hyphen_values = true
        )]
        points: Vec<Geolocation>,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Parses CLI arguments from an iterator, returning usage errors.
    ///
    /// # Errors
    ///
    /// Returns the clap error for unknown flags, missing or malformed values.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}

/// Parses `lon,lat[,radius[,limit]]` into a [`Geolocation`].
///
/// # Errors
///
/// Returns a message naming the first part that is missing or malformed.
pub fn parse_geolocation(value: &str) -> Result<Geolocation, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if !(2..=4).contains(&parts.len()) {
        return Err(format!(
            "expected lon,lat[,radius[,limit]], got {} parts",
            parts.len()
        ));
    }

    let longitude = parse_coordinate("longitude", parts[0])?;
    let latitude = parse_coordinate("latitude", parts[1])?;
    let mut point = Geolocation::new(longitude, latitude);

    if let Some(radius) = parts.get(2) {
        point = point.with_radius(parse_count("radius", radius)?);
    }
    if let Some(limit) = parts.get(3) {
        point = point.with_limit(parse_count("limit", limit)?);
    }

    Ok(point)
}

fn parse_coordinate(axis: &str, value: &str) -> Result<f64, String> {
    let parsed: f64 = value
        .parse()
        .map_err(|_| format!("invalid {axis} '{value}'"))?;
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(format!("{axis} must be a finite number, got '{value}'"))
    }
}

fn parse_count(name: &str, value: &str) -> Result<u32, String> {
    value
        .parse()
        .map_err(|_| format!("invalid {name} '{value}': expected a non-negative integer"))
}
