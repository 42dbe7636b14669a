//! Data types exchanged with the postcode API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Details of one postcode or outward code as returned by the API.
///
/// The client does not interpret the fields; it keeps the JSON object
/// exactly as received and serializes back to it. Accessors exist for the
/// handful of fields every record carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostcodeDetails(Map<String, Value>);

impl PostcodeDetails {
    /// Returns the raw value of a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns a field as a string, if present and a string.
    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Returns a field as a number, if present and numeric.
    #[must_use]
    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.0.get(field).and_then(Value::as_f64)
    }

    /// The `postcode` field.
    #[must_use]
    pub fn postcode(&self) -> Option<&str> {
        self.get_str("postcode")
    }

    /// The `outcode` field.
    #[must_use]
    pub fn outcode(&self) -> Option<&str> {
        self.get_str("outcode")
    }

    /// The `longitude` field.
    #[must_use]
    pub fn longitude(&self) -> Option<f64> {
        self.get_f64("longitude")
    }

    /// The `latitude` field.
    #[must_use]
    pub fn latitude(&self) -> Option<f64> {
        self.get_f64("latitude")
    }

    /// All fields as received.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the details and returns the underlying JSON object.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for PostcodeDetails {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// A point to reverse geocode in a bulk request.
///
/// Serializes to `{"longitude": .., "latitude": ..}` plus `radius` (meters)
/// and `limit` only when they are set and non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geolocation {
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Search radius in meters
    #[serde(default, skip_serializing_if = "is_unset")]
    pub radius: Option<u32>,
    /// Maximum number of postcodes to return for this point
    #[serde(default, skip_serializing_if = "is_unset")]
    pub limit: Option<u32>,
}

// Zero means "use the API default", so it is left off the wire like `None`.
#[allow(clippy::ref_option)] // serde passes skip predicates a reference
fn is_unset(value: &Option<u32>) -> bool {
    value.is_none_or(|v| v == 0)
}

impl Geolocation {
    /// Creates a geolocation with no radius or limit.
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            radius: None,
            limit: None,
        }
    }

    /// Sets the search radius in meters.
    #[must_use]
    pub const fn with_radius(mut self, radius: u32) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Sets the maximum number of results.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// One entry of a bulk response: the query as echoed by the API and its result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkEntry<Q, R> {
    /// The input this entry answers
    pub query: Q,
    /// The lookup result, `None` when the input matched nothing
    pub result: Option<R>,
}

/// One entry of a bulk reverse geocoding response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseGeocodeEntry {
    /// The geolocation as echoed by the API
    pub query: Value,
    /// Postcodes near the point; empty when there are none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub result: Vec<PostcodeDetails>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
