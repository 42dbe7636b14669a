//! Path and query construction for API endpoints.
//!
//! An [`Endpoint`] is the typed description of one call: method, path
//! segments relative to the base URL, form-encoded query pairs and an
//! optional JSON body. [`Endpoint::to_request`] resolves it against the
//! base URL into an [`HttpRequest`] for the transport.
//!
//! Path segments go through URL path-segment encoding, so a space in
//! `N11 1QZ` becomes `%20` on the wire and decodes back to the literal
//! postcode, while a stray `/` or `?` cannot escape its segment. URLs have
//! no way to carry a literal `.` or `..` segment, so those are rejected.

use http::Method;
use serde::Serialize;
use url::Url;

use super::PostcodeError;
use crate::transport::HttpRequest;

/// Largest `limit` accepted by the nearest outward code endpoint.
pub const MAX_NEAREST_LIMIT: u32 = 100;

/// Largest `radius` in meters accepted by the nearest outward code endpoint.
pub const MAX_NEAREST_RADIUS: u32 = 25_000;

/// Default `limit` for nearest outward code lookups.
pub const DEFAULT_NEAREST_LIMIT: u32 = 10;

/// Default `radius` in meters for nearest outward code lookups.
pub const DEFAULT_NEAREST_RADIUS: u32 = 5_000;

/// Significant digits kept when rendering coordinates into a query string.
const COORDINATE_SIGNIFICANT_DIGITS: i32 = 14;

/// A single API call, independent of the base URL it will be sent to.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    method: Method,
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
    body: Option<Vec<u8>>,
}

impl Endpoint {
    fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    /// A GET to the given path segments.
    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, segments)
    }

    /// A POST to the given path segments.
    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::POST, segments)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    /// Appends a coordinate query parameter in fixed decimal notation.
    ///
    /// # Errors
    ///
    /// Returns [`PostcodeError::InvalidCoordinate`] for NaN or infinite values.
    pub fn with_coordinate(self, key: &'static str, value: f64) -> Result<Self, PostcodeError> {
        let axis = match key {
            "lon" => "longitude",
            "lat" => "latitude",
            other => other,
        };
        let rendered =
            format_coordinate(value).ok_or(PostcodeError::InvalidCoordinate { axis, value })?;
        Ok(self.with_query(key, rendered))
    }

    /// Sets the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`PostcodeError::Serialization`] if the payload cannot be encoded.
    pub fn with_json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self, PostcodeError> {
        self.body = Some(serde_json::to_vec(payload).map_err(PostcodeError::Serialization)?);
        Ok(self)
    }

    /// The HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// The path relative to the base URL, unencoded (e.g. `postcodes/N11 1QZ`).
    #[must_use]
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    /// The query pairs, unencoded, in insertion order.
    #[must_use]
    pub fn query(&self) -> &[(&'static str, String)] {
        &self.query
    }

    /// The encoded JSON body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Resolves the endpoint against `base_url` into a transport request.
    ///
    /// The base URL's own path is kept as a prefix; its query and fragment
    /// are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`PostcodeError::InvalidBaseUrl`] if `base_url` cannot carry
    /// path segments, or [`PostcodeError::InvalidPathSegment`] if a segment
    /// is `.` or `..`.
    pub fn to_request(&self, base_url: &Url) -> Result<HttpRequest, PostcodeError> {
        if let Some(segment) = self.segments.iter().find(|s| is_dot_segment(s)) {
            return Err(PostcodeError::InvalidPathSegment {
                segment: segment.clone(),
            });
        }

        let mut url = base_url.clone();
        url.set_query(None);
        url.set_fragment(None);

        url.path_segments_mut()
            .map_err(|()| PostcodeError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(&self.segments);

        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        let mut request = HttpRequest::new(self.method.clone(), url).with_header(
            http::header::ACCEPT,
            http::HeaderValue::from_static("application/json"),
        );

        if let Some(body) = &self.body {
            request = request
                .with_header(
                    http::header::CONTENT_TYPE,
                    http::HeaderValue::from_static("application/json"),
                )
                .with_body(body.clone());
        }

        Ok(request)
    }
}

/// Returns true for `.` and `..`, which URL path resolution would drop.
#[must_use]
pub fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

/// Renders a coordinate in fixed decimal notation with 14 significant digits.
///
/// Trailing zeros are trimmed and an exponent is never produced, so
/// `0.629834723775309` becomes `0.62983472377531`, `0.0` becomes `0` and
/// `1.2e-5` becomes `0.000012`. Returns `None` for NaN or infinite values.
#[must_use]
pub fn format_coordinate(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }

    // The exponent of the rounded value decides how many decimals are significant.
    let digits = usize::try_from(COORDINATE_SIGNIFICANT_DIGITS - 1).ok()?;
    let scientific = format!("{value:.digits$e}");
    let exponent: i32 = scientific.rsplit_once('e')?.1.parse().ok()?;
    let decimals = usize::try_from((COORDINATE_SIGNIFICANT_DIGITS - 1 - exponent).max(0)).ok()?;

    let fixed = format!("{value:.decimals$}");
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };

    if trimmed == "-0" {
        return Some("0".to_string());
    }
    Some(trimmed.to_string())
}

/// Clamps a nearest-outcode `limit` to [`MAX_NEAREST_LIMIT`].
#[must_use]
pub const fn clamp_limit(limit: u32) -> u32 {
    if limit > MAX_NEAREST_LIMIT {
        MAX_NEAREST_LIMIT
    } else {
        limit
    }
}

/// Clamps a nearest-outcode `radius` to [`MAX_NEAREST_RADIUS`].
#[must_use]
pub const fn clamp_radius(radius: u32) -> u32 {
    if radius > MAX_NEAREST_RADIUS {
        MAX_NEAREST_RADIUS
    } else {
        radius
    }
}
