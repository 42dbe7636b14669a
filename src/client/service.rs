//! The postcode client: one method per API capability.

use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::endpoint::{
    DEFAULT_NEAREST_LIMIT, DEFAULT_NEAREST_RADIUS, Endpoint, clamp_limit, clamp_radius,
    is_dot_segment,
};
use super::envelope;
use super::types::{BulkEntry, Geolocation, PostcodeDetails, ReverseGeocodeEntry};
use super::PostcodeError;
use crate::transport::HttpClient;

/// Base URL of the public postcodes.io API.
pub const DEFAULT_BASE_URL: &str = "https://api.postcodes.io/";

/// Most postcodes accepted by one bulk lookup.
pub const MAX_BULK_POSTCODES: usize = 100;

/// Most geolocations accepted by one bulk reverse geocoding call.
pub const MAX_BULK_GEOLOCATIONS: usize = 100;

/// Client for the postcodes.io API.
///
/// Holds only the base URL and the injected transport; every method builds
/// its own request and issues exactly one HTTP call, so one instance can be
/// shared by concurrent callers. Nothing is retried or cached.
///
/// # Type Parameters
///
/// - `H`: The HTTP transport ([`ReqwestClient`](crate::transport::ReqwestClient) in production)
///
/// # Example
///
/// ```no_run
/// use postcodes_io::client::PostcodeClient;
/// use postcodes_io::transport::ReqwestClient;
///
/// # async fn example() -> Result<(), postcodes_io::client::PostcodeError> {
/// let client = PostcodeClient::with_default_base_url(ReqwestClient::new())?;
/// if client.validate("N11 1QZ").await? {
///     let details = client.get_postcode("N11 1QZ").await?;
///     println!("{:?}", details.outcode());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PostcodeClient<H> {
    http: H,
    base_url: Url,
}

#[derive(Serialize)]
struct BulkLookupBody<'a> {
    postcodes: Vec<&'a str>,
}

impl<H> PostcodeClient<H> {
    /// Creates a client that sends requests below `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PostcodeError::InvalidBaseUrl`] if `base_url` cannot carry
    /// path segments (e.g. `mailto:` or `data:` URLs).
    pub fn new(http: H, base_url: Url) -> Result<Self, PostcodeError> {
        if base_url.cannot_be_a_base() {
            return Err(PostcodeError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            });
        }

        Ok(Self { http, base_url })
    }

    /// Creates a client for the public API at [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`PostcodeError::InvalidBaseUrl`] if the default URL fails to parse.
    pub fn with_default_base_url(http: H) -> Result<Self, PostcodeError> {
        let base_url = Url::parse(DEFAULT_BASE_URL).map_err(|e| PostcodeError::InvalidBaseUrl {
            url: DEFAULT_BASE_URL.to_string(),
            reason: e.to_string(),
        })?;
        Self::new(http, base_url)
    }

    /// Returns the configured base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &H {
        &self.http
    }
}

impl<H: HttpClient> PostcodeClient<H> {
    /// Checks whether a postcode exists.
    ///
    /// Returns `Ok(false)` for unknown or malformed postcodes; a blank input,
    /// `.` or `..` is answered locally without a request.
    ///
    /// # Errors
    ///
    /// Transport and API failures are returned as errors, never as `false`.
    pub async fn validate(&self, postcode: &str) -> Result<bool, PostcodeError> {
        let postcode = postcode.trim();
        if postcode.is_empty() {
            tracing::debug!("Blank postcode is not valid, skipping request");
            return Ok(false);
        }
        if is_dot_segment(postcode) {
            tracing::debug!(postcode, "Dot segment is not a postcode, skipping request");
            return Ok(false);
        }

        let endpoint = Endpoint::get(["postcodes", postcode, "validate"]);
        self.execute::<bool>(&endpoint)
            .await?
            .ok_or_else(|| PostcodeError::malformed("validate returned a null result"))
    }

    /// Looks up a single postcode.
    ///
    /// # Errors
    ///
    /// Returns [`PostcodeError::NotFound`] if the postcode does not exist.
    pub async fn get_postcode(&self, postcode: &str) -> Result<PostcodeDetails, PostcodeError> {
        let postcode = require_text("postcode", postcode)?;
        self.fetch_one(Endpoint::get(["postcodes", postcode])).await
    }

    /// Looks up many postcodes in one request.
    ///
    /// The result has exactly one entry per input, in input order; an entry
    /// is `None` when that postcode matched nothing.
    ///
    /// # Errors
    ///
    /// Returns [`PostcodeError::EmptyBatch`] or [`PostcodeError::BatchTooLarge`]
    /// without sending anything when the input is empty or longer than
    /// [`MAX_BULK_POSTCODES`].
    pub async fn get_postcodes<S: AsRef<str>>(
        &self,
        postcodes: &[S],
    ) -> Result<Vec<Option<PostcodeDetails>>, PostcodeError> {
        self.get_postcodes_filtered::<S, &str>(postcodes, &[]).await
    }

    /// Looks up many postcodes, asking the API to return only `filter` fields.
    ///
    /// # Errors
    ///
    /// See [`get_postcodes`](Self::get_postcodes).
    pub async fn get_postcodes_filtered<S: AsRef<str>, F: AsRef<str>>(
        &self,
        postcodes: &[S],
        filter: &[F],
    ) -> Result<Vec<Option<PostcodeDetails>>, PostcodeError> {
        check_batch("postcode", postcodes.len(), MAX_BULK_POSTCODES)?;

        let body = BulkLookupBody {
            postcodes: postcodes.iter().map(AsRef::as_ref).collect(),
        };
        let mut endpoint = Endpoint::post(["postcodes"]).with_json(&body)?;

        let fields: Vec<&str> = filter
            .iter()
            .map(|f| f.as_ref().trim())
            .filter(|f| !f.is_empty())
            .collect();
        if !fields.is_empty() {
            endpoint = endpoint.with_query("filter", fields.join(","));
        }

        let entries: Vec<BulkEntry<String, PostcodeDetails>> = self
            .execute(&endpoint)
            .await?
            .ok_or_else(|| PostcodeError::malformed("bulk lookup returned a null result"))?;

        if entries.len() != postcodes.len() {
            return Err(PostcodeError::malformed(format!(
                "bulk lookup returned {} entries for {} postcodes",
                entries.len(),
                postcodes.len()
            )));
        }

        Ok(entries.into_iter().map(|entry| entry.result).collect())
    }

    /// Looks up an outward code (e.g. `N11`).
    ///
    /// # Errors
    ///
    /// Returns [`PostcodeError::NotFound`] if the outward code does not exist.
    pub async fn get_outward_code(&self, outcode: &str) -> Result<PostcodeDetails, PostcodeError> {
        let outcode = require_text("outcode", outcode)?;
        self.fetch_one(Endpoint::get(["outcodes", outcode])).await
    }

    /// Returns a random postcode.
    ///
    /// # Errors
    ///
    /// Returns transport, status or envelope errors.
    pub async fn get_random_postcode(&self) -> Result<PostcodeDetails, PostcodeError> {
        self.fetch_one(Endpoint::get(["random", "postcodes"])).await
    }

    /// Free-text postcode search. No match yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`PostcodeError::EmptyInput`] for blank text.
    pub async fn query(&self, text: &str) -> Result<Vec<PostcodeDetails>, PostcodeError> {
        let text = require_text("query", text)?;
        self.fetch_list(Endpoint::get(["postcodes"]).with_query("q", text))
            .await
    }

    /// Postcodes nearest to the given postcode.
    ///
    /// # Errors
    ///
    /// Returns [`PostcodeError::NotFound`] if the postcode itself does not exist.
    pub async fn nearest(&self, postcode: &str) -> Result<Vec<PostcodeDetails>, PostcodeError> {
        let postcode = require_text("postcode", postcode)?;
        self.fetch_list(Endpoint::get(["postcodes", postcode, "nearest"]))
            .await
    }

    /// Looks up a terminated postcode (year and month of termination, location).
    ///
    /// # Errors
    ///
    /// Returns [`PostcodeError::NotFound`] if the postcode was never terminated.
    pub async fn get_terminated_postcode(
        &self,
        postcode: &str,
    ) -> Result<PostcodeDetails, PostcodeError> {
        let postcode = require_text("postcode", postcode)?;
        self.fetch_one(Endpoint::get(["terminated_postcodes", postcode]))
            .await
    }

    /// Completes a partial postcode. No completion yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`PostcodeError::EmptyInput`] for a blank partial.
    pub async fn autocomplete(&self, partial: &str) -> Result<Vec<String>, PostcodeError> {
        let partial = require_text("partial postcode", partial)?;
        self.fetch_list(Endpoint::get(["postcodes", partial, "autocomplete"]))
            .await
    }

    /// Outward codes nearest to a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`PostcodeError::InvalidCoordinate`] for NaN or infinite input.
    pub async fn nearest_outward_codes_for_lng_lat(
        &self,
        longitude: f64,
        latitude: f64,
    ) -> Result<Vec<PostcodeDetails>, PostcodeError> {
        let endpoint = Endpoint::get(["outcodes"])
            .with_coordinate("lon", longitude)?
            .with_coordinate("lat", latitude)?;
        self.fetch_list(endpoint).await
    }

    /// Outward codes nearest to the given outward code.
    ///
    /// `limit` defaults to 10 and `radius` (meters) to 5000. Values above the
    /// API maxima of 100 and 25000 are clamped before sending.
    ///
    /// # Errors
    ///
    /// Returns [`PostcodeError::NotFound`] if the outward code does not exist.
    pub async fn get_nearest_outward_code(
        &self,
        outcode: &str,
        limit: Option<u32>,
        radius: Option<u32>,
    ) -> Result<Vec<PostcodeDetails>, PostcodeError> {
        let outcode = require_text("outcode", outcode)?;
        let requested_limit = limit.unwrap_or(DEFAULT_NEAREST_LIMIT);
        let requested_radius = radius.unwrap_or(DEFAULT_NEAREST_RADIUS);
        let limit = clamp_limit(requested_limit);
        let radius = clamp_radius(requested_radius);

        if limit != requested_limit || radius != requested_radius {
            tracing::debug!(
                requested_limit,
                requested_radius,
                limit,
                radius,
                "Clamped nearest outcode parameters to API maxima"
            );
        }

        let endpoint = Endpoint::get(["outcodes", outcode, "nearest"])
            .with_query("limit", limit.to_string())
            .with_query("radius", radius.to_string());
        self.fetch_list(endpoint).await
    }

    /// Postcodes nearest to a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`PostcodeError::InvalidCoordinate`] for NaN or infinite input.
    pub async fn nearest_postcodes_for_lng_lat(
        &self,
        longitude: f64,
        latitude: f64,
    ) -> Result<Vec<PostcodeDetails>, PostcodeError> {
        let endpoint = Endpoint::get(["postcodes"])
            .with_coordinate("lon", longitude)?
            .with_coordinate("lat", latitude)?;
        self.fetch_list(endpoint).await
    }

    /// Reverse geocodes many points in one request.
    ///
    /// The body is a bare JSON array of geolocations. A null result yields
    /// an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`PostcodeError::EmptyBatch`], [`PostcodeError::BatchTooLarge`]
    /// or [`PostcodeError::InvalidCoordinate`] without sending anything.
    pub async fn bulk_reverse_geocoding(
        &self,
        geolocations: &[Geolocation],
    ) -> Result<Vec<ReverseGeocodeEntry>, PostcodeError> {
        check_batch("geolocation", geolocations.len(), MAX_BULK_GEOLOCATIONS)?;

        for point in geolocations {
            check_finite("longitude", point.longitude)?;
            check_finite("latitude", point.latitude)?;
        }

        let endpoint = Endpoint::post(["postcodes"]).with_json(geolocations)?;
        self.fetch_list(endpoint).await
    }

    /// Runs a single-resource endpoint; a null result is [`PostcodeError::NotFound`].
    async fn fetch_one<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, PostcodeError> {
        self.execute(&endpoint)
            .await?
            .ok_or_else(|| PostcodeError::NotFound {
                resource: endpoint.path(),
            })
    }

    /// Runs a list endpoint; a null result is an empty list.
    async fn fetch_list<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
    ) -> Result<Vec<T>, PostcodeError> {
        let result = self.execute(&endpoint).await?;
        Ok(result.unwrap_or_else(|| {
            tracing::debug!(path = %endpoint.path(), "No matches, returning empty list");
            Vec::new()
        }))
    }

    /// Sends one request and unwraps the envelope.
    ///
    /// 404 becomes [`PostcodeError::NotFound`], any other non-2xx becomes
    /// [`PostcodeError::Status`].
    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
    ) -> Result<Option<T>, PostcodeError> {
        let request = endpoint.to_request(&self.base_url)?;
        tracing::debug!(method = %request.method, url = %request.url, "Sending postcode API request");

        let response = self.http.request(request).await?;

        if response.status == http::StatusCode::NOT_FOUND {
            tracing::debug!(path = %endpoint.path(), "Postcode API returned 404");
            return Err(PostcodeError::NotFound {
                resource: endpoint.path(),
            });
        }

        if !response.is_success() {
            let message = envelope::error_message(&response.body).unwrap_or_else(|| {
                response
                    .status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string()
            });
            tracing::warn!(status = %response.status, %message, "Postcode API request failed");
            return Err(PostcodeError::Status {
                status: response.status,
                message,
            });
        }

        envelope::unwrap_result(&response.body)
    }
}

fn require_text<'a>(field: &'static str, value: &'a str) -> Result<&'a str, PostcodeError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(PostcodeError::EmptyInput { field });
    }
    Ok(value)
}

fn check_batch(item: &'static str, len: usize, max: usize) -> Result<(), PostcodeError> {
    if len == 0 {
        return Err(PostcodeError::EmptyBatch { item });
    }
    if len > max {
        return Err(PostcodeError::BatchTooLarge { item, len, max });
    }
    Ok(())
}

fn check_finite(axis: &'static str, value: f64) -> Result<(), PostcodeError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PostcodeError::InvalidCoordinate { axis, value })
    }
}
