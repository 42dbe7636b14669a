//! The reqwest-backed transport used by the `postcodes` binary.

use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// [`HttpClient`] over a pooled `reqwest::Client`.
///
/// Connection pooling, proxies from the environment and TLS all come from
/// reqwest's defaults unless a configured client is passed to
/// [`from_client`](Self::from_client).
///
/// # Example
///
/// ```no_run
/// use postcodes_io::client::Endpoint;
/// use postcodes_io::transport::{HttpClient, ReqwestClient};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new();
/// let base = Url::parse("https://api.postcodes.io/")?;
/// let request = Endpoint::get(["random", "postcodes"]).to_request(&base)?;
/// let response = client.request(request).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// A transport with reqwest's defaults and no total timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Wraps an already configured reqwest client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }

    /// The transport the binary builds from `[http]` config: a total request
    /// timeout and the `User-Agent` sent on every call.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Configuration`] if reqwest rejects the settings.
    pub fn with_options(timeout: Duration, user_agent: &str) -> Result<Self, HttpError> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| HttpError::Configuration(e.to_string()))?;

        Ok(Self { inner })
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self.inner.request(req.method, req.url).headers(req.headers);
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        Ok(HttpResponse::new(status, headers, body.to_vec()))
    }
}

// Used for both the send and the body read; a timeout can fire in either.
fn map_reqwest_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidUrl(e.to_string())
    } else {
        HttpError::Connection(Box::new(e))
    }
}
