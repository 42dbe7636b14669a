//! Wire-level request and response values plus the [`HttpClient`] seam.

use std::future::Future;
use std::sync::Arc;

use super::HttpError;

/// One call to the postcode API, fully resolved.
///
/// Built by [`Endpoint::to_request`](crate::client::Endpoint::to_request); the
/// URL already carries the encoded path and query, and a bulk payload is
/// already serialized JSON.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// `GET` for lookups, `POST` for bulk calls
    pub method: http::Method,
    /// Absolute URL including the query string
    pub url: url::Url,
    /// `Accept`, plus `Content-Type` when a body is present
    pub headers: http::HeaderMap,
    /// Encoded JSON body
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// A request with no headers and no body.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Replaces the body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Appends a header value, keeping any earlier value for the same name.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }
}

/// A buffered reply from the API.
///
/// The body is kept as raw bytes; decoding the `{status, result}` envelope is
/// left to [`crate::client`].
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status line code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Full body
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A response carrying a JSON text body, as the API sends on every status.
    #[must_use]
    pub fn json(status: http::StatusCode, body: impl Into<String>) -> Self {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json; charset=utf-8"),
        );
        Self::new(status, headers, body.into().into_bytes())
    }

    /// True for any 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Sends resolved requests to the postcode API.
///
/// [`PostcodeClient`](crate::client::PostcodeClient) is generic over this
/// trait, so tests script replies without a network and callers can tune
/// timeouts, proxies or TLS on the transport alone. [`ReqwestClient`](super::ReqwestClient)
/// is the production implementation.
///
/// A 404 or 500 is a successful call at this layer: implementations return
/// `Ok` with the status and leave its meaning to the caller.
pub trait HttpClient: Send + Sync {
    /// Sends the request and buffers the whole response.
    ///
    /// # Errors
    ///
    /// [`HttpError`] only when no response was received.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}

impl<T: HttpClient> HttpClient for &T {
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        (**self).request(req)
    }
}

impl<T: HttpClient> HttpClient for Arc<T> {
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        (**self).request(req)
    }
}
