//! Shared test fixtures: a scripted transport and URL helpers.

use std::collections::VecDeque;
use std::sync::Mutex;

use percent_encoding::percent_decode_str;

use crate::client::{DEFAULT_BASE_URL, PostcodeClient};
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Mock transport that replays scripted responses and records every request.
#[derive(Debug)]
pub struct MockClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// One `200 OK` response with the given JSON body.
    pub fn json(body: &str) -> Self {
        Self::status(http::StatusCode::OK, body)
    }

    /// One response with the given status and body.
    pub fn status(status: http::StatusCode, body: &str) -> Self {
        Self::new(vec![Ok(HttpResponse::json(status, body))])
    }

    /// One transport failure.
    pub fn failing(error: HttpError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected request: no scripted response left")
    }
}

/// A client against the public base URL backed by `mock`.
pub fn client(mock: MockClient) -> PostcodeClient<MockClient> {
    PostcodeClient::with_default_base_url(mock).unwrap()
}

/// The request URL with `+` and percent escapes decoded, as a reader would write it.
pub fn decoded_url(request: &HttpRequest) -> String {
    let plus_decoded = request.url.as_str().replace('+', " ");
    percent_decode_str(&plus_decoded)
        .decode_utf8_lossy()
        .into_owned()
}

/// The request body parsed as JSON.
pub fn json_body(request: &HttpRequest) -> serde_json::Value {
    serde_json::from_slice(request.body.as_deref().expect("request has no body")).unwrap()
}

/// Base URL used by [`client`], for building expected URLs.
pub fn base() -> &'static str {
    DEFAULT_BASE_URL
}
