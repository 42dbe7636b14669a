//! Tests for the transport value types and the `HttpClient` forwarding impls.

use std::sync::Arc;
use std::sync::Mutex;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::client::Endpoint;

fn base() -> url::Url {
    url::Url::parse("https://api.postcodes.io/").unwrap()
}

mod http_request {
    use super::*;

    #[test]
    fn new_starts_without_headers_or_body() {
        let url = base().join("postcodes/OX49%205NU").unwrap();
        let req = HttpRequest::new(http::Method::GET, url.clone());

        assert_eq!(req.url, url);
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn bulk_request_carries_json_headers_and_body() {
        let req = Endpoint::post(["postcodes"])
            .with_json(&serde_json::json!({ "postcodes": ["OX49 5NU", "M32 0JG"] }))
            .unwrap()
            .to_request(&base())
            .unwrap();

        assert_eq!(req.method, http::Method::POST);
        assert_eq!(req.headers[http::header::ACCEPT], "application/json");
        assert_eq!(req.headers[http::header::CONTENT_TYPE], "application/json");
        assert_eq!(
            req.body.as_deref(),
            Some(br#"{"postcodes":["OX49 5NU","M32 0JG"]}"#.as_slice())
        );
    }

    #[test]
    fn with_header_keeps_earlier_values() {
        let req = HttpRequest::new(http::Method::GET, base())
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("application/json"),
            )
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("text/plain"),
            );

        let accepts: Vec<_> = req
            .headers
            .get_all(http::header::ACCEPT)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(accepts, ["application/json", "text/plain"]);
    }

    #[test]
    fn with_body_replaces_body() {
        let req = HttpRequest::new(http::Method::POST, base())
            .with_body(b"{}".to_vec())
            .with_body(br#"{"geolocations":[]}"#.to_vec());

        assert_eq!(req.body.as_deref(), Some(br#"{"geolocations":[]}"#.as_slice()));
    }
}

mod http_response {
    use super::*;

    #[test]
    fn json_reply_is_tagged_as_json() {
        let resp = HttpResponse::json(http::StatusCode::OK, r#"{"status":200,"result":true}"#);

        assert_eq!(
            resp.headers[http::header::CONTENT_TYPE],
            "application/json; charset=utf-8"
        );
        assert_eq!(resp.body, br#"{"status":200,"result":true}"#);
    }

    #[test]
    fn api_error_statuses_are_not_success() {
        for status in [
            http::StatusCode::BAD_REQUEST,
            http::StatusCode::NOT_FOUND,
            http::StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let resp = HttpResponse::json(status, r#"{"status":400,"error":"Invalid postcode"}"#);
            assert!(!resp.is_success(), "{status} counted as success");
        }
    }

    #[test]
    fn ok_is_success() {
        let resp = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), vec![]);

        assert!(resp.is_success());
    }
}

mod http_error {
    use super::*;
    use std::error::Error;

    #[test]
    fn connection_error_keeps_source() {
        let error = HttpError::Connection(Box::new(std::io::Error::other("dns lookup failed")));

        assert!(error.to_string().starts_with("Connection error"));
        assert_eq!(error.source().unwrap().to_string(), "dns lookup failed");
    }

    #[test]
    fn timeout_has_no_source() {
        assert_eq!(HttpError::Timeout.to_string(), "Request timed out");
        assert!(HttpError::Timeout.source().is_none());
    }

    #[test]
    fn configuration_names_the_setting() {
        let error = HttpError::Configuration("bad user agent".to_string());

        assert!(error.to_string().contains("bad user agent"));
    }
}

mod http_client_trait {
    use super::*;

    /// Records the path of every request and answers `{"result":true}`.
    #[derive(Default)]
    struct RecordingClient {
        paths: Mutex<Vec<String>>,
    }

    impl RecordingClient {
        fn paths(&self) -> Vec<String> {
            self.paths.lock().unwrap().clone()
        }
    }

    impl HttpClient for RecordingClient {
        async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
            self.paths.lock().unwrap().push(req.url.path().to_string());
            Ok(HttpResponse::json(
                http::StatusCode::OK,
                r#"{"status":200,"result":true}"#,
            ))
        }
    }

    fn validate_request(postcode: &str) -> HttpRequest {
        Endpoint::get(["postcodes", postcode, "validate"])
            .to_request(&base())
            .unwrap()
    }

    #[tokio::test]
    async fn reference_forwards_to_inner_client() {
        let client = RecordingClient::default();

        let by_ref = &client;
        by_ref.request(validate_request("CF10 4UW")).await.unwrap();

        assert_eq!(client.paths(), ["/postcodes/CF10%204UW/validate"]);
    }

    #[tokio::test]
    async fn arc_forwards_to_inner_client() {
        let client = Arc::new(RecordingClient::default());

        let shared = Arc::clone(&client);
        shared.request(validate_request("N11 1QZ")).await.unwrap();
        shared.request(validate_request("M32 0JG")).await.unwrap();

        assert_eq!(
            client.paths(),
            ["/postcodes/N11%201QZ/validate", "/postcodes/M32%200JG/validate"]
        );
    }

    #[test]
    fn wrappers_satisfy_trait_bounds() {
        fn assert_client<T: HttpClient>() {}
        assert_client::<RecordingClient>();
        assert_client::<&RecordingClient>();
        assert_client::<Arc<RecordingClient>>();
    }
}
