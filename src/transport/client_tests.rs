//! Tests for `ReqwestClient`.
//!
//! Construction checks plus one exchange with a single-shot server on
//! loopback, so the bytes reqwest writes for a postcode call can be read back.

use super::*;

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::client::Endpoint;

/// Accepts one connection, records the raw request and answers with `body`.
fn serve_once(status_line: &'static str, body: &'static str) -> (url::Url, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = url::Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();

    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut raw = Vec::new();
        let mut chunk = [0_u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            raw.extend_from_slice(&chunk[..n]);
            if n == 0 || request_is_complete(&raw) {
                break;
            }
        }

        let reply = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(reply.as_bytes()).unwrap();
        String::from_utf8(raw).unwrap()
    });

    (base, handle)
}

fn request_is_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some(head_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let length = text[..head_end]
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    raw.len() >= head_end + 4 + length
}

fn direct_client() -> ReqwestClient {
    let inner = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    ReqwestClient::from_client(inner)
}

mod construction {
    use super::*;

    #[test]
    fn new_and_default_build() {
        let _ = format!("{:?}", ReqwestClient::new());
        let _ = format!("{:?}", ReqwestClient::default());
    }

    #[test]
    fn with_options_builds_client() {
        let client = ReqwestClient::with_options(Duration::from_secs(5), "postcodes-test/1.0");

        assert!(client.is_ok());
    }

    #[test]
    fn with_options_rejects_invalid_user_agent() {
        let result = ReqwestClient::with_options(Duration::from_secs(5), "bad\nagent");

        assert!(matches!(result, Err(HttpError::Configuration(_))));
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }
}

mod exchange {
    use super::*;

    #[tokio::test]
    async fn bulk_lookup_is_sent_as_json_post() {
        let (base, server) = serve_once("200 OK", r#"{"status":200,"result":[]}"#);
        let request = Endpoint::post(["postcodes"])
            .with_json(&serde_json::json!({ "postcodes": ["OX49 5NU"] }))
            .unwrap()
            .to_request(&base)
            .unwrap();

        let response = direct_client().request(request).await.unwrap();
        let raw = server.join().unwrap().to_ascii_lowercase();

        assert!(raw.starts_with("post /postcodes http/1.1\r\n"), "{raw}");
        assert!(raw.contains("accept: application/json\r\n"), "{raw}");
        assert!(raw.contains("content-type: application/json\r\n"), "{raw}");
        assert!(raw.ends_with(r#"{"postcodes":["ox49 5nu"]}"#), "{raw}");
        assert!(response.is_success());
        assert_eq!(response.body, br#"{"status":200,"result":[]}"#);
    }

    #[tokio::test]
    async fn encoded_lookup_path_reaches_the_server() {
        let (base, server) = serve_once("200 OK", r#"{"status":200,"result":true}"#);
        let request = Endpoint::get(["postcodes", "N11 1QZ", "validate"])
            .to_request(&base)
            .unwrap();

        direct_client().request(request).await.unwrap();
        let raw = server.join().unwrap();

        assert!(raw.starts_with("GET /postcodes/N11%201QZ/validate HTTP/1.1\r\n"), "{raw}");
    }

    #[tokio::test]
    async fn not_found_is_a_response_not_an_error() {
        let (base, server) = serve_once(
            "404 Not Found",
            r#"{"status":404,"error":"Postcode not found"}"#,
        );
        let request = Endpoint::get(["postcodes", "ZZ99 9ZZ"]).to_request(&base).unwrap();

        let response = direct_client().request(request).await.unwrap();
        server.join().unwrap();

        assert_eq!(response.status, ::http::StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers.get(::http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn unresolvable_host_is_a_transport_error_or_proxy_reply() {
        let base = url::Url::parse("http://invalid.invalid.invalid/").unwrap();
        let request = Endpoint::get(["random", "postcodes"]).to_request(&base).unwrap();

        let result = ReqwestClient::new().request(request).await;

        // Behind a proxy the failure may come back as a 5xx response instead.
        match result {
            Err(HttpError::Connection(_) | HttpError::Timeout) => {}
            Ok(resp) if !resp.is_success() => {}
            other => panic!("Expected connection error or proxy error response, got {other:?}"),
        }
    }
}
