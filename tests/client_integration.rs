//! Integration tests for the HTTP client core.
//!
//! Uses wiremock to stand in for the Elsevier API and verifies:
//! - Authentication headers on every request
//! - Status-code to error mapping, including quota exhaustion
//! - Retry behavior for transient failures
//! - Minimum-interval request throttling

use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use elsar::{Config, ElsevierClient, Error};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Config pointed at the mock server, throttle disabled.
fn test_config(base_url: &str) -> Config {
    Config::new("test-key")
        .with_base_url(base_url)
        .with_min_request_interval(Duration::ZERO)
}

#[tokio::test]
async fn test_sends_api_key_and_accept_headers() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/abstract/scopus_id/1"))
        .and(header("X-ELS-APIKey", "test-key"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ElsevierClient::new(test_config(&server.uri())).unwrap();
    let value = client.get_json("content/abstract/scopus_id/1").await.unwrap();

    assert_eq!(value["ok"], true);
    assert_eq!(client.requests_issued(), 1);
}

#[tokio::test]
async fn test_sends_inst_token_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/abstract/scopus_id/1"))
        .and(header("X-ELS-APIKey", "test-key"))
        .and(header("X-ELS-Insttoken", "inst-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri()).with_inst_token("inst-token");
    let client = ElsevierClient::new(config).unwrap();
    client.get_json("content/abstract/scopus_id/1").await.unwrap();
}

#[tokio::test]
async fn test_quota_exceeded_surfaces_status_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/search/scopus"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("X-ELS-Status", "QUOTA_EXCEEDED - Quota Exceeded"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ElsevierClient::new(test_config(&server.uri())).unwrap();
    let err = client
        .get_json("content/search/scopus?query=a")
        .await
        .unwrap_err();

    match err {
        Error::QuotaExceeded { reset_at } => {
            assert!(reset_at.unwrap().contains("QUOTA_EXCEEDED"));
        }
        other => panic!("Expected QuotaExceeded, got {:?}", other),
    }
    // Quota exhaustion is not retried.
    assert_eq!(client.requests_issued(), 1);
}

#[tokio::test]
async fn test_not_found_maps_to_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = ElsevierClient::new(test_config(&server.uri())).unwrap();
    let err = client
        .get_json("content/abstract/scopus_id/999")
        .await
        .unwrap_err();

    match err {
        Error::NotFound(url) => assert!(url.contains("scopus_id/999")),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unauthorized_maps_to_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("APIKey invalid"))
        .mount(&server)
        .await;

    let client = ElsevierClient::new(test_config(&server.uri())).unwrap();
    let err = client
        .get_json("content/abstract/scopus_id/1")
        .await
        .unwrap_err();

    match err {
        Error::Unauthorized(message) => assert!(message.contains("APIKey invalid")),
        other => panic!("Expected Unauthorized, got {:?}", other),
    }
}

#[tokio::test]
async fn test_retries_transient_failures() {
    init_tracing();
    let server = MockServer::start().await;

    // Two 503s, then success.
    Mock::given(method("GET"))
        .and(path("/content/abstract/scopus_id/1"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/content/abstract/scopus_id/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let client = ElsevierClient::new(test_config(&server.uri())).unwrap();
    let value = client.get_json("content/abstract/scopus_id/1").await.unwrap();

    assert_eq!(value["ok"], true);
    assert_eq!(client.requests_issued(), 3);
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad query"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ElsevierClient::new(test_config(&server.uri())).unwrap();
    let err = client
        .get_json("content/search/scopus?query=)")
        .await
        .unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("bad query"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
    assert_eq!(client.requests_issued(), 1);
}

#[tokio::test]
async fn test_requests_are_throttled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let config = Config::new("test-key")
        .with_base_url(server.uri())
        .with_min_request_interval(Duration::from_millis(100));
    let client = ElsevierClient::new(config).unwrap();

    let start = Instant::now();
    for _ in 0..3 {
        client.get_json("content/abstract/scopus_id/1").await.unwrap();
    }

    // Three requests, two enforced gaps.
    assert!(start.elapsed() >= Duration::from_millis(200));
    assert_eq!(client.requests_issued(), 3);
}

#[tokio::test]
async fn test_invalid_json_body_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = ElsevierClient::new(test_config(&server.uri())).unwrap();
    let err = client
        .get_json("content/abstract/scopus_id/1")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}
