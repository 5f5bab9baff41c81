//! Tests for the HTTP client module

use super::*;
use crate::auth::Credentials;
use crate::error::Error;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn unpaced() -> HttpClientConfig {
    HttpClientConfig::builder().no_rate_limit().build()
}

fn test_client() -> HttpClient {
    HttpClient::with_config(unpaced()).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.rate_limit.is_some());
    assert!(config.default_headers.is_empty());
    assert!(config.user_agent.starts_with("hypothesis-client/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(60))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .rate_limit(RateLimiterConfig::new(2, 4))
        .build();

    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(
        config.default_headers.get("X-Custom").map(String::as_str),
        Some("value")
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(2, 4)));
}

#[test]
fn test_request_config_keeps_repeated_keys() {
    let config = RequestConfig::new()
        .query_pairs([("tag", "media"), ("tag", "review")])
        .query_pairs(vec![("group".to_string(), "__world__".to_string())]);

    assert_eq!(
        config.query,
        vec![
            ("tag".to_string(), "media".to_string()),
            ("tag".to_string(), "review".to_string()),
            ("group".to_string(), "__world__".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_get_json_sends_query_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("tag", "social media"))
        .and(query_param("group", "__world__"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 42})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request =
        RequestConfig::new().query_pairs([("tag", "social media"), ("group", "__world__")]);
    let data: Value = test_client()
        .get_json(&format!("{}/api/search", mock_server.uri()), request)
        .await
        .unwrap();
    assert_eq!(data["total"], 42);

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(
        received[0].url.query(),
        Some("tag=social+media&group=__world__")
    );
}

#[tokio::test]
async fn test_bearer_and_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .and(header("Authorization", "Bearer tok-123"))
        .and(header("X-Client", "cli"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .header("X-Client", "cli")
        .no_rate_limit()
        .build();
    let client = HttpClient::with_credentials(config, Credentials::from_token("tok-123")).unwrap();
    assert!(client.credentials().is_authenticated());

    let _: Value = client
        .get_json(&format!("{}/api/profile", mock_server.uri()), RequestConfig::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_anonymous_sends_no_authorization() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let _: Value = test_client()
        .get_json(&mock_server.uri(), RequestConfig::new())
        .await
        .unwrap();

    let received = mock_server.received_requests().await.unwrap();
    assert!(!received[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_status_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/api/search", mock_server.uri());
    let err = test_client()
        .get_json::<Value>(&url, RequestConfig::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
    match err {
        Error::UpstreamStatus { body, url: failed, .. } => {
            assert_eq!(body, "try later");
            assert_eq!(failed, url);
        }
        other => panic!("Expected UpstreamStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let err = test_client()
        .get_json::<Value>(&mock_server.uri(), RequestConfig::new())
        .await
        .unwrap_err();
    assert!(err.is_decode());
}

#[tokio::test]
async fn test_transport_error() {
    // Nothing listens on this port once the listener is dropped
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}/api/search", listener.local_addr().unwrap())
    };

    let err = test_client()
        .get_json::<Value>(&uri, RequestConfig::new())
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .timeout(Duration::from_millis(50))
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let err = client
        .get_json::<Value>(&mock_server.uri(), RequestConfig::new())
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

#[test]
fn test_decode_json_helper() {
    let value: Value = decode_json(r#"{"total": 1}"#).unwrap();
    assert_eq!(value["total"], 1);

    let err = decode_json::<Value>("{").unwrap_err();
    assert!(err.is_decode());
}
