//! Request plumbing tests: authentication, errors, retries and rate stats.

use std::time::{Duration, Instant};

use eventregistry::{ClientConfig, EventRegistry, EventRegistryError, Params};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(uri: &str) -> ClientConfig {
    ClientConfig::default()
        .with_api_key("test-key")
        .with_host(uri)
        .with_min_delay_between_requests(Duration::ZERO)
        .with_retry_delay(Duration::ZERO)
        .with_repeat_failed_request_count(0)
}

#[tokio::test]
async fn test_api_key_is_sent_in_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/usage"))
        .and(body_partial_json(json!({"apiKey": "test-key"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"availableTokens": 5000, "usedTokens": 1200})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = EventRegistry::with_config(config(&mock_server.uri())).unwrap();
    let usage = client.usage_info().await.unwrap();

    assert_eq!(usage.remaining_tokens(), 3800);
}

#[tokio::test]
async fn test_error_key_in_success_body_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/article/getArticles"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": "Invalid API key"})),
        )
        .mount(&mock_server)
        .await;

    let client = EventRegistry::with_config(config(&mock_server.uri())).unwrap();
    let err = client
        .json_request("api/v1/article/getArticles", Params::new())
        .await
        .unwrap_err();

    match err {
        EventRegistryError::ApiError { message, .. } => assert_eq!(message, "Invalid API key"),
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/usage"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/usage"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"availableTokens": 10, "usedTokens": 1})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = EventRegistry::with_config(
        config(&mock_server.uri()).with_repeat_failed_request_count(2),
    )
    .unwrap();
    let usage = client.usage_info().await.unwrap();

    assert_eq!(usage.used_tokens, 1);
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/usage"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "bad request"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = EventRegistry::with_config(
        config(&mock_server.uri()).with_repeat_failed_request_count(3),
    )
    .unwrap();
    let err = client.usage_info().await.unwrap_err();

    assert!(matches!(
        err,
        EventRegistryError::ApiError {
            status_code: Some(400),
            ..
        }
    ));
}

#[tokio::test]
async fn test_rate_limit_headers_are_recorded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/usage"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ratelimit-limit", "10000")
                .insert_header("x-ratelimit-remaining", "9876")
                .set_body_json(json!({"availableTokens": 10, "usedTokens": 1})),
        )
        .mount(&mock_server)
        .await;

    let client = EventRegistry::with_config(config(&mock_server.uri())).unwrap();
    client.usage_info().await.unwrap();

    assert_eq!(client.daily_available_requests(), Some(10000));
    assert_eq!(client.remaining_available_requests(), Some(9876));
    assert_eq!(client.last_request_stats().path.as_deref(), Some("api/v1/usage"));
}

#[tokio::test]
async fn test_archive_window_forced_when_disallowed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/usage"))
        .and(body_partial_json(json!({"forceMaxDataTimeWindow": 31})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"availableTokens": 10, "usedTokens": 1})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = EventRegistry::with_config(
        config(&mock_server.uri()).with_allow_use_of_archive(false),
    )
    .unwrap();
    client.usage_info().await.unwrap();
}

#[tokio::test]
async fn test_analytics_requests_use_analytics_host() {
    let main_server = MockServer::start().await;
    let analytics_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/detectLanguage"))
        .and(body_partial_json(json!({"text": "Bonjour tout le monde"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"languages": [{"code": "fra"}]})),
        )
        .expect(1)
        .mount(&analytics_server)
        .await;

    let client = EventRegistry::with_config(
        config(&main_server.uri()).with_analytics_host(analytics_server.uri()),
    )
    .unwrap();
    let analytics = eventregistry::Analytics::new(client);
    let result = analytics
        .detect_language("Bonjour tout le monde")
        .await
        .unwrap();

    assert_eq!(result["languages"][0]["code"], "fra");
}

#[tokio::test]
async fn test_rate_limited_request_waits_for_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/usage"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "1"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/usage"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"availableTokens": 10, "usedTokens": 2})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = EventRegistry::with_config(
        config(&mock_server.uri())
            .with_retry_delay(Duration::from_secs(30))
            .with_repeat_failed_request_count(1),
    )
    .unwrap();

    let started = Instant::now();
    let usage = client.usage_info().await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(usage.used_tokens, 2);
    assert!(elapsed >= Duration::from_millis(900), "waited only {elapsed:?}");
    assert!(elapsed < Duration::from_secs(10), "waited {elapsed:?}");
}

#[tokio::test]
async fn test_requests_are_paced_across_clones() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/usage"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"availableTokens": 10, "usedTokens": 1})),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = EventRegistry::with_config(
        config(&mock_server.uri()).with_min_delay_between_requests(Duration::from_millis(300)),
    )
    .unwrap();
    let cloned = client.clone();

    let started = Instant::now();
    client.usage_info().await.unwrap();
    cloned.usage_info().await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(300));
}

#[tokio::test]
async fn test_non_json_success_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/usage"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>Service maintenance</body></html>"),
        )
        .mount(&mock_server)
        .await;

    let client = EventRegistry::with_config(config(&mock_server.uri())).unwrap();
    let err = client.usage_info().await.unwrap_err();

    assert!(matches!(err, EventRegistryError::ParseError(_)));
}
