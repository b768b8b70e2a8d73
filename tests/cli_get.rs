//! Execution tests for fetching single articles and events.
//!
//! Uses wiremock to mock the Event Registry API and test actual execution flow.

use std::time::Duration;

use eventregistry::{Article, ClientConfig, Event, EventRegistry, EventRegistryError, Get};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(uri: &str) -> EventRegistry {
    let config = ClientConfig::default()
        .with_api_key("test-key")
        .with_host(uri)
        .with_min_delay_between_requests(Duration::ZERO)
        .with_repeat_failed_request_count(0);
    EventRegistry::with_config(config).unwrap()
}

#[tokio::test]
async fn test_get_article_returns_info() {
    let mock_server = MockServer::start().await;

    let response = serde_json::json!({
        "8001": {
            "info": {
                "uri": "8001",
                "lang": "eng",
                "title": "Rates rise again",
                "date": "2024-04-02",
                "source": {"uri": "example.com", "title": "Example Times"}
            }
        }
    });

    Mock::given(method("POST"))
        .and(path("/api/v1/article/getArticle"))
        .and(body_partial_json(serde_json::json!({
            "action": "getArticle",
            "articleUri": ["8001"],
            "apiKey": "test-key"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let article = Article::get(&client, "8001".to_string()).await.unwrap();

    assert_eq!(article.uri, "8001");
    assert_eq!(article.title.as_deref(), Some("Rates rise again"));
    assert_eq!(article.source_title(), Some("Example Times"));
}

#[tokio::test]
async fn test_get_event_returns_info() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/event/getEvent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "eng-1": {
                "info": {
                    "uri": "eng-1",
                    "title": {"eng": "Central bank raises rates"},
                    "eventDate": "2024-04-02",
                    "totalArticleCount": 42
                }
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let event = Event::get(&client, "eng-1".to_string()).await.unwrap();

    assert_eq!(event.display_title(), "Central bank raises rates");
    assert_eq!(event.total_article_count, Some(42));
}

#[tokio::test]
async fn test_get_unknown_article_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/article/getArticle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = Article::get(&client, "404".to_string()).await.unwrap_err();

    assert!(matches!(
        err,
        EventRegistryError::NotFound {
            entity_type: "Article",
            ..
        }
    ));
}

#[tokio::test]
async fn test_get_merged_event_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/event/getEvent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "eng-1": {"newEventUri": "eng-2"}
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = Event::get(&client, "eng-1".to_string()).await.unwrap_err();

    assert!(matches!(err, EventRegistryError::NotFound { ref id, .. } if id == "eng-1"));
}
