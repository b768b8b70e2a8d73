//! Event model and trait implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::EventRegistry;
use crate::error::{EventRegistryError, Result};
use crate::pagination::{collect_pages, parse_page, Page};
use crate::query::{
    EventListRequest, EventRequest, EventsRequest, QueryEvent, QueryEvents,
    MAX_EVENTS_PER_PAGE, MAX_EVENT_ARTICLES_PER_PAGE,
};
use crate::traits::{Get, List, DEFAULT_MAX_PAGES};

use super::article::Article;
use super::entity::{Category, Concept, Label, Location};

/// A cluster of articles reporting on the same real-world happening.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event URI (e.g. `eng-8561390`).
    pub uri: String,

    #[serde(default)]
    pub title: Label,

    #[serde(default)]
    pub summary: Label,

    /// Date the event happened (`YYYY-MM-DD`).
    #[serde(default)]
    pub event_date: Option<String>,

    #[serde(default)]
    pub total_article_count: Option<u64>,

    /// Article counts per language.
    #[serde(default)]
    pub article_counts: HashMap<String, Value>,

    #[serde(default)]
    pub concepts: Vec<Concept>,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub location: Option<Location>,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub sentiment: Option<f64>,

    #[serde(default)]
    pub social_score: Option<f64>,

    #[serde(default)]
    pub wgt: Option<f64>,

    #[serde(default)]
    pub relevance: Option<f64>,
}

impl Event {
    /// English title when available, otherwise any title.
    pub fn display_title(&self) -> &str {
        self.title.best().unwrap_or("")
    }
}

/// Look up `response[uri][key]`.
///
/// Events merged into another event answer with `newEventUri` instead of the
/// requested section; those are reported as not found.
fn event_section<'a>(response: &'a Value, uri: &str, key: &str) -> Result<&'a Value> {
    let entry = response.get(uri);
    if let Some(new_uri) = entry.and_then(|e| e.get("newEventUri")).and_then(Value::as_str) {
        tracing::debug!(uri, new_uri, "event was merged");
    }
    entry
        .and_then(|e| e.get(key))
        .ok_or_else(|| EventRegistryError::NotFound {
            entity_type: "Event",
            id: uri.to_string(),
        })
}

#[async_trait]
impl Get for Event {
    type Id = String; // Event URI

    #[tracing::instrument(skip(client))]
    async fn get(client: &EventRegistry, uri: String) -> Result<Self> {
        let response = client.exec_query(&QueryEvent::new([uri.as_str()])).await?;
        let info = event_section(&response, &uri, "info")?;
        Ok(Event::deserialize(info)?)
    }
}

#[async_trait]
impl List for Event {
    type Query = QueryEvents;

    const MAX_PAGE_SIZE: u32 = MAX_EVENTS_PER_PAGE;

    #[tracing::instrument(skip(client, query))]
    async fn list_page(
        client: &EventRegistry,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        let request = match query.requested_result {
            EventsRequest::Events(ref current) => EventListRequest {
                page,
                count,
                ..current.clone()
            },
            _ => EventListRequest::new(page, count),
        };
        let mut query = query.clone();
        query.set_requested_result(EventsRequest::Events(request));

        let response = client.exec_query(&query).await?;
        parse_page(&response, "events", page, count)
    }
}

/// Fetch one page of the articles reporting on an event.
pub async fn get_event_articles_page(
    client: &EventRegistry,
    event_uri: &str,
    request: EventRequest,
) -> Result<Page<Article>> {
    let (page, count) = match &request {
        EventRequest::Articles { page, count, .. } => (*page, *count),
        _ => {
            return Err(EventRegistryError::invalid(
                "event articles page requires an Articles request",
            ))
        }
    };
    let query = QueryEvent::new([event_uri]).with_requested_result(request);
    let response = client.exec_query(&query).await?;
    let entry = event_section(&response, event_uri, "articles")?;
    let wrapped = serde_json::json!({ "articles": entry });
    parse_page(&wrapped, "articles", page, count)
}

/// Fetch up to `max_items` articles of an event, page by page.
///
/// # Example
///
/// ```ignore
/// let articles = get_event_articles(&er, "eng-8561390", Some(300)).await?;
/// ```
pub async fn get_event_articles(
    client: &EventRegistry,
    event_uri: &str,
    max_items: Option<usize>,
) -> Result<Vec<Article>> {
    collect_pages(max_items, DEFAULT_MAX_PAGES, |page| {
        get_event_articles_page(
            client,
            event_uri,
            EventRequest::articles(page, MAX_EVENT_ARTICLES_PER_PAGE),
        )
    })
    .await
}

/// Fetch up to `max_items` events matching a query.
pub async fn get_events(
    client: &EventRegistry,
    query: &QueryEvents,
    max_items: Option<usize>,
) -> Result<Vec<Event>> {
    Event::list_all(client, query, max_items).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_deserialize() {
        let json = r#"{
            "uri": "eng-8561390",
            "title": {"eng": "Storm hits coast"},
            "summary": {"eng": "A storm..."},
            "eventDate": "2024-03-02",
            "totalArticleCount": 152,
            "articleCounts": {"eng": 120, "deu": 32},
            "concepts": [{"uri": "http://en.wikipedia.org/wiki/Storm", "type": "wiki", "score": 100}],
            "categories": [{"uri": "news/Environment", "label": "news/Environment", "wgt": 80}],
            "location": {"type": "place", "label": {"eng": "Miami"}},
            "sentiment": -0.4
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.display_title(), "Storm hits coast");
        assert_eq!(event.total_article_count, Some(152));
        assert_eq!(event.concepts.len(), 1);
        assert_eq!(event.categories[0].wgt, Some(80.0));
    }

    #[test]
    fn test_merged_event_is_not_found() {
        let response = json!({"eng-1": {"newEventUri": "eng-2"}});
        let err = event_section(&response, "eng-1", "info").unwrap_err();
        assert!(matches!(err, EventRegistryError::NotFound { entity_type: "Event", .. }));
    }
}
