//! Article model and trait implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::EventRegistry;
use crate::error::{EventRegistryError, Result};
use crate::pagination::{parse_page, Page};
use crate::query::{
    ArticleListRequest, ArticlesRequest, QueryArticle, QueryArticles, MAX_ARTICLES_PER_PAGE,
};
use crate::traits::{Get, List};

use super::entity::{Author, Category, Concept, Location, Source};

/// A news article, blog post or press release.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Article URI (a numeric string).
    pub uri: String,

    /// ISO 639-3 language code (e.g. `eng`).
    #[serde(default)]
    pub lang: Option<String>,

    /// Whether the article copies another article.
    #[serde(default)]
    pub is_duplicate: bool,

    /// Publication date (`YYYY-MM-DD`).
    #[serde(default)]
    pub date: Option<String>,

    /// Publication time (`HH:MM:SS`).
    #[serde(default)]
    pub time: Option<String>,

    /// When the article was crawled.
    #[serde(default)]
    pub date_time: Option<DateTime<Utc>>,

    /// Publication timestamp reported by the source.
    #[serde(default)]
    pub date_time_pub: Option<DateTime<Utc>>,

    /// `news`, `pr` or `blog`.
    #[serde(default)]
    pub data_type: Option<String>,

    /// Similarity to the containing event.
    #[serde(default)]
    pub sim: Option<f64>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub source: Option<Source>,

    #[serde(default)]
    pub authors: Vec<Author>,

    #[serde(default)]
    pub concepts: Vec<Concept>,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub image: Option<String>,

    /// URI of the event the article was assigned to.
    #[serde(default)]
    pub event_uri: Option<String>,

    /// Sentiment in `[-1, 1]`.
    #[serde(default)]
    pub sentiment: Option<f64>,

    #[serde(default)]
    pub wgt: Option<f64>,

    #[serde(default)]
    pub relevance: Option<f64>,

    /// Share counts keyed by network.
    #[serde(default)]
    pub shares: HashMap<String, u64>,

    #[serde(default)]
    pub links: Vec<String>,

    #[serde(default)]
    pub location: Option<Location>,

    #[serde(default)]
    pub story_uri: Option<String>,
}

impl Article {
    /// Whether the article belongs to an event.
    pub fn has_event(&self) -> bool {
        self.event_uri.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Title of the publishing source, falling back to its URI.
    pub fn source_title(&self) -> Option<&str> {
        self.source
            .as_ref()
            .map(|s| s.title.as_deref().unwrap_or(&s.uri))
    }

    /// Total shares across all networks.
    pub fn total_shares(&self) -> u64 {
        self.shares.values().sum()
    }
}

#[async_trait]
impl Get for Article {
    type Id = String; // Article URI

    #[tracing::instrument(skip(client))]
    async fn get(client: &EventRegistry, uri: String) -> Result<Self> {
        let response = client.exec_query(&QueryArticle::by_uri(&uri)).await?;
        let info = response
            .get(&uri)
            .and_then(|entry| entry.get("info"))
            .ok_or_else(|| EventRegistryError::NotFound {
                entity_type: "Article",
                id: uri.clone(),
            })?;
        Ok(Article::deserialize(info)?)
    }
}

#[async_trait]
impl List for Article {
    type Query = QueryArticles;

    const MAX_PAGE_SIZE: u32 = MAX_ARTICLES_PER_PAGE;

    #[tracing::instrument(skip(client, query))]
    async fn list_page(
        client: &EventRegistry,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        let request = match query.requested_result {
            ArticlesRequest::Articles(ref current) => ArticleListRequest {
                page,
                count,
                ..current.clone()
            },
            _ => ArticleListRequest::new(page, count),
        };
        let mut query = query.clone();
        query.set_requested_result(ArticlesRequest::Articles(request));

        let response = client.exec_query(&query).await?;
        parse_page(&response, "articles", page, count)
    }
}

// Convenience functions for working with articles

/// Fetch up to `max_items` articles matching a query.
///
/// # Example
///
/// ```ignore
/// use eventregistry::{EventRegistry, Filtered, QueryArticles, get_articles};
///
/// let er = EventRegistry::from_env()?;
/// let query = QueryArticles::new().with_keywords("Tesla");
/// let articles = get_articles(&er, &query, Some(250)).await?;
/// ```
pub async fn get_articles(
    client: &EventRegistry,
    query: &QueryArticles,
    max_items: Option<usize>,
) -> Result<Vec<Article>> {
    Article::list_all(client, query, max_items).await
}

/// Fetch several articles by URI in one request.
///
/// URIs unknown to the service are skipped.
pub async fn get_articles_by_uri(client: &EventRegistry, uris: &[String]) -> Result<Vec<Article>> {
    let response = client.exec_query(&QueryArticle::by_uris(uris.iter().cloned())).await?;
    let mut articles = Vec::with_capacity(uris.len());
    for uri in uris {
        if let Some(info) = response.get(uri).and_then(|entry| entry.get("info")) {
            articles.push(Article::deserialize(info)?);
        }
    }
    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_deserialize() {
        let json = r#"{
            "uri": "8012345678",
            "lang": "eng",
            "isDuplicate": false,
            "date": "2024-02-01",
            "time": "10:15:00",
            "dateTime": "2024-02-01T10:15:00Z",
            "dataType": "news",
            "url": "https://example.com/story",
            "title": "Battery breakthrough",
            "body": "Researchers announced...",
            "source": {"uri": "example.com", "dataType": "news", "title": "Example News"},
            "authors": [{"uri": "jane@example.com", "name": "Jane Doe", "type": "author", "isAgency": false}],
            "image": null,
            "eventUri": "eng-9001",
            "sentiment": 0.31,
            "wgt": 444,
            "shares": {"facebook": 12}
        }"#;
        let article: Article = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(article.uri, "8012345678");
        assert_eq!(article.source_title(), Some("Example News"));
        assert!(article.has_event());
        assert_eq!(article.total_shares(), 12);
        assert_eq!(article.authors[0].name, "Jane Doe");
        assert!(article.date_time.is_some());
    }

    #[test]
    fn test_article_minimal() {
        let article: Article = serde_json::from_str(r#"{"uri": "1"}"#).unwrap();
        assert!(!article.has_event());
        assert!(article.source_title().is_none());
        assert!(article.concepts.is_empty());
    }
}
