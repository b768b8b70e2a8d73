//! Map article URLs to Event Registry article URIs.

use dashmap::DashMap;
use serde_json::Value;

use crate::client::EventRegistry;
use crate::error::Result;
use crate::query::QueryParams;

/// Resolves article URLs to URIs, optionally remembering every answer.
///
/// Unknown URLs are remembered as `None` too, so repeated lookups of the
/// same URL cost one request.
#[derive(Debug)]
pub struct ArticleMapper {
    client: EventRegistry,
    remember_mappings: bool,
    cache: DashMap<String, Option<String>>,
}

impl ArticleMapper {
    pub fn new(client: EventRegistry, remember_mappings: bool) -> Self {
        Self {
            client,
            remember_mappings,
            cache: DashMap::new(),
        }
    }

    /// Number of remembered mappings.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Forgets every remembered mapping.
    pub fn clear(&self) {
        self.cache.clear();
    }

    /// The URI of the article at `url`, or `None` if the service does not
    /// know it.
    #[tracing::instrument(skip(self))]
    pub async fn article_uri(&self, url: &str) -> Result<Option<String>> {
        if self.remember_mappings {
            if let Some(hit) = self.cache.get(url) {
                return Ok(hit.value().clone());
            }
        }

        let mut params = QueryParams::new();
        params.set_val("articleUrl", url);
        params.set_val("includeAllVersions", false);
        params.set_val("deep", true);
        let response = self
            .client
            .json_request("api/v1/articleMapper", params.into_params())
            .await?;

        let uri = match response.get(url) {
            Some(Value::String(uri)) => Some(uri.clone()),
            Some(Value::Number(uri)) => Some(uri.to_string()),
            _ => None,
        };
        if self.remember_mappings {
            self.cache.insert(url.to_string(), uri.clone());
        }
        Ok(uri)
    }
}
