//! Mention model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::EventRegistry;
use crate::error::Result;
use crate::pagination::{parse_page, Page};
use crate::query::{MentionsRequest, QueryMentions, MAX_MENTIONS_PER_PAGE};
use crate::traits::List;

use super::entity::{Concept, EventType, Source};

/// A sentence in an article that describes a typed event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    pub uri: String,

    /// The mention sentence.
    #[serde(default)]
    pub sentence: String,

    #[serde(default)]
    pub lang: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub event_type: Option<EventType>,

    /// `fact`, `opinion` or `forecast`.
    #[serde(default)]
    pub fact_level: Option<String>,

    /// URI of the article containing the sentence.
    #[serde(default)]
    pub article_uri: Option<String>,

    #[serde(default)]
    pub source: Option<Source>,

    #[serde(default)]
    pub concepts: Vec<Concept>,

    #[serde(default)]
    pub sentiment: Option<f64>,

    #[serde(default)]
    pub is_duplicate: bool,
}

#[async_trait]
impl List for Mention {
    type Query = QueryMentions;

    const MAX_PAGE_SIZE: u32 = MAX_MENTIONS_PER_PAGE;

    #[tracing::instrument(skip(client, query))]
    async fn list_page(
        client: &EventRegistry,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>> {
        let request = match query.requested_result {
            MentionsRequest::Mentions {
                sort_by,
                sort_by_asc,
                ref return_info,
                ..
            } => MentionsRequest::Mentions {
                page,
                count,
                sort_by,
                sort_by_asc,
                return_info: return_info.clone(),
            },
            _ => MentionsRequest::mentions(page, count),
        };
        let mut query = query.clone();
        query.set_requested_result(request);

        let response = client.exec_query(&query).await?;
        parse_page(&response, "mentions", page, count)
    }
}

/// Fetch up to `max_items` mentions matching a query.
pub async fn get_mentions(
    client: &EventRegistry,
    query: &QueryMentions,
    max_items: Option<usize>,
) -> Result<Vec<Mention>> {
    Mention::list_all(client, query, max_items).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mention_deserialize() {
        let json = r#"{
            "uri": "m-1",
            "sentence": "Acme agreed to acquire Widgets Inc. for $2bn.",
            "lang": "eng",
            "eventType": {"uri": "et/business/acquisitions-mergers/acquisition-own", "label": {"eng": "Acquisition"}},
            "factLevel": "fact",
            "articleUri": "801"
        }"#;
        let mention: Mention = serde_json::from_str(json).unwrap();
        assert_eq!(mention.fact_level.as_deref(), Some("fact"));
        assert_eq!(
            mention.event_type.as_ref().and_then(|e| e.label.best()),
            Some("Acquisition")
        );
    }
}
