//! Topic pages: weighted descriptions of a subject that the server turns
//! into a stream of matching articles and events.
//!
//! A topic page is defined locally (or loaded from a page saved on the Event
//! Registry website) and sent along with every query.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::EventRegistry;
use crate::error::{EventRegistryError, Result};
use crate::models::{Article, Event};
use crate::pagination::{parse_page, Page};
use crate::query::{
    check_count, check_page, check_rank_percentiles, check_sentiment, ArticleSortBy, DataType,
    EventFilter, EventSortBy, HasDuplicateFilter, IsDuplicateFilter, Params, QueryParams,
    MAX_ARTICLES_PER_PAGE, MAX_EVENTS_PER_PAGE,
};
use crate::return_info::ReturnInfo;

/// A weighted URI (concept, category, source, location) in a topic page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedUri {
    pub uri: String,
    pub wgt: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Matching items must contain this entry.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Matching items must not contain this entry.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub excluded: bool,
}

/// A weighted keyword in a topic page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedKeyword {
    pub keyword: String,
    pub wgt: i32,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub excluded: bool,
}

/// The JSON document describing a topic page.
///
/// Field names follow the server's format so definitions exported from the
/// website load unchanged. Unknown fields are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopicPageDefinition {
    pub auto_add_articles: bool,
    pub article_has_duplicate: HasDuplicateFilter,
    pub article_has_event: EventFilter,
    pub article_is_duplicate: IsDuplicateFilter,
    pub max_days_back: u32,
    /// Minimum score an article needs to be included.
    pub article_tresh_wgt: u32,
    /// Minimum score an event needs to be included.
    pub event_tresh_wgt: u32,
    pub concepts: Vec<WeightedUri>,
    pub keywords: Vec<WeightedKeyword>,
    pub categories: Vec<WeightedUri>,
    pub sources: Vec<WeightedUri>,
    pub source_groups: Vec<WeightedUri>,
    pub source_locations: Vec<WeightedUri>,
    pub locations: Vec<WeightedUri>,
    pub langs: Vec<String>,
    pub restrict_to_set_concepts: bool,
    pub restrict_to_set_categories: bool,
    pub restrict_to_set_sources: bool,
    pub restrict_to_set_locations: bool,
    pub data_type: Vec<DataType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_source_rank_percentile: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_source_rank_percentile: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_sentiment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_sentiment: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Default for TopicPageDefinition {
    fn default() -> Self {
        Self {
            auto_add_articles: true,
            article_has_duplicate: HasDuplicateFilter::KeepAll,
            article_has_event: EventFilter::KeepAll,
            article_is_duplicate: IsDuplicateFilter::SkipDuplicates,
            max_days_back: 7,
            article_tresh_wgt: 0,
            event_tresh_wgt: 0,
            concepts: Vec::new(),
            keywords: Vec::new(),
            categories: Vec::new(),
            sources: Vec::new(),
            source_groups: Vec::new(),
            source_locations: Vec::new(),
            locations: Vec::new(),
            langs: Vec::new(),
            restrict_to_set_concepts: false,
            restrict_to_set_categories: false,
            restrict_to_set_sources: false,
            restrict_to_set_locations: false,
            data_type: vec![DataType::News],
            start_source_rank_percentile: None,
            end_source_rank_percentile: None,
            min_sentiment: None,
            max_sentiment: None,
            extra: serde_json::Map::new(),
        }
    }
}

fn weighted_uri(
    uri: &str,
    wgt: i32,
    label: Option<&str>,
    required: bool,
    excluded: bool,
) -> Result<WeightedUri> {
    if required && excluded {
        return Err(EventRegistryError::invalid(format!(
            "'{uri}' cannot be both required and excluded"
        )));
    }
    Ok(WeightedUri {
        uri: uri.to_string(),
        wgt,
        label: label.map(str::to_string),
        required,
        excluded,
    })
}

/// A topic page and the queries that run against it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopicPage {
    pub definition: TopicPageDefinition,
}

impl TopicPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the definition of a topic page saved on the Event Registry website.
    #[tracing::instrument(skip(client))]
    pub async fn load_from_er(client: &EventRegistry, uri: &str) -> Result<Self> {
        let mut params = QueryParams::new();
        params.set_val("action", "getTopicPageJson");
        params.set_val("includeConceptDescription", true);
        params.set_val("includeTopicPageDefinition", true);
        params.set_val("includeTopicPageOwner", true);
        params.set_val("uri", uri);

        let response = client.json_request("api/v1/topicPage", params.into_params()).await?;
        let definition = response
            .get("topicPage")
            .ok_or_else(|| EventRegistryError::NotFound {
                entity_type: "TopicPage",
                id: uri.to_string(),
            })?;
        Ok(Self {
            definition: TopicPageDefinition::deserialize(definition)?,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self {
            definition: serde_json::from_str(json)?,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.definition)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }

    pub fn add_concept(
        &mut self,
        uri: &str,
        wgt: i32,
        label: Option<&str>,
        required: bool,
        excluded: bool,
    ) -> Result<()> {
        let entry = weighted_uri(uri, wgt, label, required, excluded)?;
        self.definition.concepts.push(entry);
        Ok(())
    }

    pub fn add_keyword(
        &mut self,
        keyword: &str,
        wgt: i32,
        required: bool,
        excluded: bool,
    ) -> Result<()> {
        if required && excluded {
            return Err(EventRegistryError::invalid(format!(
                "keyword '{keyword}' cannot be both required and excluded"
            )));
        }
        self.definition.keywords.push(WeightedKeyword {
            keyword: keyword.to_string(),
            wgt,
            required,
            excluded,
        });
        Ok(())
    }

    pub fn add_category(
        &mut self,
        uri: &str,
        wgt: i32,
        required: bool,
        excluded: bool,
    ) -> Result<()> {
        let entry = weighted_uri(uri, wgt, None, required, excluded)?;
        self.definition.categories.push(entry);
        Ok(())
    }

    pub fn add_source(&mut self, uri: &str, wgt: i32, excluded: bool) -> Result<()> {
        let entry = weighted_uri(uri, wgt, None, false, excluded)?;
        self.definition.sources.push(entry);
        Ok(())
    }

    pub fn add_source_location(&mut self, uri: &str, wgt: i32, excluded: bool) -> Result<()> {
        let entry = weighted_uri(uri, wgt, None, false, excluded)?;
        self.definition.source_locations.push(entry);
        Ok(())
    }

    pub fn add_source_group(&mut self, uri: &str, wgt: i32, excluded: bool) -> Result<()> {
        let entry = weighted_uri(uri, wgt, None, false, excluded)?;
        self.definition.source_groups.push(entry);
        Ok(())
    }

    pub fn add_location(
        &mut self,
        uri: &str,
        wgt: i32,
        required: bool,
        excluded: bool,
    ) -> Result<()> {
        let entry = weighted_uri(uri, wgt, None, required, excluded)?;
        self.definition.locations.push(entry);
        Ok(())
    }

    pub fn add_lang(&mut self, lang: &str) {
        if !self.definition.langs.iter().any(|l| l == lang) {
            self.definition.langs.push(lang.to_string());
        }
    }

    pub fn set_max_days_back(&mut self, days: u32) -> Result<()> {
        if days == 0 {
            return Err(EventRegistryError::invalid("max days back must be at least 1"));
        }
        self.definition.max_days_back = days;
        Ok(())
    }

    pub fn set_article_threshold(&mut self, wgt: u32) {
        self.definition.article_tresh_wgt = wgt;
    }

    pub fn set_event_threshold(&mut self, wgt: u32) {
        self.definition.event_tresh_wgt = wgt;
    }

    pub fn set_data_types(&mut self, data_types: Vec<DataType>) -> Result<()> {
        if data_types.is_empty() {
            return Err(EventRegistryError::invalid("at least one data type is required"));
        }
        self.definition.data_type = data_types;
        Ok(())
    }

    pub fn set_source_rank_percentile(&mut self, start: u8, end: u8) -> Result<()> {
        check_rank_percentiles(start, end)?;
        self.definition.start_source_rank_percentile = Some(start);
        self.definition.end_source_rank_percentile = Some(end);
        Ok(())
    }

    pub fn set_sentiment_range(&mut self, min: Option<f64>, max: Option<f64>) -> Result<()> {
        check_sentiment(min, max)?;
        self.definition.min_sentiment = min;
        self.definition.max_sentiment = max;
        Ok(())
    }

    pub fn restrict_to_set_concepts(&mut self, restrict: bool) {
        self.definition.restrict_to_set_concepts = restrict;
    }

    pub fn restrict_to_set_categories(&mut self, restrict: bool) {
        self.definition.restrict_to_set_categories = restrict;
    }

    pub fn restrict_to_set_sources(&mut self, restrict: bool) {
        self.definition.restrict_to_set_sources = restrict;
    }

    pub fn restrict_to_set_locations(&mut self, restrict: bool) {
        self.definition.restrict_to_set_locations = restrict;
    }

    fn base_params(&self, action: &str, result_type: &str, page: u32) -> Result<QueryParams> {
        check_page(page)?;
        let mut params = QueryParams::new();
        params.set_val("action", action);
        params.set_val("resultType", result_type);
        params.set_val(
            "dataType",
            serde_json::to_value(&self.definition.data_type)?,
        );
        params.set_val("page", page);
        params.set_val("topicPage", serde_json::to_string(&self.definition)?);
        Ok(params)
    }

    /// Parameters of [`TopicPage::get_articles`].
    pub fn articles_params(
        &self,
        page: u32,
        count: u32,
        sort_by: ArticleSortBy,
        sort_by_asc: bool,
        return_info: &ReturnInfo,
    ) -> Result<Params> {
        check_count("topic page articles count", count, MAX_ARTICLES_PER_PAGE)?;
        let mut params = self.base_params("getArticlesForTopicPage", "articles", page)?;
        params.set_val("articlesCount", count);
        params.set_val("articlesSortBy", sort_by);
        params.set_val("articlesSortByAsc", sort_by_asc);
        return_info.write_to(&mut params);
        Ok(params.into_params())
    }

    /// Parameters of [`TopicPage::get_events`].
    pub fn events_params(
        &self,
        page: u32,
        count: u32,
        sort_by: EventSortBy,
        sort_by_asc: bool,
        return_info: &ReturnInfo,
    ) -> Result<Params> {
        check_count("topic page events count", count, MAX_EVENTS_PER_PAGE)?;
        let mut params = self.base_params("getEventsForTopicPage", "events", page)?;
        params.set_val("eventsCount", count);
        params.set_val("eventsSortBy", sort_by);
        params.set_val("eventsSortByAsc", sort_by_asc);
        return_info.write_to(&mut params);
        Ok(params.into_params())
    }

    /// Fetch a page of articles matching the topic page.
    #[tracing::instrument(skip(self, client, return_info))]
    pub async fn get_articles(
        &self,
        client: &EventRegistry,
        page: u32,
        count: u32,
        sort_by: ArticleSortBy,
        sort_by_asc: bool,
        return_info: &ReturnInfo,
    ) -> Result<Page<Article>> {
        let params = self.articles_params(page, count, sort_by, sort_by_asc, return_info)?;
        let response = client
            .json_request("api/v1/article/getArticlesForTopicPage", params)
            .await?;
        parse_page(&response, "articles", page, count)
    }

    /// Fetch a page of events matching the topic page.
    #[tracing::instrument(skip(self, client, return_info))]
    pub async fn get_events(
        &self,
        client: &EventRegistry,
        page: u32,
        count: u32,
        sort_by: EventSortBy,
        sort_by_asc: bool,
        return_info: &ReturnInfo,
    ) -> Result<Page<Event>> {
        let params = self.events_params(page, count, sort_by, sort_by_asc, return_info)?;
        let response = client
            .json_request("api/v1/event/getEventsForTopicPage", params)
            .await?;
        parse_page(&response, "events", page, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_definition_defaults() {
        let value = serde_json::to_value(TopicPageDefinition::default()).unwrap();
        assert_eq!(value["maxDaysBack"], json!(7));
        assert_eq!(value["articleIsDuplicate"], json!("skipDuplicates"));
        assert_eq!(value["dataType"], json!(["news"]));
        assert!(value.get("minSentiment").is_none());
    }

    #[test]
    fn test_add_entries() {
        let mut page = TopicPage::new();
        page.add_concept("http://en.wikipedia.org/wiki/Tesla,_Inc.", 50, Some("Tesla"), true, false)
            .unwrap();
        page.add_keyword("battery", 30, false, false).unwrap();
        page.add_lang("eng");
        page.add_lang("eng");

        let value = serde_json::to_value(&page.definition).unwrap();
        assert_eq!(value["concepts"][0]["required"], json!(true));
        assert!(value["concepts"][0].get("excluded").is_none());
        assert_eq!(value["keywords"][0]["keyword"], json!("battery"));
        assert_eq!(value["langs"], json!(["eng"]));
    }

    #[test]
    fn test_required_and_excluded_rejected() {
        let mut page = TopicPage::new();
        assert!(page.add_category("news/Business", 10, true, true).is_err());
        assert!(page.definition.categories.is_empty());
    }

    #[test]
    fn test_setters_validate() {
        let mut page = TopicPage::new();
        assert!(page.set_max_days_back(0).is_err());
        assert!(page.set_sentiment_range(Some(0.5), Some(0.1)).is_err());
        assert!(page.set_source_rank_percentile(0, 30).is_ok());
        assert!(page.set_data_types(Vec::new()).is_err());
    }

    #[test]
    fn test_json_keeps_unknown_fields() {
        let json = r#"{"maxDaysBack": 3, "customField": 1, "concepts": [{"uri": "c", "wgt": 5}]}"#;
        let page = TopicPage::from_json(json).unwrap();
        assert_eq!(page.definition.max_days_back, 3);
        assert_eq!(page.definition.concepts[0].wgt, 5);
        assert_eq!(page.definition.extra.get("customField"), Some(&json!(1)));
        assert!(page.definition.auto_add_articles);

        let again = TopicPage::from_json(&page.to_json().unwrap()).unwrap();
        assert_eq!(again, page);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topic.json");

        let mut page = TopicPage::new();
        page.add_source("bbc.co.uk", 20, false).unwrap();
        page.save_to_file(&path).unwrap();

        let loaded = TopicPage::load_from_file(&path).unwrap();
        assert_eq!(loaded.definition.sources[0].uri, "bbc.co.uk");
    }

    #[test]
    fn test_articles_params() {
        let page = TopicPage::new();
        let params = page
            .articles_params(2, 50, ArticleSortBy::Relevance, false, &ReturnInfo::default())
            .unwrap();
        assert_eq!(params["action"], json!("getArticlesForTopicPage"));
        assert_eq!(params["page"], json!(2));
        assert_eq!(params["articlesSortBy"], json!("rel"));
        let definition: Value =
            serde_json::from_str(params["topicPage"].as_str().unwrap()).unwrap();
        assert_eq!(definition["maxDaysBack"], json!(7));

        assert!(page
            .articles_params(1, 101, ArticleSortBy::Date, false, &ReturnInfo::default())
            .is_err());
        assert!(page
            .events_params(1, 51, EventSortBy::Relevance, false, &ReturnInfo::default())
            .is_err());
    }
}
