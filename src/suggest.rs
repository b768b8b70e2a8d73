//! Autocomplete endpoints and label-to-URI lookup.
//!
//! Queries filter by URIs, not names. The `*_uri` helpers resolve a name to
//! the URI of its best suggestion:
//!
//! ```ignore
//! let obama = er.concept_uri("Obama", "eng").await?;
//! ```

use crate::client::EventRegistry;
use crate::error::Result;
use crate::models::Suggestion;
use crate::pagination::parse_list;
use crate::query::{check_count, check_page, DataType, QueryParams};

/// Most suggestions one call returns.
pub const MAX_SUGGESTIONS: u32 = 1000;

/// Paging and language settings shared by the suggest calls.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestOptions {
    /// Language of the prefix.
    pub lang: String,
    /// Language of returned concept labels.
    pub concept_lang: String,
    /// Concept sources to search (`concepts`, `entities`, `things`...).
    pub concept_sources: Vec<String>,
    pub page: u32,
    pub count: u32,
}

impl Default for SuggestOptions {
    fn default() -> Self {
        Self {
            lang: "eng".to_string(),
            concept_lang: "eng".to_string(),
            concept_sources: vec!["concepts".to_string()],
            page: 1,
            count: 20,
        }
    }
}

impl SuggestOptions {
    #[must_use]
    pub fn with_lang(mut self, lang: &str) -> Self {
        self.lang = lang.to_string();
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    fn base_params(&self, prefix: &str) -> Result<QueryParams> {
        check_page(self.page)?;
        check_count("suggestion count", self.count, MAX_SUGGESTIONS)?;
        let mut params = QueryParams::new();
        params.set_val("prefix", prefix);
        params.set_val("page", self.page);
        params.set_val("count", self.count);
        Ok(params)
    }
}

/// Strip the weight from a `uri:weight` string.
///
/// Strings without a numeric weight suffix are returned unchanged, so
/// concept URLs keep their scheme.
pub fn uri_from_uri_wgt(uri_wgt: &str) -> &str {
    match uri_wgt.rsplit_once(':') {
        Some((uri, wgt)) if !wgt.is_empty() && wgt.parse::<f64>().is_ok() => uri,
        _ => uri_wgt,
    }
}

/// [`uri_from_uri_wgt`] over a list.
pub fn uris_from_uri_wgts<S: AsRef<str>>(uri_wgts: &[S]) -> Vec<String> {
    uri_wgts
        .iter()
        .map(|s| uri_from_uri_wgt(s.as_ref()).to_string())
        .collect()
}

fn first_uri(suggestions: Vec<Suggestion>) -> Option<String> {
    suggestions.into_iter().next().map(|s| s.uri)
}

impl EventRegistry {
    async fn suggest(&self, path: &str, params: QueryParams) -> Result<Vec<Suggestion>> {
        let response = self.json_request(path, params.into_params()).await?;
        parse_list(response, "suggestions")
    }

    /// Concepts whose label starts with `prefix`.
    #[tracing::instrument(skip(self, options))]
    pub async fn suggest_concepts(
        &self,
        prefix: &str,
        options: &SuggestOptions,
    ) -> Result<Vec<Suggestion>> {
        let mut params = options.base_params(prefix)?;
        params.set_list("source", &options.concept_sources);
        params.set_val("lang", options.lang.as_str());
        params.set_val("conceptLang", options.concept_lang.as_str());
        self.suggest("api/v1/suggestConceptsFast", params).await
    }

    #[tracing::instrument(skip(self, options))]
    pub async fn suggest_categories(
        &self,
        prefix: &str,
        options: &SuggestOptions,
    ) -> Result<Vec<Suggestion>> {
        let params = options.base_params(prefix)?;
        self.suggest("api/v1/suggestCategoriesFast", params).await
    }

    /// News sources by title or domain; all data types when `data_types` is empty.
    #[tracing::instrument(skip(self, options))]
    pub async fn suggest_news_sources(
        &self,
        prefix: &str,
        data_types: &[DataType],
        options: &SuggestOptions,
    ) -> Result<Vec<Suggestion>> {
        let mut params = options.base_params(prefix)?;
        let data_types = if data_types.is_empty() {
            &[DataType::News, DataType::PressRelease, DataType::Blog][..]
        } else {
            data_types
        };
        let names: Vec<String> = data_types.iter().map(|t| t.as_str().to_string()).collect();
        params.set_list("dataType", &names);
        self.suggest("api/v1/suggestSourcesFast", params).await
    }

    #[tracing::instrument(skip(self, options))]
    pub async fn suggest_source_groups(
        &self,
        prefix: &str,
        options: &SuggestOptions,
    ) -> Result<Vec<Suggestion>> {
        let params = options.base_params(prefix)?;
        self.suggest("api/v1/suggestSourceGroups", params).await
    }

    /// Places and countries by name, optionally within a country or sorted
    /// by distance to a `(lat, lon)` point.
    #[tracing::instrument(skip(self, options))]
    pub async fn suggest_locations(
        &self,
        prefix: &str,
        country_uri: Option<&str>,
        close_to: Option<(f64, f64)>,
        options: &SuggestOptions,
    ) -> Result<Vec<Suggestion>> {
        let mut params = options.base_params(prefix)?;
        params.set_list("source", &["place".to_string(), "country".to_string()]);
        params.set_val("lang", options.lang.as_str());
        params.set_opt("countryUri", country_uri);
        if let Some((lat, lon)) = close_to {
            params.set_val("closeToLat", lat);
            params.set_val("closeToLon", lon);
        }
        self.suggest("api/v1/suggestLocationsFast", params).await
    }

    /// Places within `radius_km` of a coordinate.
    #[tracing::instrument(skip(self, options))]
    pub async fn suggest_locations_at_coordinate(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
        limit_to_cities: bool,
        options: &SuggestOptions,
    ) -> Result<Vec<Suggestion>> {
        check_count("suggestion count", options.count, MAX_SUGGESTIONS)?;
        let mut params = QueryParams::new();
        params.set_val("action", "getLocationsAtCoordinate");
        params.set_val("lat", lat);
        params.set_val("lon", lon);
        params.set_val("radius", radius_km);
        params.set_val("limitToCities", limit_to_cities);
        params.set_val("count", options.count);
        params.set_val("lang", options.lang.as_str());
        self.suggest("api/v1/suggestLocationsFast", params).await
    }

    #[tracing::instrument(skip(self, options))]
    pub async fn suggest_concept_classes(
        &self,
        prefix: &str,
        options: &SuggestOptions,
    ) -> Result<Vec<Suggestion>> {
        let mut params = options.base_params(prefix)?;
        params.set_val("lang", options.lang.as_str());
        params.set_val("conceptLang", options.concept_lang.as_str());
        self.suggest("api/v1/suggestConceptClasses", params).await
    }

    #[tracing::instrument(skip(self, options))]
    pub async fn suggest_authors(
        &self,
        prefix: &str,
        options: &SuggestOptions,
    ) -> Result<Vec<Suggestion>> {
        let params = options.base_params(prefix)?;
        self.suggest("api/v1/suggestAuthorsFast", params).await
    }

    #[tracing::instrument(skip(self, options))]
    pub async fn suggest_event_types(
        &self,
        prefix: &str,
        options: &SuggestOptions,
    ) -> Result<Vec<Suggestion>> {
        let params = options.base_params(prefix)?;
        self.suggest("api/v1/eventType/suggestEventTypes", params).await
    }

    /// URI of the best concept match for `label`, if any.
    pub async fn concept_uri(&self, label: &str, lang: &str) -> Result<Option<String>> {
        let options = SuggestOptions::default().with_lang(lang);
        Ok(first_uri(self.suggest_concepts(label, &options).await?))
    }

    pub async fn category_uri(&self, label: &str) -> Result<Option<String>> {
        Ok(first_uri(self.suggest_categories(label, &SuggestOptions::default()).await?))
    }

    pub async fn news_source_uri(&self, name: &str) -> Result<Option<String>> {
        let found = self
            .suggest_news_sources(name, &[], &SuggestOptions::default())
            .await?;
        Ok(first_uri(found))
    }

    pub async fn location_uri(&self, label: &str, lang: &str) -> Result<Option<String>> {
        let options = SuggestOptions::default().with_lang(lang);
        Ok(first_uri(self.suggest_locations(label, None, None, &options).await?))
    }

    pub async fn source_group_uri(&self, name: &str) -> Result<Option<String>> {
        Ok(first_uri(self.suggest_source_groups(name, &SuggestOptions::default()).await?))
    }

    pub async fn author_uri(&self, name: &str) -> Result<Option<String>> {
        Ok(first_uri(self.suggest_authors(name, &SuggestOptions::default()).await?))
    }

    pub async fn event_type_uri(&self, label: &str) -> Result<Option<String>> {
        Ok(first_uri(self.suggest_event_types(label, &SuggestOptions::default()).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_uri_from_uri_wgt() {
        assert_eq!(uri_from_uri_wgt("801234:57"), "801234");
        assert_eq!(uri_from_uri_wgt("eng-123:4.5"), "eng-123");
        assert_eq!(
            uri_from_uri_wgt("http://en.wikipedia.org/wiki/Paris"),
            "http://en.wikipedia.org/wiki/Paris"
        );
        assert_eq!(uri_from_uri_wgt("801234"), "801234");
    }

    #[test]
    fn test_uris_from_list() {
        let list = vec!["1:10".to_string(), "2:5".to_string()];
        assert_eq!(uris_from_uri_wgts(&list), vec!["1", "2"]);
    }

    #[test]
    fn test_base_params() {
        let params = SuggestOptions::default()
            .with_count(5)
            .base_params("Oba")
            .unwrap()
            .into_params();
        assert_eq!(params["prefix"], json!("Oba"));
        assert_eq!(params["count"], json!(5));
        assert!(SuggestOptions::default().with_page(0).base_params("x").is_err());
    }

    #[test]
    fn test_first_uri() {
        assert_eq!(first_uri(Vec::new()), None);
        let suggestions = vec![Suggestion {
            uri: "a".to_string(),
            ..Default::default()
        }];
        assert_eq!(first_uri(suggestions).as_deref(), Some("a"));
    }
}
