//! Currently trending concepts, categories and custom items.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::EventRegistry;
use crate::error::{EventRegistryError, Result};
use crate::models::{Category, Concept};
use crate::pagination::parse_list;
use crate::query::{check_count, ConceptType, Params, QueryParams, TrendSource};
use crate::return_info::ReturnInfo;
use crate::traits::Query;

const TRENDS_PATH: &str = "api/v1/trends";

/// Largest number of trending items the API returns.
pub const MAX_TRENDING_ITEMS: u32 = 200;

/// A concept with its trending score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingConcept {
    #[serde(flatten)]
    pub concept: Concept,
    #[serde(default)]
    pub trending_score: Option<Value>,
}

/// A category with its trending score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingCategory {
    #[serde(flatten)]
    pub category: Category,
    #[serde(default)]
    pub trending_score: Option<Value>,
}

/// Concepts currently trending in news or social media.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendingConcepts {
    pub source: TrendSource,
    pub count: u32,
    pub concept_types: Vec<ConceptType>,
    pub return_info: ReturnInfo,
}

impl Default for TrendingConcepts {
    fn default() -> Self {
        Self {
            source: TrendSource::News,
            count: 20,
            concept_types: vec![
                ConceptType::Person,
                ConceptType::Organization,
                ConceptType::Location,
            ],
            return_info: ReturnInfo::default(),
        }
    }
}

impl TrendingConcepts {
    #[must_use]
    pub fn new(source: TrendSource, count: u32) -> Self {
        Self {
            source,
            count,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_concept_types(mut self, types: Vec<ConceptType>) -> Self {
        self.concept_types = types;
        self
    }

    #[must_use]
    pub fn with_return_info(mut self, return_info: ReturnInfo) -> Self {
        self.return_info = return_info;
        self
    }

    pub async fn fetch(&self, client: &EventRegistry) -> Result<Vec<TrendingConcept>> {
        parse_list(client.exec_query(self).await?, "trending concepts")
    }
}

impl Query for TrendingConcepts {
    fn path(&self) -> &'static str {
        TRENDS_PATH
    }

    fn params(&self) -> Result<Params> {
        check_count("trending concepts count", self.count, MAX_TRENDING_ITEMS)?;
        let mut params = QueryParams::new();
        params.set_val("action", "getTrendingConcepts");
        params.set_val("source", self.source);
        params.set_val("conceptCount", self.count);
        params.set_val(
            "conceptType",
            self.concept_types.iter().map(|t| Value::from(*t)).collect::<Vec<_>>(),
        );
        self.return_info.write_to(&mut params);
        Ok(params.into_params())
    }
}

/// Categories currently trending in news or social media.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendingCategories {
    pub source: TrendSource,
    pub count: u32,
    pub return_info: ReturnInfo,
}

impl Default for TrendingCategories {
    fn default() -> Self {
        Self::new(TrendSource::News, 20)
    }
}

impl TrendingCategories {
    #[must_use]
    pub fn new(source: TrendSource, count: u32) -> Self {
        Self {
            source,
            count,
            return_info: ReturnInfo::default(),
        }
    }

    pub async fn fetch(&self, client: &EventRegistry) -> Result<Vec<TrendingCategory>> {
        parse_list(client.exec_query(self).await?, "trending categories")
    }
}

impl Query for TrendingCategories {
    fn path(&self) -> &'static str {
        TRENDS_PATH
    }

    fn params(&self) -> Result<Params> {
        check_count("trending categories count", self.count, MAX_TRENDING_ITEMS)?;
        let mut params = QueryParams::new();
        params.set_val("action", "getTrendingCategories");
        params.set_val("source", self.source);
        params.set_val("categoryCount", self.count);
        self.return_info.write_to(&mut params);
        Ok(params.into_params())
    }
}

/// Trending items from the custom concept list of the account.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendingCustomItems {
    pub source: TrendSource,
    pub count: u32,
    pub return_info: ReturnInfo,
}

impl Default for TrendingCustomItems {
    fn default() -> Self {
        Self::new(TrendSource::News, 20)
    }
}

impl TrendingCustomItems {
    #[must_use]
    pub fn new(source: TrendSource, count: u32) -> Self {
        Self {
            source,
            count,
            return_info: ReturnInfo::default(),
        }
    }
}

impl Query for TrendingCustomItems {
    fn path(&self) -> &'static str {
        TRENDS_PATH
    }

    fn params(&self) -> Result<Params> {
        check_count("trending items count", self.count, MAX_TRENDING_ITEMS)?;
        let mut params = QueryParams::new();
        params.set_val("action", "getTrendingCustom");
        params.set_val("source", self.source);
        params.set_val("conceptCount", self.count);
        self.return_info.write_to(&mut params);
        Ok(params.into_params())
    }
}

/// Trending concepts grouped by concept type or concept class.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendingConceptGroups {
    pub source: TrendSource,
    pub count: u32,
    pub concept_types: Vec<ConceptType>,
    pub concept_class_uris: Vec<String>,
    pub return_info: ReturnInfo,
}

impl Default for TrendingConceptGroups {
    fn default() -> Self {
        Self::new(TrendSource::News, 20)
    }
}

impl TrendingConceptGroups {
    #[must_use]
    pub fn new(source: TrendSource, count: u32) -> Self {
        Self {
            source,
            count,
            concept_types: Vec::new(),
            concept_class_uris: Vec::new(),
            return_info: ReturnInfo::default(),
        }
    }

    /// Add a group with the concepts of the given types.
    #[must_use]
    pub fn with_concept_type_group(mut self, types: &[ConceptType]) -> Self {
        self.concept_types.extend_from_slice(types);
        self
    }

    /// Add groups for the given concept classes.
    #[must_use]
    pub fn with_concept_class_uris<I, S>(mut self, uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.concept_class_uris.extend(uris.into_iter().map(Into::into));
        self
    }
}

impl Query for TrendingConceptGroups {
    fn path(&self) -> &'static str {
        TRENDS_PATH
    }

    fn params(&self) -> Result<Params> {
        check_count("trending concepts count", self.count, MAX_TRENDING_ITEMS)?;
        if self.concept_types.is_empty() && self.concept_class_uris.is_empty() {
            return Err(EventRegistryError::invalid(
                "add at least one concept type group or concept class",
            ));
        }
        let mut params = QueryParams::new();
        params.set_val("action", "getConceptTrendGroups");
        params.set_val("source", self.source);
        params.set_val("conceptCount", self.count);
        if !self.concept_types.is_empty() {
            params.set_val(
                "conceptType",
                self.concept_types.iter().map(|t| Value::from(*t)).collect::<Vec<_>>(),
            );
        }
        params.set_list("conceptClassUri", &self.concept_class_uris);
        self.return_info.write_to(&mut params);
        Ok(params.into_params())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trending_concepts_params() {
        let params = TrendingConcepts::new(TrendSource::Social, 10).params().unwrap();
        assert_eq!(params["action"], json!("getTrendingConcepts"));
        assert_eq!(params["source"], json!("social"));
        assert_eq!(params["conceptCount"], json!(10));
        assert_eq!(params["conceptType"], json!(["person", "org", "loc"]));
    }

    #[test]
    fn test_trending_categories_params() {
        let params = TrendingCategories::default().params().unwrap();
        assert_eq!(params["action"], json!("getTrendingCategories"));
        assert_eq!(params["categoryCount"], json!(20));
    }

    #[test]
    fn test_custom_items_action() {
        let query = TrendingCustomItems::default();
        assert_eq!(query.path(), "api/v1/trends");
        assert_eq!(query.params().unwrap()["action"], json!("getTrendingCustom"));
    }

    #[test]
    fn test_concept_groups_need_a_group() {
        assert!(TrendingConceptGroups::default().params().is_err());
        let params = TrendingConceptGroups::default()
            .with_concept_type_group(&[ConceptType::Person])
            .with_concept_class_uris(["dbpedia/Company"])
            .params()
            .unwrap();
        assert_eq!(params["conceptType"], json!(["person"]));
        assert_eq!(params["conceptClassUri"], json!(["dbpedia/Company"]));
    }

    #[test]
    fn test_count_limits() {
        assert!(TrendingConcepts::new(TrendSource::News, 0).params().is_err());
        assert!(TrendingCategories::new(TrendSource::News, 201).params().is_err());
    }

    #[test]
    fn test_trending_concept_deserialize() {
        let items: Vec<TrendingConcept> = parse_list(
            json!([{"uri": "http://en.wikipedia.org/wiki/X", "type": "person", "trendingScore": {"news": {"score": 4.2}}}]),
            "concepts",
        )
        .unwrap();
        assert_eq!(items[0].concept.concept_type.as_deref(), Some("person"));
        assert!(parse_list::<TrendingConcept>(json!({}), "concepts").is_err());
    }
}
