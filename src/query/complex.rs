//! The structured query language (`$query` / `$filter` documents).
//!
//! Simple queries flatten every condition into one parameter map, which
//! cannot express things like "(A and B) or C". Complex queries build a JSON
//! tree instead; it is sent as a string in the `query` parameter.

use chrono::NaiveDate;
use serde_json::{json, Map, Value};

use crate::error::Result;

use super::conditions::{check_date_range, check_rank_percentiles, check_sentiment};
use super::items::QueryItems;
use super::options::{DataType, EventFilter, HasDuplicateFilter, IsDuplicateFilter, KeywordLoc};
use super::params::format_date;

/// A leaf of a complex query: conditions that must all hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseQuery {
    pub keyword: Option<QueryItems>,
    pub keyword_loc: Option<KeywordLoc>,
    pub concept_uri: Option<QueryItems>,
    pub category_uri: Option<QueryItems>,
    pub source_uri: Option<QueryItems>,
    pub source_location_uri: Option<QueryItems>,
    pub source_group_uri: Option<QueryItems>,
    pub author_uri: Option<QueryItems>,
    pub location_uri: Option<QueryItems>,
    pub lang: Option<QueryItems>,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    pub date_mention: Vec<NaiveDate>,
    /// Matches that must be excluded.
    pub exclude: Option<Box<ComplexQueryPart>>,
}

impl BaseQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn keyword(mut self, keyword: impl Into<QueryItems>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    #[must_use]
    pub fn keyword_loc(mut self, loc: KeywordLoc) -> Self {
        self.keyword_loc = Some(loc);
        self
    }

    #[must_use]
    pub fn concept_uri(mut self, uri: impl Into<QueryItems>) -> Self {
        self.concept_uri = Some(uri.into());
        self
    }

    #[must_use]
    pub fn category_uri(mut self, uri: impl Into<QueryItems>) -> Self {
        self.category_uri = Some(uri.into());
        self
    }

    #[must_use]
    pub fn source_uri(mut self, uri: impl Into<QueryItems>) -> Self {
        self.source_uri = Some(uri.into());
        self
    }

    #[must_use]
    pub fn source_location_uri(mut self, uri: impl Into<QueryItems>) -> Self {
        self.source_location_uri = Some(uri.into());
        self
    }

    #[must_use]
    pub fn source_group_uri(mut self, uri: impl Into<QueryItems>) -> Self {
        self.source_group_uri = Some(uri.into());
        self
    }

    #[must_use]
    pub fn author_uri(mut self, uri: impl Into<QueryItems>) -> Self {
        self.author_uri = Some(uri.into());
        self
    }

    #[must_use]
    pub fn location_uri(mut self, uri: impl Into<QueryItems>) -> Self {
        self.location_uri = Some(uri.into());
        self
    }

    #[must_use]
    pub fn lang(mut self, lang: impl Into<QueryItems>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    #[must_use]
    pub fn date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.date_start = start;
        self.date_end = end;
        self
    }

    #[must_use]
    pub fn date_mention(mut self, date: NaiveDate) -> Self {
        self.date_mention.push(date);
        self
    }

    #[must_use]
    pub fn exclude(mut self, part: impl Into<ComplexQueryPart>) -> Self {
        self.exclude = Some(Box::new(part.into()));
        self
    }

    fn to_json(&self) -> Result<Value> {
        check_date_range(self.date_start, self.date_end, "date")?;

        let mut map = Map::new();
        let items = [
            ("keyword", &self.keyword),
            ("conceptUri", &self.concept_uri),
            ("categoryUri", &self.category_uri),
            ("sourceUri", &self.source_uri),
            ("sourceLocationUri", &self.source_location_uri),
            ("sourceGroupUri", &self.source_group_uri),
            ("authorUri", &self.author_uri),
            ("locationUri", &self.location_uri),
            ("lang", &self.lang),
        ];
        for (key, value) in items {
            if let Some(value) = value.as_ref().filter(|v| !v.is_empty()) {
                map.insert(key.to_string(), value.to_complex_value());
            }
        }
        if let Some(loc) = self.keyword_loc {
            map.insert("keywordLoc".to_string(), loc.into());
        }
        if let Some(start) = self.date_start {
            map.insert("dateStart".to_string(), format_date(start).into());
        }
        if let Some(end) = self.date_end {
            map.insert("dateEnd".to_string(), format_date(end).into());
        }
        if !self.date_mention.is_empty() {
            let dates: Vec<String> = self.date_mention.iter().copied().map(format_date).collect();
            map.insert("dateMention".to_string(), json!(dates));
        }
        if let Some(ref exclude) = self.exclude {
            map.insert("$not".to_string(), exclude.to_json()?);
        }
        Ok(Value::Object(map))
    }
}

/// Boolean combination of sub-queries.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedQuery {
    operator: &'static str,
    parts: Vec<ComplexQueryPart>,
    exclude: Option<Box<ComplexQueryPart>>,
}

impl CombinedQuery {
    /// All parts must match.
    pub fn and<I, P>(parts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ComplexQueryPart>,
    {
        Self {
            operator: "$and",
            parts: parts.into_iter().map(Into::into).collect(),
            exclude: None,
        }
    }

    /// Any part may match.
    pub fn or<I, P>(parts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ComplexQueryPart>,
    {
        Self {
            operator: "$or",
            parts: parts.into_iter().map(Into::into).collect(),
            exclude: None,
        }
    }

    #[must_use]
    pub fn exclude(mut self, part: impl Into<ComplexQueryPart>) -> Self {
        self.exclude = Some(Box::new(part.into()));
        self
    }

    fn to_json(&self) -> Result<Value> {
        let parts = self
            .parts
            .iter()
            .map(ComplexQueryPart::to_json)
            .collect::<Result<Vec<_>>>()?;
        let mut map = Map::new();
        map.insert(self.operator.to_string(), Value::Array(parts));
        if let Some(ref exclude) = self.exclude {
            map.insert("$not".to_string(), exclude.to_json()?);
        }
        Ok(Value::Object(map))
    }
}

/// Any node of a complex query tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ComplexQueryPart {
    Base(BaseQuery),
    Combined(CombinedQuery),
}

impl ComplexQueryPart {
    fn to_json(&self) -> Result<Value> {
        match self {
            Self::Base(q) => q.to_json(),
            Self::Combined(q) => q.to_json(),
        }
    }
}

impl From<BaseQuery> for ComplexQueryPart {
    fn from(q: BaseQuery) -> Self {
        Self::Base(q)
    }
}

impl From<CombinedQuery> for ComplexQueryPart {
    fn from(q: CombinedQuery) -> Self {
        Self::Combined(q)
    }
}

/// A complete complex article query: a condition tree plus result filters.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexArticleQuery {
    pub query: ComplexQueryPart,
    pub data_types: Vec<DataType>,
    pub min_sentiment: Option<f64>,
    pub max_sentiment: Option<f64>,
    pub is_duplicate_filter: IsDuplicateFilter,
    pub has_duplicate_filter: HasDuplicateFilter,
    pub event_filter: EventFilter,
    pub start_source_rank_percentile: u8,
    pub end_source_rank_percentile: u8,
}

impl ComplexArticleQuery {
    pub fn new(query: impl Into<ComplexQueryPart>) -> Self {
        Self {
            query: query.into(),
            data_types: vec![DataType::News],
            min_sentiment: None,
            max_sentiment: None,
            is_duplicate_filter: IsDuplicateFilter::default(),
            has_duplicate_filter: HasDuplicateFilter::default(),
            event_filter: EventFilter::default(),
            start_source_rank_percentile: 0,
            end_source_rank_percentile: 100,
        }
    }

    #[must_use]
    pub fn data_types(mut self, data_types: &[DataType]) -> Self {
        self.data_types = data_types.to_vec();
        self
    }

    #[must_use]
    pub fn sentiment_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_sentiment = min;
        self.max_sentiment = max;
        self
    }

    #[must_use]
    pub fn is_duplicate_filter(mut self, filter: IsDuplicateFilter) -> Self {
        self.is_duplicate_filter = filter;
        self
    }

    #[must_use]
    pub fn has_duplicate_filter(mut self, filter: HasDuplicateFilter) -> Self {
        self.has_duplicate_filter = filter;
        self
    }

    #[must_use]
    pub fn event_filter(mut self, filter: EventFilter) -> Self {
        self.event_filter = filter;
        self
    }

    #[must_use]
    pub fn source_rank_percentile(mut self, start: u8, end: u8) -> Self {
        self.start_source_rank_percentile = start;
        self.end_source_rank_percentile = end;
        self
    }

    /// The `{"$query": ..., "$filter": ...}` document.
    pub fn to_json(&self) -> Result<Value> {
        check_sentiment(self.min_sentiment, self.max_sentiment)?;
        check_rank_percentiles(
            self.start_source_rank_percentile,
            self.end_source_rank_percentile,
        )?;

        let mut filter = Map::new();
        if !self.data_types.is_empty() {
            let types: Vec<&str> = self.data_types.iter().map(DataType::as_str).collect();
            filter.insert("dataType".to_string(), json!(types));
        }
        if let Some(min) = self.min_sentiment {
            filter.insert("minSentiment".to_string(), min.into());
        }
        if let Some(max) = self.max_sentiment {
            filter.insert("maxSentiment".to_string(), max.into());
        }
        if self.is_duplicate_filter != IsDuplicateFilter::KeepAll {
            filter.insert("isDuplicate".to_string(), self.is_duplicate_filter.into());
        }
        if self.has_duplicate_filter != HasDuplicateFilter::KeepAll {
            filter.insert("hasDuplicate".to_string(), self.has_duplicate_filter.into());
        }
        if self.event_filter != EventFilter::KeepAll {
            filter.insert("hasEvent".to_string(), self.event_filter.into());
        }
        if self.start_source_rank_percentile != 0 {
            filter.insert(
                "startSourceRankPercentile".to_string(),
                self.start_source_rank_percentile.into(),
            );
        }
        if self.end_source_rank_percentile != 100 {
            filter.insert(
                "endSourceRankPercentile".to_string(),
                self.end_source_rank_percentile.into(),
            );
        }

        Ok(json!({ "$query": self.query.to_json()?, "$filter": filter }))
    }
}

/// A complete complex event query.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexEventQuery {
    pub query: ComplexQueryPart,
    pub min_articles_in_event: Option<u32>,
    pub max_articles_in_event: Option<u32>,
}

impl ComplexEventQuery {
    pub fn new(query: impl Into<ComplexQueryPart>) -> Self {
        Self {
            query: query.into(),
            min_articles_in_event: None,
            max_articles_in_event: None,
        }
    }

    #[must_use]
    pub fn articles_in_event(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_articles_in_event = min;
        self.max_articles_in_event = max;
        self
    }

    pub fn to_json(&self) -> Result<Value> {
        let mut filter = Map::new();
        if let Some(min) = self.min_articles_in_event {
            filter.insert("minArticlesInEvent".to_string(), min.into());
        }
        if let Some(max) = self.max_articles_in_event {
            filter.insert("maxArticlesInEvent".to_string(), max.into());
        }
        Ok(json!({ "$query": self.query.to_json()?, "$filter": filter }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_query_serialization() {
        let q = BaseQuery::new()
            .keyword(QueryItems::and(["Tesla", "battery"]))
            .lang("eng")
            .exclude(BaseQuery::new().keyword("recall"));
        let value = ComplexQueryPart::from(q).to_json().unwrap();
        assert_eq!(
            value,
            json!({
                "keyword": {"$and": ["Tesla", "battery"]},
                "lang": "eng",
                "$not": {"keyword": "recall"}
            })
        );
    }

    #[test]
    fn test_combined_query_nesting() {
        let q = CombinedQuery::or([
            BaseQuery::new().concept_uri("http://en.wikipedia.org/wiki/Apple_Inc."),
            BaseQuery::new().keyword("iPhone"),
        ]);
        let doc = ComplexArticleQuery::new(q)
            .is_duplicate_filter(IsDuplicateFilter::SkipDuplicates)
            .to_json()
            .unwrap();

        assert_eq!(doc["$query"]["$or"].as_array().unwrap().len(), 2);
        assert_eq!(doc["$filter"]["isDuplicate"], "skipDuplicates");
        assert_eq!(doc["$filter"]["dataType"], json!(["news"]));
    }

    #[test]
    fn test_complex_filter_validation() {
        let doc = ComplexArticleQuery::new(BaseQuery::new().keyword("x"))
            .sentiment_range(Some(2.0), None)
            .to_json();
        assert!(doc.is_err());
    }

    #[test]
    fn test_event_query_filter() {
        let doc = ComplexEventQuery::new(BaseQuery::new().keyword("earthquake"))
            .articles_in_event(Some(10), None)
            .to_json()
            .unwrap();
        assert_eq!(doc["$filter"], json!({"minArticlesInEvent": 10}));
    }
}
