//! Search conditions shared by article, event and mention queries.

use chrono::NaiveDate;

use crate::error::{EventRegistryError, Result};

use super::items::QueryItems;
use super::options::{DataType, KeywordLoc, KeywordSearchMode};
use super::params::QueryParams;

/// Filters common to every search query.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditions {
    pub keywords: Option<QueryItems>,
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
    pub date_mention_start: Option<NaiveDate>,
    pub date_mention_end: Option<NaiveDate>,
    pub keyword_loc: KeywordLoc,
    pub keyword_search_mode: KeywordSearchMode,
    pub ignore_keywords: Vec<String>,
    pub ignore_concept_uri: Vec<String>,
    pub ignore_category_uri: Vec<String>,
    pub ignore_source_uri: Vec<String>,
    pub ignore_source_location_uri: Vec<String>,
    pub ignore_source_group_uri: Vec<String>,
    pub ignore_author_uri: Vec<String>,
    pub ignore_location_uri: Vec<String>,
    pub ignore_lang: Vec<String>,
    pub ignore_keyword_loc: KeywordLoc,
    pub start_source_rank_percentile: u8,
    pub end_source_rank_percentile: u8,
    pub min_sentiment: Option<f64>,
    pub max_sentiment: Option<f64>,
    pub data_types: Vec<DataType>,
}

impl Default for Conditions {
    fn default() -> Self {
        Self {
            keywords: None,
            concept_uri: None,
            category_uri: None,
            source_uri: None,
            source_location_uri: None,
            source_group_uri: None,
            author_uri: None,
            location_uri: None,
            lang: None,
            date_start: None,
            date_end: None,
            date_mention_start: None,
            date_mention_end: None,
            keyword_loc: KeywordLoc::default(),
            keyword_search_mode: KeywordSearchMode::default(),
            ignore_keywords: Vec::new(),
            ignore_concept_uri: Vec::new(),
            ignore_category_uri: Vec::new(),
            ignore_source_uri: Vec::new(),
            ignore_source_location_uri: Vec::new(),
            ignore_source_group_uri: Vec::new(),
            ignore_author_uri: Vec::new(),
            ignore_location_uri: Vec::new(),
            ignore_lang: Vec::new(),
            ignore_keyword_loc: KeywordLoc::default(),
            start_source_rank_percentile: 0,
            end_source_rank_percentile: 100,
            min_sentiment: None,
            max_sentiment: None,
            data_types: vec![DataType::News],
        }
    }
}

/// Validate a source rank percentile window.
pub(crate) fn check_rank_percentiles(start: u8, end: u8) -> Result<()> {
    if start % 10 != 0 || end % 10 != 0 {
        return Err(EventRegistryError::invalid(
            "source rank percentiles must be multiples of 10",
        ));
    }
    if start >= end || end > 100 {
        return Err(EventRegistryError::invalid(format!(
            "source rank percentile window {start}..{end} is empty or exceeds 100"
        )));
    }
    Ok(())
}

/// Validate sentiment bounds, which live in `[-1, 1]`.
pub(crate) fn check_sentiment(min: Option<f64>, max: Option<f64>) -> Result<()> {
    for value in [min, max].into_iter().flatten() {
        if !(-1.0..=1.0).contains(&value) {
            return Err(EventRegistryError::invalid(format!(
                "sentiment {value} is outside [-1, 1]"
            )));
        }
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(EventRegistryError::invalid(
                "min sentiment is greater than max sentiment",
            ));
        }
    }
    Ok(())
}

pub(crate) fn check_date_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    what: &str,
) -> Result<()> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(EventRegistryError::invalid(format!(
                "{what} start {start} is after end {end}"
            )));
        }
    }
    Ok(())
}

/// Reject a page size above the endpoint's limit.
pub(crate) fn check_count(what: &str, count: u32, max: u32) -> Result<()> {
    if count == 0 || count > max {
        return Err(EventRegistryError::invalid(format!(
            "{what} must be between 1 and {max}, got {count}"
        )));
    }
    Ok(())
}

pub(crate) fn check_page(page: u32) -> Result<()> {
    if page == 0 {
        return Err(EventRegistryError::invalid("page numbers start at 1"));
    }
    Ok(())
}

impl Conditions {
    /// Validate and append the conditions to a parameter builder.
    pub fn write_to(&self, params: &mut QueryParams) -> Result<()> {
        check_date_range(self.date_start, self.date_end, "date")?;
        check_date_range(self.date_mention_start, self.date_mention_end, "date mention")?;
        check_rank_percentiles(
            self.start_source_rank_percentile,
            self.end_source_rank_percentile,
        )?;
        check_sentiment(self.min_sentiment, self.max_sentiment)?;

        params.set_items("keyword", self.keywords.as_ref());
        params.set_items("conceptUri", self.concept_uri.as_ref());
        params.set_items("categoryUri", self.category_uri.as_ref());
        params.set_items("sourceUri", self.source_uri.as_ref());
        params.set_items("sourceLocationUri", self.source_location_uri.as_ref());
        params.set_items("sourceGroupUri", self.source_group_uri.as_ref());
        params.set_items("authorUri", self.author_uri.as_ref());
        params.set_items("locationUri", self.location_uri.as_ref());
        params.set_items("lang", self.lang.as_ref());

        params.set_date("dateStart", self.date_start);
        params.set_date("dateEnd", self.date_end);
        params.set_date("dateMentionStart", self.date_mention_start);
        params.set_date("dateMentionEnd", self.date_mention_end);

        params.set_val_if_not_default("keywordLoc", self.keyword_loc, KeywordLoc::Body);
        params.set_val_if_not_default(
            "keywordSearchMode",
            self.keyword_search_mode,
            KeywordSearchMode::Phrase,
        );

        params.set_list("ignoreKeyword", &self.ignore_keywords);
        params.set_list("ignoreConceptUri", &self.ignore_concept_uri);
        params.set_list("ignoreCategoryUri", &self.ignore_category_uri);
        params.set_list("ignoreSourceUri", &self.ignore_source_uri);
        params.set_list("ignoreSourceLocationUri", &self.ignore_source_location_uri);
        params.set_list("ignoreSourceGroupUri", &self.ignore_source_group_uri);
        params.set_list("ignoreAuthorUri", &self.ignore_author_uri);
        params.set_list("ignoreLocationUri", &self.ignore_location_uri);
        params.set_list("ignoreLang", &self.ignore_lang);
        params.set_val_if_not_default(
            "ignoreKeywordLoc",
            self.ignore_keyword_loc,
            KeywordLoc::Body,
        );

        params.set_val_if_not_default(
            "startSourceRankPercentile",
            self.start_source_rank_percentile,
            0,
        );
        params.set_val_if_not_default(
            "endSourceRankPercentile",
            self.end_source_rank_percentile,
            100,
        );
        params.set_opt("minSentiment", self.min_sentiment);
        params.set_opt("maxSentiment", self.max_sentiment);

        if !self.data_types.is_empty() {
            let types: Vec<String> =
                self.data_types.iter().map(|d| d.as_str().to_string()).collect();
            params.set_list("dataType", &types);
        }
        Ok(())
    }
}

/// Builder methods for queries that carry [`Conditions`].
pub trait Filtered {
    /// Returns a mutable reference to the shared conditions.
    fn conditions_mut(&mut self) -> &mut Conditions;

    /// Match keywords (a single phrase, or an AND/OR list).
    fn with_keywords(mut self, keywords: impl Into<QueryItems>) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut().keywords = Some(keywords.into());
        self
    }

    fn with_concept_uri(mut self, uri: impl Into<QueryItems>) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut().concept_uri = Some(uri.into());
        self
    }

    fn with_category_uri(mut self, uri: impl Into<QueryItems>) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut().category_uri = Some(uri.into());
        self
    }

    fn with_source_uri(mut self, uri: impl Into<QueryItems>) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut().source_uri = Some(uri.into());
        self
    }

    fn with_source_location_uri(mut self, uri: impl Into<QueryItems>) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut().source_location_uri = Some(uri.into());
        self
    }

    fn with_source_group_uri(mut self, uri: impl Into<QueryItems>) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut().source_group_uri = Some(uri.into());
        self
    }

    fn with_author_uri(mut self, uri: impl Into<QueryItems>) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut().author_uri = Some(uri.into());
        self
    }

    fn with_location_uri(mut self, uri: impl Into<QueryItems>) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut().location_uri = Some(uri.into());
        self
    }

    fn with_lang(mut self, lang: impl Into<QueryItems>) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut().lang = Some(lang.into());
        self
    }

    /// Restrict to a publication date window (inclusive).
    fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self
    where
        Self: Sized,
    {
        let conditions = self.conditions_mut();
        conditions.date_start = start;
        conditions.date_end = end;
        self
    }

    /// Restrict to content mentioning dates in a window.
    fn with_date_mention_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self
    where
        Self: Sized,
    {
        let conditions = self.conditions_mut();
        conditions.date_mention_start = start;
        conditions.date_mention_end = end;
        self
    }

    fn with_keyword_loc(mut self, loc: KeywordLoc) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut().keyword_loc = loc;
        self
    }

    fn with_keyword_search_mode(mut self, mode: KeywordSearchMode) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut().keyword_search_mode = mode;
        self
    }

    fn ignore_keyword(mut self, keyword: &str) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut().ignore_keywords.push(keyword.to_string());
        self
    }

    fn ignore_concept_uri(mut self, uri: &str) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut().ignore_concept_uri.push(uri.to_string());
        self
    }

    fn ignore_category_uri(mut self, uri: &str) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut().ignore_category_uri.push(uri.to_string());
        self
    }

    fn ignore_source_uri(mut self, uri: &str) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut().ignore_source_uri.push(uri.to_string());
        self
    }

    fn ignore_source_location_uri(mut self, uri: &str) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut()
            .ignore_source_location_uri
            .push(uri.to_string());
        self
    }

    fn ignore_source_group_uri(mut self, uri: &str) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut()
            .ignore_source_group_uri
            .push(uri.to_string());
        self
    }

    fn ignore_author_uri(mut self, uri: &str) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut().ignore_author_uri.push(uri.to_string());
        self
    }

    fn ignore_location_uri(mut self, uri: &str) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut().ignore_location_uri.push(uri.to_string());
        self
    }

    fn ignore_lang(mut self, lang: &str) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut().ignore_lang.push(lang.to_string());
        self
    }

    fn with_ignore_keyword_loc(mut self, loc: KeywordLoc) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut().ignore_keyword_loc = loc;
        self
    }

    /// Keep only sources ranked within `start..end` percentiles (multiples of 10).
    fn with_source_rank_percentile(mut self, start: u8, end: u8) -> Self
    where
        Self: Sized,
    {
        let conditions = self.conditions_mut();
        conditions.start_source_rank_percentile = start;
        conditions.end_source_rank_percentile = end;
        self
    }

    /// Bound the sentiment of returned items, each in `[-1, 1]`.
    fn with_sentiment_range(mut self, min: Option<f64>, max: Option<f64>) -> Self
    where
        Self: Sized,
    {
        let conditions = self.conditions_mut();
        conditions.min_sentiment = min;
        conditions.max_sentiment = max;
        self
    }

    fn with_data_types(mut self, data_types: &[DataType]) -> Self
    where
        Self: Sized,
    {
        self.conditions_mut().data_types = data_types.to_vec();
        self
    }
}
