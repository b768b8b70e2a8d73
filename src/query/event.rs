//! Lookup of individual events by URI.

use chrono::NaiveDate;

use crate::error::{EventRegistryError, Result};
use crate::return_info::ReturnInfo;
use crate::traits::Query;

use super::conditions::{check_count, check_page};
use super::options::EventArticleSortBy;
use super::params::{Params, QueryParams};

/// Largest page of event articles the API returns.
pub const MAX_EVENT_ARTICLES_PER_PAGE: u32 = 100;

/// What a [`QueryEvent`] should return for each event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventRequest {
    /// Event details.
    Info { return_info: ReturnInfo },
    /// A page of the articles reporting on the event.
    Articles {
        page: u32,
        count: u32,
        lang: Vec<String>,
        sort_by: EventArticleSortBy,
        sort_by_asc: bool,
        return_info: ReturnInfo,
    },
    /// `uri:weight` strings of all articles in the event.
    ArticleUriWgts { lang: Vec<String> },
    KeywordAggr { lang: String },
    SourceAggr,
    DateMentionAggr,
    /// Number of articles per day.
    ArticleTrend { lang: Vec<String> },
    /// Events similar to this one.
    SimilarEvents {
        count: u32,
        date_start: Option<NaiveDate>,
        date_end: Option<NaiveDate>,
        add_article_trend_info: bool,
        return_info: ReturnInfo,
    },
}

impl Default for EventRequest {
    fn default() -> Self {
        Self::Info {
            return_info: ReturnInfo::default(),
        }
    }
}

impl EventRequest {
    /// A page of event articles with default ordering.
    pub fn articles(page: u32, count: u32) -> Self {
        Self::Articles {
            page,
            count,
            lang: Vec::new(),
            sort_by: EventArticleSortBy::CosSim,
            sort_by_asc: false,
            return_info: ReturnInfo::default(),
        }
    }

    pub fn similar_events(count: u32) -> Self {
        Self::SimilarEvents {
            count,
            date_start: None,
            date_end: None,
            add_article_trend_info: false,
            return_info: ReturnInfo::default(),
        }
    }

    /// The key under which each event's entry carries this result.
    pub fn result_type(&self) -> &'static str {
        match self {
            Self::Info { .. } => "info",
            Self::Articles { .. } => "articles",
            Self::ArticleUriWgts { .. } => "uriWgtList",
            Self::KeywordAggr { .. } => "keywordAggr",
            Self::SourceAggr => "sourceExAggr",
            Self::DateMentionAggr => "dateMentionAggr",
            Self::ArticleTrend { .. } => "articleTrend",
            Self::SimilarEvents { .. } => "similarEvents",
        }
    }

    fn write_to(&self, params: &mut QueryParams) -> Result<()> {
        params.set_val("resultType", self.result_type());
        match self {
            Self::Info { return_info } => return_info.write_to(params),
            Self::Articles {
                page,
                count,
                lang,
                sort_by,
                sort_by_asc,
                return_info,
            } => {
                check_page(*page)?;
                check_count("event articles count", *count, MAX_EVENT_ARTICLES_PER_PAGE)?;
                params.set_val("articlesPage", *page);
                params.set_val("articlesCount", *count);
                params.set_list("articlesLang", lang);
                params.set_val("articlesSortBy", *sort_by);
                params.set_val("articlesSortByAsc", *sort_by_asc);
                return_info.write_to(params);
            }
            Self::ArticleUriWgts { lang } => params.set_list("uriWgtListLang", lang),
            Self::KeywordAggr { lang } => params.set_val("keywordAggrLang", lang.as_str()),
            Self::SourceAggr | Self::DateMentionAggr => {}
            Self::ArticleTrend { lang } => params.set_list("articleTrendLang", lang),
            Self::SimilarEvents {
                count,
                date_start,
                date_end,
                add_article_trend_info,
                return_info,
            } => {
                check_count("similar events count", *count, 50)?;
                params.set_val("similarEventsCount", *count);
                params.set_date("similarEventsDateStart", *date_start);
                params.set_date("similarEventsDateEnd", *date_end);
                params.set_val_if_not_default(
                    "similarEventsAddArticleTrendInfo",
                    *add_article_trend_info,
                    false,
                );
                return_info.write_to(params);
            }
        }
        Ok(())
    }
}

/// Fetch information about one or more known events.
///
/// The response is an object keyed by event URI.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryEvent {
    pub event_uris: Vec<String>,
    pub requested_result: EventRequest,
}

impl QueryEvent {
    pub fn new<I, S>(uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            event_uris: uris.into_iter().map(Into::into).collect(),
            requested_result: EventRequest::default(),
        }
    }

    #[must_use]
    pub fn with_requested_result(mut self, requested: EventRequest) -> Self {
        self.requested_result = requested;
        self
    }
}

impl Query for QueryEvent {
    fn path(&self) -> &'static str {
        "api/v1/event/getEvent"
    }

    fn params(&self) -> Result<Params> {
        if self.event_uris.is_empty() {
            return Err(EventRegistryError::invalid("at least one event URI is required"));
        }
        let mut params = QueryParams::new();
        params.set_val("action", "getEvent");
        params.set_list("eventUri", &self.event_uris);
        self.requested_result.write_to(&mut params)?;
        Ok(params.into_params())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_info_params() {
        let params = QueryEvent::new(["eng-123"]).params().unwrap();
        assert_eq!(params["eventUri"], json!(["eng-123"]));
        assert_eq!(params["resultType"], json!("info"));
    }

    #[test]
    fn test_articles_params() {
        let params = QueryEvent::new(["eng-123"])
            .with_requested_result(EventRequest::articles(2, 50))
            .params()
            .unwrap();
        assert_eq!(params["resultType"], json!("articles"));
        assert_eq!(params["articlesPage"], json!(2));
        assert_eq!(params["articlesSortBy"], json!("cosSim"));
    }

    #[test]
    fn test_similar_events_limit() {
        let query = QueryEvent::new(["eng-1"]).with_requested_result(EventRequest::similar_events(60));
        assert!(query.params().is_err());
    }
}
