//! Event search (`QueryEvents`) and its requested result types.

use chrono::NaiveDate;

use crate::error::{EventRegistryError, Result};
use crate::return_info::ReturnInfo;
use crate::traits::Query;

use super::complex::ComplexEventQuery;
use super::conditions::{check_count, check_date_range, check_page, Conditions, Filtered};
use super::options::{EventSortBy, UriWgtSortBy};
use super::params::{Params, QueryParams};

/// Largest page of events the API returns.
pub const MAX_EVENTS_PER_PAGE: u32 = 50;

/// A page of full event records.
#[derive(Debug, Clone, PartialEq)]
pub struct EventListRequest {
    pub page: u32,
    pub count: u32,
    pub sort_by: EventSortBy,
    pub sort_by_asc: bool,
    pub return_info: ReturnInfo,
}

impl Default for EventListRequest {
    fn default() -> Self {
        Self {
            page: 1,
            count: MAX_EVENTS_PER_PAGE,
            sort_by: EventSortBy::Relevance,
            sort_by_asc: false,
            return_info: ReturnInfo::default(),
        }
    }
}

impl EventListRequest {
    pub fn new(page: u32, count: u32) -> Self {
        Self {
            page,
            count,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn sorted_by(mut self, sort_by: EventSortBy, ascending: bool) -> Self {
        self.sort_by = sort_by;
        self.sort_by_asc = ascending;
        self
    }

    #[must_use]
    pub fn with_return_info(mut self, return_info: ReturnInfo) -> Self {
        self.return_info = return_info;
        self
    }
}

/// What a [`QueryEvents`] should return.
#[derive(Debug, Clone, PartialEq)]
pub enum EventsRequest {
    Events(EventListRequest),
    UriWgtList {
        page: u32,
        count: u32,
        sort_by: UriWgtSortBy,
    },
    TimeAggr,
    KeywordAggr { lang: String },
    LocAggr { events_sample_size: u32 },
    ConceptAggr {
        concept_count: u32,
        events_sample_size: u32,
        return_info: ReturnInfo,
    },
    ConceptGraph {
        concept_count: u32,
        link_count: u32,
        events_sample_size: u32,
    },
    SourceAggr { source_count: u32 },
    DateMentionAggr,
    CategoryAggr,
    /// Clusters of events described by shared keywords.
    EventClusters {
        keyword_count: u32,
        max_events_to_cluster: u32,
    },
}

impl Default for EventsRequest {
    fn default() -> Self {
        Self::Events(EventListRequest::default())
    }
}

impl EventsRequest {
    /// The key under which the response carries this result.
    pub fn result_type(&self) -> &'static str {
        match self {
            Self::Events(_) => "events",
            Self::UriWgtList { .. } => "uriWgtList",
            Self::TimeAggr => "timeAggr",
            Self::KeywordAggr { .. } => "keywordAggr",
            Self::LocAggr { .. } => "locAggr",
            Self::ConceptAggr { .. } => "conceptAggr",
            Self::ConceptGraph { .. } => "conceptGraph",
            Self::SourceAggr { .. } => "sourceAggr",
            Self::DateMentionAggr => "dateMentionAggr",
            Self::CategoryAggr => "categoryAggr",
            Self::EventClusters { .. } => "eventClusters",
        }
    }

    /// Validate and append the result parameters.
    pub fn write_to(&self, params: &mut QueryParams) -> Result<()> {
        params.set_val("resultType", self.result_type());
        match self {
            Self::Events(req) => {
                check_page(req.page)?;
                check_count("events count", req.count, MAX_EVENTS_PER_PAGE)?;
                params.set_val("eventsPage", req.page);
                params.set_val("eventsCount", req.count);
                params.set_val("eventsSortBy", req.sort_by);
                params.set_val("eventsSortByAsc", req.sort_by_asc);
                req.return_info.write_to(params);
            }
            Self::UriWgtList {
                page,
                count,
                sort_by,
            } => {
                check_page(*page)?;
                check_count("uriWgtList count", *count, 100_000)?;
                params.set_val("uriWgtListPage", *page);
                params.set_val("uriWgtListCount", *count);
                params.set_val("uriWgtListSortBy", *sort_by);
            }
            Self::TimeAggr | Self::DateMentionAggr | Self::CategoryAggr => {}
            Self::KeywordAggr { lang } => {
                params.set_val("keywordAggrLang", lang.as_str());
            }
            Self::LocAggr { events_sample_size } => {
                check_count("locAggr sample size", *events_sample_size, 300_000)?;
                params.set_val("locAggrSampleSize", *events_sample_size);
            }
            Self::ConceptAggr {
                concept_count,
                events_sample_size,
                return_info,
            } => {
                check_count("conceptAggr concept count", *concept_count, 200)?;
                check_count("conceptAggr sample size", *events_sample_size, 100_000)?;
                params.set_val("conceptAggrConceptCount", *concept_count);
                params.set_val("conceptAggrSampleSize", *events_sample_size);
                return_info.write_to(params);
            }
            Self::ConceptGraph {
                concept_count,
                link_count,
                events_sample_size,
            } => {
                check_count("conceptGraph concept count", *concept_count, 1_000)?;
                check_count("conceptGraph link count", *link_count, 2_000)?;
                check_count("conceptGraph sample size", *events_sample_size, 100_000)?;
                params.set_val("conceptGraphConceptCount", *concept_count);
                params.set_val("conceptGraphLinkCount", *link_count);
                params.set_val("conceptGraphSampleSize", *events_sample_size);
            }
            Self::SourceAggr { source_count } => {
                check_count("sourceAggr source count", *source_count, 200)?;
                params.set_val("sourceAggrSourceCount", *source_count);
            }
            Self::EventClusters {
                keyword_count,
                max_events_to_cluster,
            } => {
                check_count("eventClusters max events", *max_events_to_cluster, 10_000)?;
                params.set_val("eventClustersKeywordCount", *keyword_count);
                params.set_val("eventClustersMaxEventsToCluster", *max_events_to_cluster);
            }
        }
        Ok(())
    }
}

/// Search for events (clusters of articles about the same happening).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryEvents {
    pub conditions: Conditions,
    pub min_articles_in_event: Option<u32>,
    pub max_articles_in_event: Option<u32>,
    pub reporting_date_start: Option<NaiveDate>,
    pub reporting_date_end: Option<NaiveDate>,
    pub event_uris: Vec<String>,
    pub complex_query: Option<ComplexEventQuery>,
    pub requested_result: EventsRequest,
}

impl Filtered for QueryEvents {
    fn conditions_mut(&mut self) -> &mut Conditions {
        &mut self.conditions
    }
}

impl QueryEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a known set of events instead of searching.
    pub fn with_event_uris<I, S>(uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            event_uris: uris.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Search with a complex query tree; simple conditions are ignored.
    pub fn with_complex_query(query: ComplexEventQuery) -> Self {
        Self {
            complex_query: Some(query),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn articles_in_event(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_articles_in_event = min;
        self.max_articles_in_event = max;
        self
    }

    /// Restrict to events first reported within a window.
    #[must_use]
    pub fn reporting_date_range(
        mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Self {
        self.reporting_date_start = start;
        self.reporting_date_end = end;
        self
    }

    #[must_use]
    pub fn with_requested_result(mut self, requested: EventsRequest) -> Self {
        self.requested_result = requested;
        self
    }

    pub fn set_requested_result(&mut self, requested: EventsRequest) {
        self.requested_result = requested;
    }
}

impl Query for QueryEvents {
    fn path(&self) -> &'static str {
        "api/v1/event/getEvents"
    }

    fn params(&self) -> Result<Params> {
        let mut params = QueryParams::new();
        params.set_val("action", "getEvents");

        if let Some(ref complex) = self.complex_query {
            params.set_val("query", complex.to_json()?.to_string());
        } else if !self.event_uris.is_empty() {
            params.set_list("eventUriList", &self.event_uris);
        } else {
            self.conditions.write_to(&mut params)?;
            let range = (self.min_articles_in_event, self.max_articles_in_event);
            if let (Some(min), Some(max)) = range {
                if min > max {
                    return Err(EventRegistryError::invalid(
                        "min articles in event is greater than max",
                    ));
                }
            }
            params.set_opt("minArticlesInEvent", self.min_articles_in_event);
            params.set_opt("maxArticlesInEvent", self.max_articles_in_event);
            check_date_range(self.reporting_date_start, self.reporting_date_end, "reporting date")?;
            params.set_date("reportingDateStart", self.reporting_date_start);
            params.set_date("reportingDateEnd", self.reporting_date_end);
        }

        self.requested_result.write_to(&mut params)?;
        Ok(params.into_params())
    }
}
