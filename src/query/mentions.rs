//! Mention search: sentences in articles that describe typed events
//! (acquisitions, lawsuits, layoffs...).

use crate::error::Result;
use crate::return_info::ReturnInfo;
use crate::traits::Query;

use super::conditions::{check_count, check_page, Conditions, Filtered};
use super::items::QueryItems;
use super::options::{MentionSortBy, UriWgtSortBy};
use super::params::{Params, QueryParams};

/// Largest page of mentions the API returns.
pub const MAX_MENTIONS_PER_PAGE: u32 = 100;

/// What a [`QueryMentions`] should return.
#[derive(Debug, Clone, PartialEq)]
pub enum MentionsRequest {
    Mentions {
        page: u32,
        count: u32,
        sort_by: MentionSortBy,
        sort_by_asc: bool,
        return_info: ReturnInfo,
    },
    UriWgtList {
        page: u32,
        count: u32,
        sort_by: UriWgtSortBy,
    },
    TimeAggr,
}

impl Default for MentionsRequest {
    fn default() -> Self {
        Self::mentions(1, MAX_MENTIONS_PER_PAGE)
    }
}

impl MentionsRequest {
    pub fn mentions(page: u32, count: u32) -> Self {
        Self::Mentions {
            page,
            count,
            sort_by: MentionSortBy::Date,
            sort_by_asc: false,
            return_info: ReturnInfo::default(),
        }
    }

    pub fn result_type(&self) -> &'static str {
        match self {
            Self::Mentions { .. } => "mentions",
            Self::UriWgtList { .. } => "uriWgtList",
            Self::TimeAggr => "timeAggr",
        }
    }

    fn write_to(&self, params: &mut QueryParams) -> Result<()> {
        params.set_val("resultType", self.result_type());
        match self {
            Self::Mentions {
                page,
                count,
                sort_by,
                sort_by_asc,
                return_info,
            } => {
                check_page(*page)?;
                check_count("mentions count", *count, MAX_MENTIONS_PER_PAGE)?;
                params.set_val("mentionsPage", *page);
                params.set_val("mentionsCount", *count);
                params.set_val("mentionsSortBy", *sort_by);
                params.set_val("mentionsSortByAsc", *sort_by_asc);
                return_info.write_to(params);
            }
            Self::UriWgtList {
                page,
                count,
                sort_by,
            } => {
                check_page(*page)?;
                check_count("uriWgtList count", *count, 50_000)?;
                params.set_val("uriWgtListPage", *page);
                params.set_val("uriWgtListCount", *count);
                params.set_val("uriWgtListSortBy", *sort_by);
            }
            Self::TimeAggr => {}
        }
        Ok(())
    }
}

/// Search for event mentions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryMentions {
    pub conditions: Conditions,
    pub event_type_uri: Option<QueryItems>,
    pub industry_uri: Option<QueryItems>,
    pub sdg_uri: Option<QueryItems>,
    pub sasb_uri: Option<QueryItems>,
    pub esg_uri: Option<QueryItems>,
    /// Restrict by how factual the sentence is (`fact`, `opinion`, `forecast`).
    pub fact_level: Vec<String>,
    pub show_duplicates: bool,
    pub requested_result: MentionsRequest,
}

impl Filtered for QueryMentions {
    fn conditions_mut(&mut self) -> &mut Conditions {
        &mut self.conditions
    }
}

impl QueryMentions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_event_type_uri(mut self, uri: impl Into<QueryItems>) -> Self {
        self.event_type_uri = Some(uri.into());
        self
    }

    #[must_use]
    pub fn with_industry_uri(mut self, uri: impl Into<QueryItems>) -> Self {
        self.industry_uri = Some(uri.into());
        self
    }

    #[must_use]
    pub fn with_sdg_uri(mut self, uri: impl Into<QueryItems>) -> Self {
        self.sdg_uri = Some(uri.into());
        self
    }

    #[must_use]
    pub fn with_sasb_uri(mut self, uri: impl Into<QueryItems>) -> Self {
        self.sasb_uri = Some(uri.into());
        self
    }

    #[must_use]
    pub fn with_esg_uri(mut self, uri: impl Into<QueryItems>) -> Self {
        self.esg_uri = Some(uri.into());
        self
    }

    #[must_use]
    pub fn with_fact_level(mut self, level: &str) -> Self {
        self.fact_level.push(level.to_string());
        self
    }

    #[must_use]
    pub fn show_duplicates(mut self, show: bool) -> Self {
        self.show_duplicates = show;
        self
    }

    #[must_use]
    pub fn with_requested_result(mut self, requested: MentionsRequest) -> Self {
        self.requested_result = requested;
        self
    }

    pub fn set_requested_result(&mut self, requested: MentionsRequest) {
        self.requested_result = requested;
    }
}

impl Query for QueryMentions {
    fn path(&self) -> &'static str {
        "api/v1/article/getMentions"
    }

    fn params(&self) -> Result<Params> {
        let mut params = QueryParams::new();
        params.set_val("action", "getMentions");
        self.conditions.write_to(&mut params)?;
        params.set_items("eventTypeUri", self.event_type_uri.as_ref());
        params.set_items("industryUri", self.industry_uri.as_ref());
        params.set_items("sdgUri", self.sdg_uri.as_ref());
        params.set_items("sasbUri", self.sasb_uri.as_ref());
        params.set_items("esgUri", self.esg_uri.as_ref());
        params.set_list("factLevel", &self.fact_level);
        params.set_val_if_not_default("showDuplicates", self.show_duplicates, false);
        self.requested_result.write_to(&mut params)?;
        Ok(params.into_params())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params() {
        let params = QueryMentions::new()
            .with_event_type_uri("et/business/acquisitions-mergers/acquisition-own")
            .with_lang("eng")
            .with_fact_level("fact")
            .params()
            .unwrap();
        assert_eq!(
            params["eventTypeUri"],
            json!("et/business/acquisitions-mergers/acquisition-own")
        );
        assert_eq!(params["factLevel"], json!(["fact"]));
        assert_eq!(params["resultType"], json!("mentions"));
        assert_eq!(params["mentionsCount"], json!(100));
        assert!(!params.contains_key("showDuplicates"));
    }

    #[test]
    fn test_mentions_count_limit() {
        let query = QueryMentions::new().with_requested_result(MentionsRequest::mentions(1, 500));
        assert!(query.params().is_err());
    }
}
