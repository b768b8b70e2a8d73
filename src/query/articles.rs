//! Article search (`QueryArticles`) and its requested result types.

use crate::error::Result;
use crate::return_info::ReturnInfo;
use crate::traits::Query;

use super::complex::ComplexArticleQuery;
use super::conditions::{check_count, check_page, Conditions, Filtered};
use super::options::{ArticleSortBy, EventFilter, HasDuplicateFilter, IsDuplicateFilter};
use super::params::{Params, QueryParams};

/// Largest page of articles the API returns.
pub const MAX_ARTICLES_PER_PAGE: u32 = 100;

/// A page of full article records.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleListRequest {
    pub page: u32,
    pub count: u32,
    pub sort_by: ArticleSortBy,
    pub sort_by_asc: bool,
    pub return_info: ReturnInfo,
}

impl Default for ArticleListRequest {
    fn default() -> Self {
        Self {
            page: 1,
            count: MAX_ARTICLES_PER_PAGE,
            sort_by: ArticleSortBy::Date,
            sort_by_asc: false,
            return_info: ReturnInfo::default(),
        }
    }
}

impl ArticleListRequest {
    pub fn new(page: u32, count: u32) -> Self {
        Self {
            page,
            count,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn sorted_by(mut self, sort_by: ArticleSortBy, ascending: bool) -> Self {
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

/// What a [`QueryArticles`] should return.
#[derive(Debug, Clone, PartialEq)]
pub enum ArticlesRequest {
    /// A page of articles.
    Articles(ArticleListRequest),
    /// A page of `uri:weight` strings.
    UriWgtList {
        page: u32,
        count: u32,
        sort_by: ArticleSortBy,
    },
    /// Article counts per day.
    TimeAggr,
    /// Top concepts in the matching articles.
    ConceptAggr {
        concept_count: u32,
        articles_sample_size: u32,
        return_info: ReturnInfo,
    },
    /// Category distribution.
    CategoryAggr { articles_sample_size: u32 },
    /// Top publishing sources.
    SourceAggr { source_count: u32 },
    /// Top keywords.
    KeywordAggr {
        lang: String,
        articles_sample_size: u32,
    },
    /// Concept co-occurrence graph.
    ConceptGraph {
        concept_count: u32,
        link_count: u32,
        articles_sample_size: u32,
    },
    /// Daily mention counts of the given concepts.
    ConceptTrends { concept_uris: Vec<String>, count: u32 },
    /// Dates mentioned in the articles.
    DateMentionAggr,
}

impl Default for ArticlesRequest {
    fn default() -> Self {
        Self::Articles(ArticleListRequest::default())
    }
}

impl ArticlesRequest {
    pub fn concept_aggr(concept_count: u32) -> Self {
        Self::ConceptAggr {
            concept_count,
            articles_sample_size: 10_000,
            return_info: ReturnInfo::default(),
        }
    }

    pub fn keyword_aggr(lang: &str) -> Self {
        Self::KeywordAggr {
            lang: lang.to_string(),
            articles_sample_size: 2_000,
        }
    }

    /// The key under which the response carries this result.
    pub fn result_type(&self) -> &'static str {
        match self {
            Self::Articles(_) => "articles",
            Self::UriWgtList { .. } => "uriWgtList",
            Self::TimeAggr => "timeAggr",
            Self::ConceptAggr { .. } => "conceptAggr",
            Self::CategoryAggr { .. } => "categoryAggr",
            Self::SourceAggr { .. } => "sourceAggr",
            Self::KeywordAggr { .. } => "keywordAggr",
            Self::ConceptGraph { .. } => "conceptGraph",
            Self::ConceptTrends { .. } => "conceptTrends",
            Self::DateMentionAggr => "dateMentionAggr",
        }
    }

    /// Validate and append the result parameters.
    pub fn write_to(&self, params: &mut QueryParams) -> Result<()> {
        params.set_val("resultType", self.result_type());
        match self {
            Self::Articles(req) => {
                check_page(req.page)?;
                check_count("articles count", req.count, MAX_ARTICLES_PER_PAGE)?;
                params.set_val("articlesPage", req.page);
                params.set_val("articlesCount", req.count);
                params.set_val("articlesSortBy", req.sort_by);
                params.set_val("articlesSortByAsc", req.sort_by_asc);
                req.return_info.write_to(params);
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
            Self::TimeAggr | Self::DateMentionAggr => {}
            Self::ConceptAggr {
                concept_count,
                articles_sample_size,
                return_info,
            } => {
                check_count("conceptAggr concept count", *concept_count, 500)?;
                check_count("conceptAggr sample size", *articles_sample_size, 20_000)?;
                params.set_val("conceptAggrConceptCount", *concept_count);
                params.set_val("conceptAggrSampleSize", *articles_sample_size);
                return_info.write_to(params);
            }
            Self::CategoryAggr {
                articles_sample_size,
            } => {
                check_count("categoryAggr sample size", *articles_sample_size, 50_000)?;
                params.set_val("categoryAggrSampleSize", *articles_sample_size);
            }
            Self::SourceAggr { source_count } => {
                check_count("sourceAggr source count", *source_count, 200)?;
                params.set_val("sourceAggrSourceCount", *source_count);
            }
            Self::KeywordAggr {
                lang,
                articles_sample_size,
            } => {
                check_count("keywordAggr sample size", *articles_sample_size, 20_000)?;
                params.set_val("keywordAggrLang", lang.as_str());
                params.set_val("keywordAggrSampleSize", *articles_sample_size);
            }
            Self::ConceptGraph {
                concept_count,
                link_count,
                articles_sample_size,
            } => {
                check_count("conceptGraph concept count", *concept_count, 1_000)?;
                check_count("conceptGraph link count", *link_count, 2_000)?;
                check_count("conceptGraph sample size", *articles_sample_size, 50_000)?;
                params.set_val("conceptGraphConceptCount", *concept_count);
                params.set_val("conceptGraphLinkCount", *link_count);
                params.set_val("conceptGraphSampleSize", *articles_sample_size);
            }
            Self::ConceptTrends {
                concept_uris,
                count,
            } => {
                check_count("conceptTrends count", *count, 50)?;
                params.set_list("conceptTrendsConceptUri", concept_uris);
                params.set_val("conceptTrendsConceptCount", *count);
            }
        }
        Ok(())
    }
}

/// Search for news articles.
///
/// # Example
///
/// ```no_run
/// use eventregistry::{EventRegistry, Filtered, QueryArticles, QueryItems};
///
/// # async fn example() -> eventregistry::Result<()> {
/// let er = EventRegistry::from_env()?;
/// let query = QueryArticles::new()
///     .with_keywords(QueryItems::and(["Tesla", "battery"]))
///     .with_lang("eng");
/// let response = er.exec_query(&query).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryArticles {
    pub conditions: Conditions,
    pub is_duplicate_filter: IsDuplicateFilter,
    pub has_duplicate_filter: HasDuplicateFilter,
    pub event_filter: EventFilter,
    pub article_uris: Vec<String>,
    pub complex_query: Option<ComplexArticleQuery>,
    pub requested_result: ArticlesRequest,
}

impl Filtered for QueryArticles {
    fn conditions_mut(&mut self) -> &mut Conditions {
        &mut self.conditions
    }
}

impl QueryArticles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a known set of articles instead of searching.
    pub fn with_article_uris<I, S>(uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            article_uris: uris.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Search with a complex query tree; simple conditions are ignored.
    pub fn with_complex_query(query: ComplexArticleQuery) -> Self {
        Self {
            complex_query: Some(query),
            ..Default::default()
        }
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
    pub fn with_requested_result(mut self, requested: ArticlesRequest) -> Self {
        self.requested_result = requested;
        self
    }

    pub fn set_requested_result(&mut self, requested: ArticlesRequest) {
        self.requested_result = requested;
    }
}

impl Query for QueryArticles {
    fn path(&self) -> &'static str {
        "api/v1/article/getArticles"
    }

    fn params(&self) -> Result<Params> {
        let mut params = QueryParams::new();
        params.set_val("action", "getArticles");

        if let Some(ref complex) = self.complex_query {
            params.set_val("query", complex.to_json()?.to_string());
        } else if !self.article_uris.is_empty() {
            params.set_list("articleUri", &self.article_uris);
        } else {
            self.conditions.write_to(&mut params)?;
            params.set_val_if_not_default(
                "isDuplicateFilter",
                self.is_duplicate_filter,
                IsDuplicateFilter::KeepAll,
            );
            params.set_val_if_not_default(
                "hasDuplicateFilter",
                self.has_duplicate_filter,
                HasDuplicateFilter::KeepAll,
            );
            params.set_val_if_not_default("eventFilter", self.event_filter, EventFilter::KeepAll);
        }

        self.requested_result.write_to(&mut params)?;
        Ok(params.into_params())
    }
}
