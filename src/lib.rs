//! Event Registry API client library.
//!
//! A Rust library for searching the Event Registry news archive using a
//! trait-based architecture: query builders serialize through [`Query`],
//! and result types implement [`Get`] and [`List`] for the endpoints that
//! serve them.
//!
//! # Quick Start
//!
//! ```no_run
//! use eventregistry::{Article, Event, EventRegistry, Filtered, Get, List, QueryArticles};
//!
//! #[tokio::main]
//! async fn main() -> eventregistry::Result<()> {
//!     // Create client from environment variables
//!     let er = EventRegistry::from_env()?;
//!
//!     // Resolve a concept URI, then search articles about it
//!     let uri = er.concept_uri("Tesla", "eng").await?.unwrap_or_default();
//!     let query = QueryArticles::new().with_concept_uri(uri);
//!     let page = Article::list_page(&er, &query, 1, 20).await?;
//!     println!("Found {:?} articles", page.total);
//!
//!     // Get a single event by URI
//!     let event = Event::get(&er, "eng-8561390".to_string()).await?;
//!     println!("Event: {}", event.display_title());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around three core traits:
//!
//! - [`Query`] - Serialize a request into an endpoint path and JSON parameters
//! - [`Get`] - Fetch a single article or event by URI
//! - [`List`] - Fetch paginated search results
//!
//! Feature modules (recent-activity feeds, topic pages, trends,
//! correlations, suggestions, article mapping and text analytics) build on
//! the same client.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `EVENT_REGISTRY_API_KEY` (required) - Your API key
//! - `EVENT_REGISTRY_HOST` (optional) - Defaults to `https://eventregistry.org`
//! - `EVENT_REGISTRY_ANALYTICS_HOST` (optional) - Defaults to `https://analytics.eventregistry.org`
//!
//! [`ClientConfig::from_settings_file`] reads the same values from a JSON file.

mod analytics;
mod client;
mod config;
mod correlations;
mod error;
mod info;
mod mapper;
mod models;
mod pagination;
mod query;
mod recent;
mod return_info;
mod suggest;
mod topic_page;
mod traits;
mod trends;

pub mod cli;
pub mod output;

pub use output::PrettyPrint;

// Re-export core types
pub use client::{EventRegistry, RequestStats};
pub use config::ClientConfig;
pub use error::{EventRegistryError, Result};
pub use pagination::{parse_page, parse_results, Page};

// Re-export traits
pub use traits::{Get, List, Query, DEFAULT_MAX_PAGES};

// Re-export query builders
pub use query::{
    format_date, ArticleListRequest, ArticleSortBy, ArticlesRequest, BaseQuery, CombinedQuery,
    ComplexArticleQuery, ComplexEventQuery, ComplexQueryPart, ConceptType, Conditions, CountsType,
    DataType, EventArticleSortBy, EventFilter, EventListRequest, EventRequest, EventSortBy,
    EventsRequest, Filtered, HasDuplicateFilter, IsDuplicateFilter, KeywordLoc, KeywordSearchMode,
    MentionSortBy, MentionsRequest, Params, QueryArticle, QueryArticles, QueryEvent, QueryEvents,
    QueryItems, QueryMentions, QueryParams, SimilarityMethod, Taxonomy, TrendSource, UriWgtSortBy,
    MAX_ARTICLES_PER_PAGE, MAX_EVENTS_PER_PAGE, MAX_EVENT_ARTICLES_PER_PAGE, MAX_MENTIONS_PER_PAGE,
};
pub use return_info::{
    ArticleInfoFlags, CategoryInfoFlags, ConceptInfoFlags, EventInfoFlags, LocationInfoFlags,
    MentionInfoFlags, ReturnInfo, SourceInfoFlags,
};

// Re-export models
pub use models::{
    // Entities
    Author,
    Category,
    Concept,
    EventType,
    Label,
    Location,
    Source,
    Suggestion,
    // Results
    Article,
    Event,
    Mention,
    // Aggregates
    CategoryAggrItem,
    ConceptAggrItem,
    KeywordAggrItem,
    SourceAggrItem,
    TimeAggrItem,
    UsageInfo,
};

// Re-export convenience functions
pub use models::{get_articles, get_articles_by_uri};
pub use models::{get_event_articles, get_event_articles_page, get_events, get_mentions};

// Re-export feature modules
pub use analytics::Analytics;
pub use correlations::{
    ConceptCorrelationOptions, TopCorrelations, MAX_APPROX_COUNT, MAX_EXACT_COUNT,
};
pub use info::{CategoryInfo, ConceptInfo, Counts, SourceInfo, SourceStats};
pub use mapper::ArticleMapper;
pub use recent::{
    EventActivity, RecentArticles, RecentEvents, MAX_RECENT_ITEMS, MAX_UPDATES_AFTER_MINS_AGO,
};
pub use suggest::{uri_from_uri_wgt, uris_from_uri_wgts, SuggestOptions, MAX_SUGGESTIONS};
pub use topic_page::{TopicPage, TopicPageDefinition, WeightedKeyword, WeightedUri};
pub use trends::{
    TrendingCategories, TrendingCategory, TrendingConcept, TrendingConceptGroups,
    TrendingConcepts, TrendingCustomItems, MAX_TRENDING_ITEMS,
};
