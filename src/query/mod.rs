//! Query builders.
//!
//! Every builder serializes into a JSON parameter map through the
//! [`Query`](crate::Query) trait. Validation happens when parameters are
//! built, so a bad query fails before any network traffic.

mod article;
mod articles;
mod complex;
mod conditions;
mod event;
mod events;
mod items;
mod mentions;
mod options;
mod params;

pub use article::QueryArticle;
pub use articles::{ArticleListRequest, ArticlesRequest, QueryArticles, MAX_ARTICLES_PER_PAGE};
pub use complex::{
    BaseQuery, CombinedQuery, ComplexArticleQuery, ComplexEventQuery, ComplexQueryPart,
};
pub use conditions::{Conditions, Filtered};
pub use event::{EventRequest, QueryEvent, MAX_EVENT_ARTICLES_PER_PAGE};
pub use events::{EventListRequest, EventsRequest, QueryEvents, MAX_EVENTS_PER_PAGE};
pub use items::QueryItems;
pub use mentions::{MentionsRequest, QueryMentions, MAX_MENTIONS_PER_PAGE};
pub use options::{
    ArticleSortBy, ConceptType, CountsType, DataType, EventArticleSortBy, EventFilter,
    EventSortBy, HasDuplicateFilter, IsDuplicateFilter, KeywordLoc, KeywordSearchMode,
    MentionSortBy, SimilarityMethod, Taxonomy, TrendSource, UriWgtSortBy,
};
pub use params::{format_date, Params, QueryParams};

pub(crate) use conditions::{check_count, check_page, check_rank_percentiles, check_sentiment};
