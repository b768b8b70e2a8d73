//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::EventRegistry;
use crate::error::Result;
use crate::pagination::{collect_pages, Page};

/// Maximum pages to fetch (safety limit).
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// List entities matching a search query, with pagination support.
///
/// # Example
///
/// ```ignore
/// use eventregistry::{EventRegistry, Article, Filtered, List, QueryArticles};
///
/// let er = EventRegistry::from_env()?;
/// let query = QueryArticles::new().with_keywords("Tesla");
///
/// // Fetch a single page
/// let page = Article::list_page(&er, &query, 1, 50).await?;
///
/// // Fetch up to 500 articles across pages
/// let articles = Article::list_all(&er, &query, Some(500)).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// The search query type.
    type Query: Send + Sync;

    /// Largest page the endpoint serves; used by [`List::list_all`].
    const MAX_PAGE_SIZE: u32;

    /// List entities matching the query (single page).
    ///
    /// The query's own paging settings are replaced by `page` and `count`;
    /// its sort order and return info are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or `count` exceeds
    /// [`List::MAX_PAGE_SIZE`].
    async fn list_page(
        client: &EventRegistry,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>>;

    /// List entities matching the query across pages.
    ///
    /// Stops once `max_items` items were collected (all items when `None`),
    /// the server reports no further pages, or the page safety limit is hit.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(
        client: &EventRegistry,
        query: &Self::Query,
        max_items: Option<usize>,
    ) -> Result<Vec<Self>> {
        collect_pages(max_items, DEFAULT_MAX_PAGES, |page| {
            Self::list_page(client, query, page, Self::MAX_PAGE_SIZE)
        })
        .await
    }
}
