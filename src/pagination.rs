//! Pagination utilities for Event Registry responses.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EventRegistryError, Result};

/// A page of results from the Event Registry API.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of items across all pages (if known).
    pub total: Option<u64>,
    /// Current page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub count: u32,
    /// Number of pages available (if known).
    pub pages: Option<u32>,
    /// Whether there are more pages.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Create a new page from items and pagination info.
    #[must_use]
    pub fn new(items: Vec<T>, page: u32, count: u32, total: Option<u64>) -> Self {
        let has_more = match total {
            Some(t) => (u64::from(page) * u64::from(count)) < t,
            None => items.len() >= count as usize,
        };
        Self {
            items,
            total,
            page,
            count,
            pages: None,
            has_more,
        }
    }

    /// Use the server-reported page count to decide whether more pages exist.
    #[must_use]
    pub fn with_pages(mut self, pages: Option<u32>) -> Self {
        if let Some(pages) = pages {
            self.pages = Some(pages);
            self.has_more = self.page < pages;
        }
        self
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            count: self.count,
            pages: self.pages,
            has_more: self.has_more,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// The `{"results": [...], "totalResults": n, "pages": n}` envelope used by
/// every paged result.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultsEnvelope<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
    #[serde(default)]
    total_results: Option<u64>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    count: Option<u32>,
    #[serde(default)]
    pages: Option<u32>,
}

/// Look up a required section of a response object.
pub(crate) fn section<'a>(value: &'a Value, key: &str) -> Result<&'a Value> {
    value.get(key).ok_or_else(|| EventRegistryError::ApiError {
        message: format!("response is missing the '{key}' section"),
        status_code: None,
    })
}

/// Parse the paged section `key` of a response into a [`Page`].
///
/// `page` and `count` are the requested values, used when the server omits
/// them.
pub fn parse_page<T: DeserializeOwned>(
    value: &Value,
    key: &str,
    page: u32,
    count: u32,
) -> Result<Page<T>> {
    let envelope = ResultsEnvelope::<T>::deserialize(section(value, key)?)?;
    let page_no = envelope.page.unwrap_or(page);
    let page_size = envelope.count.unwrap_or(count);
    Ok(Page::new(envelope.results, page_no, page_size, envelope.total_results)
        .with_pages(envelope.pages))
}

/// Parse the `results` list of an aggregate section `key`.
pub fn parse_results<T: DeserializeOwned>(value: &Value, key: &str) -> Result<Vec<T>> {
    let envelope = ResultsEnvelope::<T>::deserialize(section(value, key)?)?;
    Ok(envelope.results)
}

/// Deserialize a response that is a bare JSON list.
pub(crate) fn parse_list<T: DeserializeOwned>(value: Value, what: &str) -> Result<Vec<T>> {
    if !value.is_array() {
        return Err(EventRegistryError::ApiError {
            message: format!("expected a list of {what}"),
            status_code: None,
        });
    }
    Ok(serde_json::from_value(value)?)
}

/// Drive a page-fetching closure until `max_items` items are collected, the
/// source runs dry, or `max_pages` pages were fetched.
pub(crate) async fn collect_pages<T, F, Fut>(
    max_items: Option<usize>,
    max_pages: u32,
    mut fetch: F,
) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut all_items = Vec::new();
    let mut page = 1;

    loop {
        let result = fetch(page).await?;
        let items_count = result.items.len();
        let has_more = result.has_more;
        all_items.extend(result.items);

        if let Some(max) = max_items {
            if all_items.len() >= max {
                all_items.truncate(max);
                break;
            }
        }
        if !has_more || items_count == 0 {
            break;
        }
        page += 1;

        // Safety limit to prevent infinite loops
        if page > max_pages {
            tracing::warn!("Reached pagination limit of {} pages, stopping", max_pages);
            break;
        }
    }

    Ok(all_items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_has_more_with_total() {
        // Page 1 of 3 (total 250, 100 per page)
        let page: Page<i32> = Page::new(vec![1; 100], 1, 100, Some(250));
        assert!(page.has_more);

        // Page 3 of 3
        let page: Page<i32> = Page::new(vec![1; 50], 3, 100, Some(250));
        assert!(!page.has_more);
    }

    #[test]
    fn test_page_has_more_without_total() {
        // Full page suggests more
        let page: Page<i32> = Page::new(vec![1; 100], 1, 100, None);
        assert!(page.has_more);

        // Partial page means no more
        let page: Page<i32> = Page::new(vec![1; 50], 1, 100, None);
        assert!(!page.has_more);
    }

    #[test]
    fn test_server_page_count_wins() {
        let page: Page<i32> = Page::new(vec![1; 10], 2, 10, Some(100)).with_pages(Some(2));
        assert!(!page.has_more);
        assert_eq!(page.pages, Some(2));
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], 1, 100, Some(3));
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.page, 1);
    }

    #[test]
    fn test_parse_page_envelope() {
        let value = json!({
            "articles": {
                "results": [1, 2, 3],
                "totalResults": 13,
                "page": 1,
                "count": 3,
                "pages": 5
            }
        });
        let page: Page<u32> = parse_page(&value, "articles", 1, 3).unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total, Some(13));
        assert!(page.has_more);
    }

    #[test]
    fn test_missing_section_is_api_error() {
        let value = json!({"events": {}});
        let result: Result<Page<u32>> = parse_page(&value, "articles", 1, 10);
        assert!(matches!(result, Err(EventRegistryError::ApiError { .. })));
    }

    #[tokio::test]
    async fn test_collect_pages_respects_max_items() {
        let items = collect_pages(Some(25), 100, |page| async move {
            Ok(Page::new(vec![page; 10], page, 10, Some(1000)))
        })
        .await
        .unwrap();
        assert_eq!(items.len(), 25);
        assert_eq!(items[24], 3);
    }

    #[tokio::test]
    async fn test_collect_pages_stops_when_exhausted() {
        let items = collect_pages(None, 100, |page| async move {
            Ok(Page::new(vec![page; 10], page, 10, Some(15)))
        })
        .await
        .unwrap();
        assert_eq!(items.len(), 20);
    }
}
