//! Incremental feeds of recently added articles and updated events.
//!
//! A feed remembers where the previous poll stopped and asks the server only
//! for newer items. Polling cadence is up to the caller:
//!
//! ```ignore
//! let mut feed = RecentArticles::new().with_max_article_count(500);
//! loop {
//!     for article in feed.get_updates(&er).await? {
//!         println!("{}", article.uri);
//!     }
//!     tokio::time::sleep(Duration::from_secs(60)).await;
//! }
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;

use crate::client::EventRegistry;
use crate::error::{EventRegistryError, Result};
use crate::models::{Article, Event};
use crate::query::{check_count, Params, QueryParams};
use crate::return_info::ReturnInfo;
use crate::traits::Query;

/// Most items a single poll may return.
pub const MAX_RECENT_ITEMS: u32 = 2000;

/// Furthest back the first poll may reach, in minutes.
pub const MAX_UPDATES_AFTER_MINS_AGO: u32 = 240;

const TM_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn check_mins_ago(mins: Option<u32>) -> Result<()> {
    match mins {
        Some(m) if m > MAX_UPDATES_AFTER_MINS_AGO => Err(EventRegistryError::invalid(format!(
            "updates can be requested at most {MAX_UPDATES_AFTER_MINS_AGO} minutes back, got {m}"
        ))),
        _ => Ok(()),
    }
}

/// `news` -> `News`, used to build the per-data-type cursor keys.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArticleActivity {
    #[serde(default)]
    activity: Vec<Article>,
    #[serde(default)]
    newest_uri: BTreeMap<String, Value>,
}

/// Feed of articles added since the previous poll.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentArticles {
    pub max_article_count: u32,
    /// Only return articles whose source has a known location.
    pub mandatory_source_location: bool,
    pub lang: Vec<String>,
    pub return_info: ReturnInfo,
    /// Start of the first poll, in minutes before now.
    pub updates_after_mins_ago: Option<u32>,
    /// Start of the first poll, as a server-time timestamp.
    pub updates_after_tm: Option<NaiveDateTime>,
    newest_uris: BTreeMap<String, String>,
}

impl Default for RecentArticles {
    fn default() -> Self {
        Self {
            max_article_count: 60,
            mandatory_source_location: false,
            lang: Vec::new(),
            return_info: ReturnInfo::default(),
            updates_after_mins_ago: None,
            updates_after_tm: None,
            newest_uris: BTreeMap::new(),
        }
    }
}

impl RecentArticles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_article_count(mut self, count: u32) -> Self {
        self.max_article_count = count;
        self
    }

    #[must_use]
    pub fn with_mandatory_source_location(mut self, mandatory: bool) -> Self {
        self.mandatory_source_location = mandatory;
        self
    }

    #[must_use]
    pub fn with_lang(mut self, lang: &str) -> Self {
        self.lang.push(lang.to_string());
        self
    }

    #[must_use]
    pub fn with_return_info(mut self, return_info: ReturnInfo) -> Self {
        self.return_info = return_info;
        self
    }

    #[must_use]
    pub fn updates_after_mins_ago(mut self, mins: u32) -> Self {
        self.updates_after_mins_ago = Some(mins);
        self
    }

    #[must_use]
    pub fn updates_after_tm(mut self, tm: NaiveDateTime) -> Self {
        self.updates_after_tm = Some(tm);
        self
    }

    /// Newest article URI seen so far, per data type (`news`, `blog`, `pr`).
    pub fn cursor(&self) -> &BTreeMap<String, String> {
        &self.newest_uris
    }

    /// Resume from a previously saved cursor.
    pub fn set_cursor(&mut self, cursor: BTreeMap<String, String>) {
        self.newest_uris = cursor;
    }

    /// Poll once and return the articles added since the previous poll.
    ///
    /// A response without activity leaves the cursor where it was.
    #[tracing::instrument(skip(self, client))]
    pub async fn get_updates(&mut self, client: &EventRegistry) -> Result<Vec<Article>> {
        let response = client.exec_query(&*self).await?;
        let Some(section) = response.get("recentActivityArticles") else {
            tracing::debug!("no recent article activity in response");
            return Ok(Vec::new());
        };
        let activity = ArticleActivity::deserialize(section)?;
        for (data_type, uri) in activity.newest_uri {
            let uri = match uri {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                _ => continue,
            };
            self.newest_uris.insert(data_type, uri);
        }
        tracing::debug!(count = activity.activity.len(), "received recent articles");
        Ok(activity.activity)
    }
}

impl Query for RecentArticles {
    fn path(&self) -> &'static str {
        "api/v1/minuteStreamArticles"
    }

    fn params(&self) -> Result<Params> {
        check_count("max article count", self.max_article_count, MAX_RECENT_ITEMS)?;
        check_mins_ago(self.updates_after_mins_ago)?;

        let mut params = QueryParams::new();
        params.set_val("recentActivityArticlesMaxArticleCount", self.max_article_count);
        params.set_val_if_not_default(
            "recentActivityArticlesMandatorySourceLocation",
            self.mandatory_source_location,
            false,
        );
        params.set_list("recentActivityArticlesLang", &self.lang);

        if self.newest_uris.is_empty() {
            params.set_opt(
                "recentActivityArticlesUpdatesAfterMinsAgo",
                self.updates_after_mins_ago,
            );
            params.set_opt(
                "recentActivityArticlesUpdatesAfterTm",
                self.updates_after_tm.map(|tm| tm.format(TM_FORMAT).to_string()),
            );
        } else {
            for (data_type, uri) in &self.newest_uris {
                params.set_val(
                    &format!("recentActivityArticles{}UpdatesAfterUri", capitalize(data_type)),
                    uri.as_str(),
                );
            }
        }
        self.return_info.write_to(&mut params);
        Ok(params.into_params())
    }
}

/// Result of one [`RecentEvents`] poll.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventActivity {
    /// URIs of events that were added or updated, newest first.
    #[serde(default)]
    pub activity: Vec<String>,
    /// Details of the events listed in `activity`.
    #[serde(default)]
    pub event_info: HashMap<String, Event>,
    /// Server time of the poll.
    #[serde(default)]
    pub curr_time: Option<String>,
}

impl EventActivity {
    pub fn is_empty(&self) -> bool {
        self.activity.is_empty()
    }

    /// Updated events in activity order.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.activity.iter().filter_map(|uri| self.event_info.get(uri))
    }
}

/// Feed of events added or updated since the previous poll.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentEvents {
    pub max_event_count: u32,
    pub mandatory_location: bool,
    pub min_articles_in_event: Option<u32>,
    pub lang: Vec<String>,
    pub return_info: ReturnInfo,
    pub updates_after_mins_ago: Option<u32>,
    pub updates_after_tm: Option<NaiveDateTime>,
    last_time: Option<String>,
}

impl Default for RecentEvents {
    fn default() -> Self {
        Self {
            max_event_count: 50,
            mandatory_location: false,
            min_articles_in_event: None,
            lang: Vec::new(),
            return_info: ReturnInfo::default(),
            updates_after_mins_ago: None,
            updates_after_tm: None,
            last_time: None,
        }
    }
}

impl RecentEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_event_count(mut self, count: u32) -> Self {
        self.max_event_count = count;
        self
    }

    #[must_use]
    pub fn with_mandatory_location(mut self, mandatory: bool) -> Self {
        self.mandatory_location = mandatory;
        self
    }

    #[must_use]
    pub fn with_min_articles_in_event(mut self, min: u32) -> Self {
        self.min_articles_in_event = Some(min);
        self
    }

    #[must_use]
    pub fn with_lang(mut self, lang: &str) -> Self {
        self.lang.push(lang.to_string());
        self
    }

    #[must_use]
    pub fn with_return_info(mut self, return_info: ReturnInfo) -> Self {
        self.return_info = return_info;
        self
    }

    #[must_use]
    pub fn updates_after_mins_ago(mut self, mins: u32) -> Self {
        self.updates_after_mins_ago = Some(mins);
        self
    }

    #[must_use]
    pub fn updates_after_tm(mut self, tm: NaiveDateTime) -> Self {
        self.updates_after_tm = Some(tm);
        self
    }

    /// Server time of the last successful poll.
    pub fn cursor(&self) -> Option<&str> {
        self.last_time.as_deref()
    }

    pub fn set_cursor(&mut self, curr_time: Option<String>) {
        self.last_time = curr_time;
    }

    /// Poll once and return the events changed since the previous poll.
    #[tracing::instrument(skip(self, client))]
    pub async fn get_updates(&mut self, client: &EventRegistry) -> Result<EventActivity> {
        let response = client.exec_query(&*self).await?;
        let Some(section) = response.get("recentActivityEvents") else {
            tracing::debug!("no recent event activity in response");
            return Ok(EventActivity::default());
        };
        let activity = EventActivity::deserialize(section)?;
        if let Some(ref tm) = activity.curr_time {
            self.last_time = Some(tm.clone());
        }
        Ok(activity)
    }
}

impl Query for RecentEvents {
    fn path(&self) -> &'static str {
        "api/v1/minuteStreamEvents"
    }

    fn params(&self) -> Result<Params> {
        check_count("max event count", self.max_event_count, MAX_RECENT_ITEMS)?;
        check_mins_ago(self.updates_after_mins_ago)?;

        let mut params = QueryParams::new();
        params.set_val("recentActivityEventsMaxEventCount", self.max_event_count);
        params.set_val_if_not_default(
            "recentActivityEventsMandatoryLocation",
            self.mandatory_location,
            false,
        );
        params.set_opt(
            "recentActivityEventsMinArticlesInEvent",
            self.min_articles_in_event,
        );
        params.set_list("recentActivityEventsLang", &self.lang);

        match self.last_time {
            Some(ref tm) => params.set_val("recentActivityEventsUpdatesAfterTm", tm.as_str()),
            None => {
                params.set_opt(
                    "recentActivityEventsUpdatesAfterMinsAgo",
                    self.updates_after_mins_ago,
                );
                params.set_opt(
                    "recentActivityEventsUpdatesAfterTm",
                    self.updates_after_tm.map(|tm| tm.format(TM_FORMAT).to_string()),
                );
            }
        }
        self.return_info.write_to(&mut params);
        Ok(params.into_params())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_poll_uses_mins_ago() {
        let params = RecentArticles::new()
            .updates_after_mins_ago(30)
            .params()
            .unwrap();
        assert_eq!(params["recentActivityArticlesUpdatesAfterMinsAgo"], json!(30));
        assert_eq!(params["recentActivityArticlesMaxArticleCount"], json!(60));
    }

    #[test]
    fn test_cursor_replaces_start_time() {
        let mut feed = RecentArticles::new().updates_after_mins_ago(30);
        feed.set_cursor(BTreeMap::from([
            ("news".to_string(), "801".to_string()),
            ("pr".to_string(), "77".to_string()),
        ]));
        let params = feed.params().unwrap();
        assert_eq!(params["recentActivityArticlesNewsUpdatesAfterUri"], json!("801"));
        assert_eq!(params["recentActivityArticlesPrUpdatesAfterUri"], json!("77"));
        assert!(!params.contains_key("recentActivityArticlesUpdatesAfterMinsAgo"));
    }

    #[test]
    fn test_limits() {
        assert!(RecentArticles::new().with_max_article_count(2001).params().is_err());
        assert!(RecentArticles::new().updates_after_mins_ago(241).params().is_err());
        assert!(RecentEvents::new().with_max_event_count(0).params().is_err());
    }

    #[test]
    fn test_event_cursor() {
        let mut feed = RecentEvents::new();
        feed.set_cursor(Some("2024-05-01T10:00:00".to_string()));
        let params = feed.params().unwrap();
        assert_eq!(
            params["recentActivityEventsUpdatesAfterTm"],
            json!("2024-05-01T10:00:00")
        );
    }

    #[test]
    fn test_event_activity_order() {
        let activity: EventActivity = serde_json::from_value(json!({
            "activity": ["eng-2", "eng-1"],
            "eventInfo": {
                "eng-1": {"uri": "eng-1"},
                "eng-2": {"uri": "eng-2"}
            },
            "currTime": "2024-05-01T10:00:00"
        }))
        .unwrap();
        let uris: Vec<&str> = activity.events().map(|e| e.uri.as_str()).collect();
        assert_eq!(uris, vec!["eng-2", "eng-1"]);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("blog"), "Blog");
        assert_eq!(capitalize(""), "");
    }
}
