//! Event Registry API client.
//!
//! Low-level HTTP client that handles authentication, pacing, retries and raw
//! JSON requests. Query builders and entity traits sit on top of it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, Response};
use serde_json::Value;
use tokio::time::Instant;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{EventRegistryError, Result};
use crate::models::UsageInfo;
use crate::query::Params;
use crate::traits::Query;

const USER_AGENT: &str = concat!("eventregistry-rs/", env!("CARGO_PKG_VERSION"));

/// Only the last month of content is searched when the archive is disallowed.
const NO_ARCHIVE_WINDOW_DAYS: u32 = 31;

/// Rate-limit information reported with the most recent response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestStats {
    /// Path of the last request sent.
    pub path: Option<String>,
    /// Value of the `x-ratelimit-limit` header.
    pub daily_available_requests: Option<i64>,
    /// Value of the `x-ratelimit-remaining` header.
    pub remaining_available_requests: Option<i64>,
}

#[derive(Default)]
struct RequestState {
    last_request: tokio::sync::Mutex<Option<Instant>>,
    stats: Mutex<RequestStats>,
}

/// Event Registry API client.
///
/// Every call is a JSON `POST` whose body carries the query parameters and the
/// API key. Successive requests are spaced by the configured minimum delay and
/// transient failures are repeated a configurable number of times.
///
/// This struct is cheaply cloneable; clones share the connection pool, the
/// pacing state and the last-request statistics.
///
/// # Example
///
/// ```no_run
/// use eventregistry::EventRegistry;
///
/// # async fn example() -> eventregistry::Result<()> {
/// // Create from environment variables
/// let er = EventRegistry::from_env()?;
///
/// // Or configure manually
/// let er = EventRegistry::new("your-api-key", "https://eventregistry.org")?;
/// let usage = er.usage_info().await?;
/// println!("{} of {} tokens used", usage.used_tokens, usage.available_tokens);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct EventRegistry {
    http: Client,
    base_url: Arc<Url>,
    analytics_url: Arc<Url>,
    config: Arc<ClientConfig>,
    state: Arc<RequestState>,
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRegistry")
            .field("base_url", &self.base_url.as_str())
            .field("analytics_url", &self.analytics_url.as_str())
            .finish_non_exhaustive()
    }
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    // Ensure base URL ends with /
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Ok(Url::parse(&with_slash)?)
}

fn header_int(headers: &HeaderMap, name: &str) -> Option<i64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

impl EventRegistry {
    /// Create a client from environment variables.
    ///
    /// Uses `EVENT_REGISTRY_API_KEY` for authentication and optionally
    /// `EVENT_REGISTRY_HOST` / `EVENT_REGISTRY_ANALYTICS_HOST`.
    ///
    /// # Errors
    ///
    /// Returns an error if `EVENT_REGISTRY_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env();
        if config.api_key.is_none() {
            return Err(EventRegistryError::ConfigMissing(
                "EVENT_REGISTRY_API_KEY environment variable not set".to_string(),
            ));
        }
        Self::with_config(config)
    }

    /// Create a new client with the provided API key and host.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is not a valid URL.
    pub fn new(api_key: &str, host: &str) -> Result<Self> {
        Self::with_config(ClientConfig::default().with_api_key(api_key).with_host(host))
    }

    /// Create a client from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a host is not a valid URL or the HTTP client
    /// cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.host)?;
        let analytics_url = normalize_base_url(&config.analytics_host)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.timeout)
            .build()
            .map_err(EventRegistryError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            analytics_url: Arc::new(analytics_url),
            config: Arc::new(config),
            state: Arc::new(RequestState::default()),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the analytics base URL.
    pub fn analytics_url(&self) -> &Url {
        &self.analytics_url
    }

    /// Get the active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute a query builder against the main API.
    pub async fn exec_query<Q: Query + ?Sized>(&self, query: &Q) -> Result<Value> {
        let params = query.params()?;
        self.json_request(query.path(), params).await
    }

    /// POST a parameter map to `path` on the main API host.
    #[tracing::instrument(skip(self, params))]
    pub async fn json_request(&self, path: &str, params: Params) -> Result<Value> {
        let url = self.base_url.join(path)?;
        self.post_with_retries(url, path, params).await
    }

    /// POST a parameter map to `path` on the analytics host.
    #[tracing::instrument(skip(self, params))]
    pub async fn json_request_analytics(&self, path: &str, params: Params) -> Result<Value> {
        let url = self.analytics_url.join(path)?;
        self.post_with_retries(url, path, params).await
    }

    /// Fetch token usage for the configured API key.
    pub async fn usage_info(&self) -> Result<UsageInfo> {
        let value = self.json_request("api/v1/usage", Params::new()).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Requests left today, as reported by the last response.
    pub fn remaining_available_requests(&self) -> Option<i64> {
        self.last_request_stats().remaining_available_requests
    }

    /// Daily request allowance, as reported by the last response.
    pub fn daily_available_requests(&self) -> Option<i64> {
        self.last_request_stats().daily_available_requests
    }

    /// Snapshot of the statistics gathered from the last response.
    pub fn last_request_stats(&self) -> RequestStats {
        match self.state.stats.lock() {
            Ok(stats) => stats.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    async fn post_with_retries(&self, url: Url, path: &str, mut params: Params) -> Result<Value> {
        if let Some(ref key) = self.config.api_key {
            params.insert("apiKey".to_string(), Value::String(key.clone()));
        }
        if !self.config.allow_use_of_archive {
            params.insert(
                "forceMaxDataTimeWindow".to_string(),
                Value::from(NO_ARCHIVE_WINDOW_DAYS),
            );
        }
        let body = Value::Object(params);

        let mut attempt = 0;
        loop {
            self.wait_for_slot().await;
            match self.send_once(&url, path, &body).await {
                Ok(value) => return Ok(value),
                Err(err)
                    if err.is_retryable() && attempt < self.config.repeat_failed_request_count =>
                {
                    attempt += 1;
                    let delay = match &err {
                        EventRegistryError::RateLimited {
                            retry_after_secs: Some(secs),
                        } => Duration::from_secs(*secs),
                        _ => self.config.retry_delay,
                    };
                    tracing::warn!(
                        path,
                        attempt,
                        error = %err,
                        "request failed, retrying in {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Sleep until the minimum delay since the previous request has passed.
    async fn wait_for_slot(&self) {
        let min_delay = self.config.min_delay_between_requests;
        let mut last = self.state.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < min_delay {
                tokio::time::sleep(min_delay - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn send_once(&self, url: &Url, path: &str, body: &Value) -> Result<Value> {
        tracing::debug!(%url, "sending request");

        let response = self
            .http
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(EventRegistryError::HttpError)?;

        self.record_stats(path, response.headers());
        let response = Self::check_response(response).await?;
        let status = response.status();
        let text = response.text().await.map_err(EventRegistryError::HttpError)?;
        let value: Value = serde_json::from_str(&text)?;

        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return Err(EventRegistryError::ApiError {
                message: message.to_string(),
                status_code: Some(status.as_u16()),
            });
        }

        Ok(value)
    }

    fn record_stats(&self, path: &str, headers: &HeaderMap) {
        let mut stats = match self.state.stats.lock() {
            Ok(stats) => stats,
            Err(poisoned) => poisoned.into_inner(),
        };
        stats.path = Some(path.to_string());
        stats.daily_available_requests = header_int(headers, "x-ratelimit-limit");
        stats.remaining_available_requests = header_int(headers, "x-ratelimit-remaining");
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(EventRegistryError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(EventRegistryError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        if let Ok(json) = serde_json::from_str::<Value>(&body) {
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = EventRegistry::new("test-key", "https://eventregistry.org").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("EventRegistry"));
        assert!(debug.contains("base_url"));
        // Key should not be in debug output
        assert!(!debug.contains("test-key"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = EventRegistry::new("key", "https://eventregistry.org").unwrap();
        let client2 = EventRegistry::new("key", "https://eventregistry.org/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_invalid_host_is_error() {
        let result = EventRegistry::new("key", "not a url");
        assert!(matches!(result, Err(EventRegistryError::UrlError(_))));
    }

    #[test]
    fn test_stats_empty_before_first_request() {
        let client = EventRegistry::new("key", "https://eventregistry.org").unwrap();
        assert_eq!(client.remaining_available_requests(), None);
        assert_eq!(client.daily_available_requests(), None);
    }

    #[test]
    fn test_header_int_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", "42".parse().unwrap());
        headers.insert("x-ratelimit-limit", "garbage".parse().unwrap());
        assert_eq!(header_int(&headers, "x-ratelimit-remaining"), Some(42));
        assert_eq!(header_int(&headers, "x-ratelimit-limit"), None);
        assert_eq!(header_int(&headers, "missing"), None);
    }
}
