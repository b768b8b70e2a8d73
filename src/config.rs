//! Client configuration.
//!
//! Configuration is assembled from defaults, environment variables and an
//! optional JSON settings file:
//!
//! - `EVENT_REGISTRY_API_KEY` - API key
//! - `EVENT_REGISTRY_HOST` - API host (defaults to `https://eventregistry.org`)
//! - `EVENT_REGISTRY_ANALYTICS_HOST` - analytics host
//!   (defaults to `https://analytics.eventregistry.org`)

use std::env;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::Result;

pub(crate) const DEFAULT_HOST: &str = "https://eventregistry.org";
pub(crate) const DEFAULT_ANALYTICS_HOST: &str = "https://analytics.eventregistry.org";

/// Connection settings for an [`EventRegistry`](crate::EventRegistry) client.
#[derive(Clone)]
pub struct ClientConfig {
    /// API key sent with every request.
    pub api_key: Option<String>,
    /// Base URL of the main API.
    pub host: String,
    /// Base URL of the text analytics API.
    pub analytics_host: String,
    /// Extra attempts made after a failed request.
    pub repeat_failed_request_count: u32,
    /// Pause before repeating a failed request.
    pub retry_delay: Duration,
    /// Minimum spacing between two consecutive requests.
    pub min_delay_between_requests: Duration,
    /// When false, searches are restricted to the last 31 days.
    pub allow_use_of_archive: bool,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            host: DEFAULT_HOST.to_string(),
            analytics_host: DEFAULT_ANALYTICS_HOST.to_string(),
            repeat_failed_request_count: 2,
            retry_delay: Duration::from_secs(5),
            min_delay_between_requests: Duration::from_millis(500),
            allow_use_of_archive: true,
            timeout: Duration::from_secs(120),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("analytics_host", &self.analytics_host)
            .field("has_api_key", &self.api_key.is_some())
            .field("repeat_failed_request_count", &self.repeat_failed_request_count)
            .field("min_delay_between_requests", &self.min_delay_between_requests)
            .field("allow_use_of_archive", &self.allow_use_of_archive)
            .finish_non_exhaustive()
    }
}

/// On-disk settings file layout.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    host_analytics: Option<String>,
}

impl ClientConfig {
    /// Build a configuration from environment variables on top of the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(key) = env::var("EVENT_REGISTRY_API_KEY") {
            if !key.trim().is_empty() {
                config.api_key = Some(key);
            }
        }
        if let Ok(host) = env::var("EVENT_REGISTRY_HOST") {
            config.host = host;
        }
        if let Ok(host) = env::var("EVENT_REGISTRY_ANALYTICS_HOST") {
            config.analytics_host = host;
        }
        config
    }

    /// Load a JSON settings file with optional `apiKey`, `host` and
    /// `hostAnalytics` keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_settings_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let settings: SettingsFile = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded settings file");

        let mut config = Self::default();
        config.api_key = settings.api_key.filter(|k| !k.trim().is_empty());
        if let Some(host) = settings.host {
            config.host = host;
        }
        if let Some(host) = settings.host_analytics {
            config.analytics_host = host;
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    #[must_use]
    pub fn with_analytics_host(mut self, host: impl Into<String>) -> Self {
        self.analytics_host = host.into();
        self
    }

    #[must_use]
    pub fn with_repeat_failed_request_count(mut self, count: u32) -> Self {
        self.repeat_failed_request_count = count;
        self
    }

    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    #[must_use]
    pub fn with_min_delay_between_requests(mut self, delay: Duration) -> Self {
        self.min_delay_between_requests = delay;
        self
    }

    #[must_use]
    pub fn with_allow_use_of_archive(mut self, allow: bool) -> Self {
        self.allow_use_of_archive = allow;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.repeat_failed_request_count, 2);
        assert!(config.allow_use_of_archive);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_settings_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"apiKey": "secret-key", "host": "http://localhost:9000"}}"#
        )
        .unwrap();

        let config = ClientConfig::from_settings_file(file.path()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("secret-key"));
        assert_eq!(config.host, "http://localhost:9000");
        assert_eq!(config.analytics_host, DEFAULT_ANALYTICS_HOST);
    }

    #[test]
    fn test_settings_file_missing_is_error() {
        let result = ClientConfig::from_settings_file("/nonexistent/settings.json");
        assert!(matches!(
            result,
            Err(crate::EventRegistryError::Io(_))
        ));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = ClientConfig::default().with_api_key("top-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("has_api_key"));
    }
}
