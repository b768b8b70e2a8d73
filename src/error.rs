//! Error types for Event Registry API operations.

use thiserror::Error;

/// Errors that can occur during Event Registry API operations.
#[derive(Debug, Error)]
pub enum EventRegistryError {
    /// Configuration is missing or incomplete.
    #[error("Event Registry configuration required: {0}")]
    ConfigMissing(String),

    /// A query parameter failed client-side validation.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Entity not found.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// API request failed or the service reported an error.
    #[error("Event Registry API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Reading or writing a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    /// An operation needs input data that was never provided.
    #[error("Missing input data: {0}")]
    MissingInputData(String),
}

impl EventRegistryError {
    /// Shorthand for [`EventRegistryError::InvalidParameter`].
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Whether a request that failed with this error is worth repeating.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(_) | Self::RateLimited { .. } => true,
            Self::ApiError {
                status_code: Some(code),
                ..
            } => *code >= 500,
            _ => false,
        }
    }
}

/// Result type alias for Event Registry operations.
pub type Result<T> = core::result::Result<T, EventRegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(EventRegistryError::RateLimited {
            retry_after_secs: None
        }
        .is_retryable());
        assert!(EventRegistryError::ApiError {
            message: "boom".into(),
            status_code: Some(503),
        }
        .is_retryable());
        assert!(!EventRegistryError::ApiError {
            message: "bad key".into(),
            status_code: Some(401),
        }
        .is_retryable());
        assert!(!EventRegistryError::invalid("count").is_retryable());
    }
}
