//! Query trait for request builders.

use crate::error::Result;
use crate::query::Params;

/// A request builder that targets one API endpoint.
///
/// Implementations validate their settings in [`Query::params`]; the client
/// adds authentication before sending.
pub trait Query: Send + Sync {
    /// Endpoint path relative to the API host (e.g. `api/v1/article/getArticles`).
    fn path(&self) -> &'static str;

    /// Build the request parameters.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParameter`](crate::EventRegistryError::InvalidParameter)
    /// when a setting is outside the range the API accepts.
    fn params(&self) -> Result<Params>;
}
