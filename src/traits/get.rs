//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::EventRegistry;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types that can be fetched individually
/// by a unique identifier (an article or event URI).
///
/// # Example
///
/// ```ignore
/// use eventregistry::{EventRegistry, Event, Get};
///
/// let er = EventRegistry::from_env()?;
/// let event = Event::get(&er, "eng-8561390".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity (e.g., String URI).
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Arguments
    ///
    /// * `client` - The Event Registry client
    /// * `id` - The entity identifier
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`](crate::EventRegistryError::NotFound) if the
    /// response has no entry for the ID, or an error if the request fails.
    async fn get(client: &EventRegistry, id: Self::Id) -> Result<Self>;
}
