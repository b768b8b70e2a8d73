//! Trait definitions for Event Registry operations.
//!
//! Query builders implement [`Query`]; entity types implement the fetch
//! traits they support, encapsulating response-shape differences.

mod get;
mod list;
mod query;

pub use get::Get;
pub use list::{List, DEFAULT_MAX_PAGES};
pub use query::Query;
