//! Lookup of individual articles by URI.

use crate::error::{EventRegistryError, Result};
use crate::return_info::ReturnInfo;
use crate::traits::Query;

use super::params::{Params, QueryParams};

/// Fetch details of one or more known articles.
///
/// The response is an object keyed by article URI, each entry holding an
/// `info` object.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryArticle {
    pub article_uris: Vec<String>,
    pub return_info: ReturnInfo,
}

impl QueryArticle {
    pub fn by_uris<I, S>(uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            article_uris: uris.into_iter().map(Into::into).collect(),
            return_info: ReturnInfo::default(),
        }
    }

    pub fn by_uri(uri: &str) -> Self {
        Self::by_uris([uri])
    }

    #[must_use]
    pub fn with_return_info(mut self, return_info: ReturnInfo) -> Self {
        self.return_info = return_info;
        self
    }
}

impl Query for QueryArticle {
    fn path(&self) -> &'static str {
        "api/v1/article/getArticle"
    }

    fn params(&self) -> Result<Params> {
        if self.article_uris.is_empty() {
            return Err(EventRegistryError::invalid("at least one article URI is required"));
        }
        let mut params = QueryParams::new();
        params.set_val("action", "getArticle");
        params.set_list("articleUri", &self.article_uris);
        params.set_val("resultType", "info");
        self.return_info.write_to(&mut params);
        Ok(params.into_params())
    }
}
