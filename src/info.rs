//! Details and statistics of known concepts, sources and categories.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::EventRegistry;
use crate::error::{EventRegistryError, Result};
use crate::models::{Category, Concept, Source};
use crate::query::{CountsType, Params, QueryParams, TrendSource};
use crate::return_info::ReturnInfo;
use crate::traits::Query;

fn uri_params(action: &str, uris: &[String], return_info: &ReturnInfo) -> Result<Params> {
    if uris.is_empty() {
        return Err(EventRegistryError::invalid("at least one URI is required"));
    }
    let mut params = QueryParams::new();
    params.set_val("action", action);
    params.set_list("uri", uris);
    return_info.write_to(&mut params);
    Ok(params.into_params())
}

/// Deserialize an object keyed by URI, skipping entries the server could
/// not resolve.
fn keyed_by_uri<T: DeserializeOwned>(response: Value) -> Result<HashMap<String, T>> {
    let Value::Object(map) = response else {
        return Err(EventRegistryError::ApiError {
            message: "expected an object keyed by URI".to_string(),
            status_code: None,
        });
    };
    let mut out = HashMap::with_capacity(map.len());
    for (uri, entry) in map {
        if entry.is_null() || entry.get("error").is_some() {
            tracing::debug!(uri, "no info returned");
            continue;
        }
        out.insert(uri, serde_json::from_value(entry)?);
    }
    Ok(out)
}

macro_rules! uri_info_query {
    (
        $(#[$meta:meta])*
        $name:ident => $path:literal, $item:ty
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            pub uris: Vec<String>,
            pub return_info: ReturnInfo,
        }

        impl $name {
            pub fn new<I, S>(uris: I) -> Self
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                Self {
                    uris: uris.into_iter().map(Into::into).collect(),
                    return_info: ReturnInfo::default(),
                }
            }

            #[must_use]
            pub fn with_return_info(mut self, return_info: ReturnInfo) -> Self {
                self.return_info = return_info;
                self
            }

            /// Fetch the details, keyed by URI.
            pub async fn fetch(&self, client: &EventRegistry) -> Result<HashMap<String, $item>> {
                keyed_by_uri(client.exec_query(self).await?)
            }
        }

        impl Query for $name {
            fn path(&self) -> &'static str {
                $path
            }

            fn params(&self) -> Result<Params> {
                uri_params("getInfo", &self.uris, &self.return_info)
            }
        }
    };
}

uri_info_query! {
    /// Details of concepts by URI.
    ConceptInfo => "api/v1/concept/getInfo", Concept
}

uri_info_query! {
    /// Details of news sources by URI.
    SourceInfo => "api/v1/source/getSourceInfo", Source
}

uri_info_query! {
    /// Details of categories by URI.
    CategoryInfo => "api/v1/category/getInfo", Category
}

/// Article statistics of news sources.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceStats {
    pub uris: Vec<String>,
}

impl SourceStats {
    pub fn new<I, S>(uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            uris: uris.into_iter().map(Into::into).collect(),
        }
    }
}

impl Query for SourceStats {
    fn path(&self) -> &'static str {
        "api/v1/source/getStats"
    }

    fn params(&self) -> Result<Params> {
        uri_params("getStats", &self.uris, &ReturnInfo::default())
    }
}

/// Daily mention counts of concepts or categories.
#[derive(Debug, Clone, PartialEq)]
pub struct Counts {
    pub uris: Vec<String>,
    pub source: TrendSource,
    pub kind: CountsType,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
}

impl Counts {
    pub fn new<I, S>(uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            uris: uris.into_iter().map(Into::into).collect(),
            source: TrendSource::News,
            kind: CountsType::Concept,
            date_start: None,
            date_end: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: TrendSource) -> Self {
        self.source = source;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: CountsType) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.date_start = start;
        self.date_end = end;
        self
    }
}

impl Query for Counts {
    fn path(&self) -> &'static str {
        "api/v1/counters/getCounts"
    }

    fn params(&self) -> Result<Params> {
        let mut params = QueryParams::new();
        params.extend(uri_params("getCounts", &self.uris, &ReturnInfo::default())?);
        params.set_val("source", self.source);
        params.set_val("type", self.kind);
        params.set_date("startDate", self.date_start);
        params.set_date("endDate", self.date_end);
        Ok(params.into_params())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_concept_info_params() {
        let query = ConceptInfo::new(["http://en.wikipedia.org/wiki/Paris"]);
        assert_eq!(query.path(), "api/v1/concept/getInfo");
        let params = query.params().unwrap();
        assert_eq!(params["action"], json!("getInfo"));
        assert_eq!(params["uri"], json!(["http://en.wikipedia.org/wiki/Paris"]));
    }

    #[test]
    fn test_empty_uris_rejected() {
        assert!(SourceInfo::new(Vec::<String>::new()).params().is_err());
        assert!(SourceStats::new(Vec::<String>::new()).params().is_err());
    }

    #[test]
    fn test_counts_params() {
        let params = Counts::new(["news/Business"])
            .with_kind(CountsType::Category)
            .with_date_range(NaiveDate::from_ymd_opt(2024, 1, 1), None)
            .params()
            .unwrap();
        assert_eq!(params["action"], json!("getCounts"));
        assert_eq!(params["type"], json!("category"));
        assert_eq!(params["source"], json!("news"));
        assert_eq!(params["startDate"], json!("2024-01-01"));
        assert!(!params.contains_key("endDate"));
    }

    #[test]
    fn test_keyed_by_uri_skips_unresolved() {
        let response = json!({
            "bbc.co.uk": {"uri": "bbc.co.uk", "title": "BBC"},
            "nope.example": null
        });
        let sources: HashMap<String, Source> = keyed_by_uri(response).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources["bbc.co.uk"].title.as_deref(), Some("BBC"));
    }
}
