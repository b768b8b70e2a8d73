//! Find concepts and categories whose daily mention counts correlate with a
//! time series.
//!
//! The input series either comes from the caller or from the daily article
//! counts of a [`QueryArticles`].

use serde_json::Value;

use crate::client::EventRegistry;
use crate::error::{EventRegistryError, Result};
use crate::models::TimeAggrItem;
use crate::pagination::parse_results;
use crate::query::{ArticlesRequest, ConceptType, Params, QueryArticles, QueryParams};
use crate::return_info::ReturnInfo;

const CORRELATE_PATH: &str = "api/v1/correlate";

/// Most correlations computed exactly.
pub const MAX_EXACT_COUNT: u32 = 100;

/// Most correlations computed approximately.
pub const MAX_APPROX_COUNT: u32 = 1000;

/// Settings of a concept correlation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConceptCorrelationOptions {
    /// Articles whose top concepts become the candidate set.
    pub candidate_query: Option<QueryArticles>,
    /// Candidate concepts taken from the candidate query.
    pub candidates_per_type: u32,
    pub concept_type: Option<ConceptType>,
    pub exact_count: u32,
    pub approx_count: u32,
    pub return_info: ReturnInfo,
}

impl Default for ConceptCorrelationOptions {
    fn default() -> Self {
        Self {
            candidate_query: None,
            candidates_per_type: 500,
            concept_type: None,
            exact_count: 10,
            approx_count: 0,
            return_info: ReturnInfo::default(),
        }
    }
}

fn check_counts(exact_count: u32, approx_count: u32) -> Result<()> {
    if exact_count > MAX_EXACT_COUNT {
        return Err(EventRegistryError::invalid(format!(
            "exact count must be at most {MAX_EXACT_COUNT}, got {exact_count}"
        )));
    }
    if approx_count > MAX_APPROX_COUNT {
        return Err(EventRegistryError::invalid(format!(
            "approximate count must be at most {MAX_APPROX_COUNT}, got {approx_count}"
        )));
    }
    Ok(())
}

/// Concept ids from a `conceptAggr` result.
fn concept_ids(response: &Value) -> Result<Vec<String>> {
    let concepts: Vec<Value> = parse_results(response, "conceptAggr")?;
    Ok(concepts
        .iter()
        .filter_map(|c| match c.get("id") {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        })
        .collect())
}

/// Correlation search over an input time series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopCorrelations {
    input_data: Option<Vec<TimeAggrItem>>,
}

impl TopCorrelations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a caller-supplied series of `(date, count)` points.
    pub fn set_custom_input_data<I, S>(&mut self, points: I)
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.input_data = Some(
            points
                .into_iter()
                .map(|(date, count)| TimeAggrItem {
                    date: date.into(),
                    count,
                })
                .collect(),
        );
    }

    /// Use the daily article counts of `query` as the input series.
    #[tracing::instrument(skip(self, client, query))]
    pub async fn load_input_data_with_query(
        &mut self,
        client: &EventRegistry,
        query: &QueryArticles,
    ) -> Result<()> {
        self.input_data = None;
        let query = query.clone().with_requested_result(ArticlesRequest::TimeAggr);
        let response = client.exec_query(&query).await?;
        let points: Vec<TimeAggrItem> = parse_results(&response, "timeAggr")?;
        tracing::debug!(points = points.len(), "loaded correlation input data");
        self.input_data = Some(points);
        Ok(())
    }

    pub fn has_input_data(&self) -> bool {
        self.input_data.is_some()
    }

    pub fn input_data(&self) -> Option<&[TimeAggrItem]> {
        self.input_data.as_deref()
    }

    fn base_params(&self, action: &str, source_type: &str) -> Result<QueryParams> {
        let data = self.input_data.as_ref().ok_or_else(|| {
            EventRegistryError::MissingInputData(
                "set custom input data or load it with a query first".to_string(),
            )
        })?;
        let mut params = QueryParams::new();
        params.set_val("action", action);
        params.set_val("sourceType", source_type);
        params.set_val("testData", serde_json::to_string(data)?);
        Ok(params)
    }

    /// Parameters for a concept correlation request with known candidates.
    pub fn concept_correlation_params(
        &self,
        options: &ConceptCorrelationOptions,
        candidate_ids: &[String],
    ) -> Result<Params> {
        check_counts(options.exact_count, options.approx_count)?;
        let mut params = self.base_params("findTopConceptCorrelations", "news-concept")?;
        if !candidate_ids.is_empty() {
            params.set_val("contextConceptIds", candidate_ids.join(","));
        }
        params.set_opt("conceptType", options.concept_type);
        params.set_val("exactCount", options.exact_count);
        params.set_val("approxCount", options.approx_count);
        options.return_info.write_to(&mut params);
        Ok(params.into_params())
    }

    /// Parameters for a category correlation request.
    pub fn category_correlation_params(
        &self,
        exact_count: u32,
        approx_count: u32,
        return_info: &ReturnInfo,
    ) -> Result<Params> {
        check_counts(exact_count, approx_count)?;
        let mut params = self.base_params("findTopCategoryCorrelations", "news-category")?;
        params.set_val("exactCount", exact_count);
        params.set_val("approxCount", approx_count);
        return_info.write_to(&mut params);
        Ok(params.into_params())
    }

    /// Concepts whose mention counts best correlate with the input series.
    ///
    /// With a candidate query, its most frequent concepts are the only
    /// candidates considered.
    #[tracing::instrument(skip(self, client, options))]
    pub async fn top_concept_correlations(
        &self,
        client: &EventRegistry,
        options: &ConceptCorrelationOptions,
    ) -> Result<Value> {
        // Validate before fetching candidates.
        self.base_params("findTopConceptCorrelations", "news-concept")?;
        check_counts(options.exact_count, options.approx_count)?;

        let candidate_ids = match options.candidate_query {
            Some(ref query) => {
                let request = ArticlesRequest::concept_aggr(options.candidates_per_type);
                let query = query.clone().with_requested_result(request);
                let response = client.exec_query(&query).await?;
                concept_ids(&response)?
            }
            None => Vec::new(),
        };
        let params = self.concept_correlation_params(options, &candidate_ids)?;
        client.json_request(CORRELATE_PATH, params).await
    }

    /// Categories whose article counts best correlate with the input series.
    #[tracing::instrument(skip(self, client, return_info))]
    pub async fn top_category_correlations(
        &self,
        client: &EventRegistry,
        exact_count: u32,
        approx_count: u32,
        return_info: &ReturnInfo,
    ) -> Result<Value> {
        let params = self.category_correlation_params(exact_count, approx_count, return_info)?;
        client.json_request(CORRELATE_PATH, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_data() -> TopCorrelations {
        let mut corr = TopCorrelations::new();
        corr.set_custom_input_data([("2024-01-01", 5.0), ("2024-01-02", 9.0)]);
        corr
    }

    #[test]
    fn test_missing_input_data() {
        let corr = TopCorrelations::new();
        assert!(!corr.has_input_data());
        let err = corr
            .category_correlation_params(10, 0, &ReturnInfo::default())
            .unwrap_err();
        assert!(matches!(err, EventRegistryError::MissingInputData(_)));
    }

    #[test]
    fn test_concept_params() {
        let corr = with_data();
        let options = ConceptCorrelationOptions {
            concept_type: Some(ConceptType::Organization),
            ..Default::default()
        };
        let params = corr
            .concept_correlation_params(&options, &["12".to_string(), "34".to_string()])
            .unwrap();
        assert_eq!(params["action"], json!("findTopConceptCorrelations"));
        assert_eq!(params["contextConceptIds"], json!("12,34"));
        assert_eq!(params["conceptType"], json!("org"));
        let data: Value = serde_json::from_str(params["testData"].as_str().unwrap()).unwrap();
        assert_eq!(data[1], json!({"date": "2024-01-02", "count": 9.0}));
    }

    #[test]
    fn test_count_limits() {
        let corr = with_data();
        assert!(corr.category_correlation_params(101, 0, &ReturnInfo::default()).is_err());
        assert!(corr.category_correlation_params(10, 1001, &ReturnInfo::default()).is_err());
        assert!(corr.category_correlation_params(100, 1000, &ReturnInfo::default()).is_ok());
    }

    #[test]
    fn test_concept_ids_from_aggr() {
        let response = json!({"conceptAggr": {"results": [
            {"id": "17", "uri": "a"},
            {"id": 42, "uri": "b"},
            {"uri": "c"}
        ]}});
        assert_eq!(concept_ids(&response).unwrap(), vec!["17", "42"]);
    }
}
