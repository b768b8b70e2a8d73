//! Aggregate results and account usage.

use serde::{Deserialize, Serialize};

use super::entity::{Category, Concept, Source};

/// Number of matching items on one day (`timeAggr` results).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAggrItem {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub count: f64,
}

/// A concept with its aggregate score (`conceptAggr` results).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptAggrItem {
    #[serde(flatten)]
    pub concept: Concept,
}

/// A keyword with its weight (`keywordAggr` results).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordAggrItem {
    pub keyword: String,
    pub weight: f64,
}

/// A category with its share of the results (`categoryAggr` results).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAggrItem {
    #[serde(flatten)]
    pub category: Category,
    #[serde(default)]
    pub count: Option<f64>,
}

/// A source with its article count (`sourceAggr` results).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceAggrItem {
    #[serde(flatten)]
    pub source: Source,
    #[serde(default)]
    pub count: Option<f64>,
}

/// Token usage of the API key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageInfo {
    pub available_tokens: u64,
    pub used_tokens: u64,
}

impl UsageInfo {
    /// Tokens still available in the current plan period.
    pub fn remaining_tokens(&self) -> u64 {
        self.available_tokens.saturating_sub(self.used_tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_aggr() {
        let items: Vec<TimeAggrItem> =
            serde_json::from_str(r#"[{"date": "2024-01-01", "count": 12}]"#).unwrap();
        assert_eq!(items[0].count, 12.0);
    }

    #[test]
    fn test_concept_aggr_flattens_concept() {
        let item: ConceptAggrItem = serde_json::from_str(
            r#"{"uri": "http://en.wikipedia.org/wiki/Oil", "type": "wiki", "score": 77}"#,
        )
        .unwrap();
        assert_eq!(item.concept.score, Some(77.0));
    }

    #[test]
    fn test_usage_remaining() {
        let usage: UsageInfo =
            serde_json::from_str(r#"{"availableTokens": 10000, "usedTokens": 2500}"#).unwrap();
        assert_eq!(usage.remaining_tokens(), 7500);
    }
}
