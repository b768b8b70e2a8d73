//! Parameter map builder shared by all queries.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use super::items::QueryItems;

/// A JSON object of request parameters.
pub type Params = Map<String, Value>;

/// Format a date the way the API expects it (`YYYY-MM-DD`).
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Incrementally assembled request parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    map: Params,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous one.
    pub fn set_val(&mut self, key: &str, value: impl Into<Value>) {
        self.map.insert(key.to_string(), value.into());
    }

    /// Set a value only when present.
    pub fn set_opt<V: Into<Value>>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.set_val(key, value);
        }
    }

    /// Set a value only when it differs from the server-side default.
    pub fn set_val_if_not_default<V>(&mut self, key: &str, value: V, default: V)
    where
        V: Into<Value> + PartialEq,
    {
        if value != default {
            self.set_val(key, value);
        }
    }

    pub fn set_date(&mut self, key: &str, date: Option<NaiveDate>) {
        if let Some(date) = date {
            self.set_val(key, format_date(date));
        }
    }

    /// Write a multi-valued condition as `key` plus `keyOper`.
    pub fn set_items(&mut self, key: &str, items: Option<&QueryItems>) {
        let Some(items) = items else { return };
        if items.is_empty() {
            return;
        }
        self.set_val(key, items.to_value());
        if let Some(oper) = items.oper() {
            self.set_val(&format!("{key}Oper"), oper);
        }
    }

    /// Write a plain list of strings, skipping empty lists.
    pub fn set_list(&mut self, key: &str, values: &[String]) {
        if values.is_empty() {
            return;
        }
        self.set_val(
            key,
            Value::Array(values.iter().cloned().map(Value::String).collect()),
        );
    }

    pub fn has_val(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    pub fn clear_val(&mut self, key: &str) {
        self.map.remove(key);
    }

    /// Merge another parameter map, overwriting duplicate keys.
    pub fn extend(&mut self, other: Params) {
        self.map.extend(other);
    }

    pub fn as_params(&self) -> &Params {
        &self.map
    }

    #[must_use]
    pub fn into_params(self) -> Params {
        self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_val_if_not_default_skips_default() {
        let mut params = QueryParams::new();
        params.set_val_if_not_default("keywordLoc", "body", "body");
        params.set_val_if_not_default("keywordSearchMode", "exact", "phrase");
        assert!(!params.has_val("keywordLoc"));
        assert_eq!(params.get("keywordSearchMode"), Some(&Value::from("exact")));
    }

    #[test]
    fn test_set_items_writes_operator() {
        let mut params = QueryParams::new();
        params.set_items("keyword", Some(&QueryItems::and(["Apple", "iPhone"])));
        assert_eq!(
            params.get("keyword"),
            Some(&serde_json::json!(["Apple", "iPhone"]))
        );
        assert_eq!(params.get("keywordOper"), Some(&Value::from("and")));
    }

    #[test]
    fn test_set_items_single_value_has_no_operator() {
        let mut params = QueryParams::new();
        params.set_items("conceptUri", Some(&QueryItems::from("http://en.wikipedia.org/wiki/Tesla")));
        assert!(params.has_val("conceptUri"));
        assert!(!params.has_val("conceptUriOper"));
    }

    #[test]
    fn test_empty_items_are_skipped() {
        let mut params = QueryParams::new();
        params.set_items("lang", Some(&QueryItems::or(Vec::<String>::new())));
        params.set_list("ignoreLang", &[]);
        assert!(params.as_params().is_empty());
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_date(date), "2024-03-07");
    }
}
