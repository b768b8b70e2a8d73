//! Multi-valued query conditions.

use serde_json::{json, Value};

/// One or more values for a single query condition.
///
/// A list is matched either when all values match ([`QueryItems::And`]) or
/// when any of them does ([`QueryItems::Or`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryItems {
    Single(String),
    And(Vec<String>),
    Or(Vec<String>),
}

impl QueryItems {
    /// All values must match.
    pub fn and<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::And(items.into_iter().map(Into::into).collect())
    }

    /// Any value may match.
    pub fn or<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Or(items.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(value) => value.is_empty(),
            Self::And(values) | Self::Or(values) => values.is_empty(),
        }
    }

    /// The operator name sent alongside a list, if any.
    pub fn oper(&self) -> Option<&'static str> {
        match self {
            Self::Single(_) => None,
            Self::And(_) => Some("and"),
            Self::Or(_) => Some("or"),
        }
    }

    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Single(value) => vec![value.as_str()],
            Self::And(values) | Self::Or(values) => values.iter().map(String::as_str).collect(),
        }
    }

    /// Flat parameter representation: a string or a list of strings.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Single(value) => Value::String(value.clone()),
            Self::And(values) | Self::Or(values) => json!(values),
        }
    }

    /// Representation used inside the complex query language.
    pub fn to_complex_value(&self) -> Value {
        match self {
            Self::Single(value) => Value::String(value.clone()),
            Self::And(values) => json!({ "$and": values }),
            Self::Or(values) => json!({ "$or": values }),
        }
    }
}

impl From<&str> for QueryItems {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for QueryItems {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

/// A bare list means "any of these".
impl From<Vec<String>> for QueryItems {
    fn from(values: Vec<String>) -> Self {
        Self::Or(values)
    }
}

impl From<&[&str]> for QueryItems {
    fn from(values: &[&str]) -> Self {
        Self::or(values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_value_shapes() {
        assert_eq!(QueryItems::from("Tesla").to_complex_value(), json!("Tesla"));
        assert_eq!(
            QueryItems::and(["a", "b"]).to_complex_value(),
            json!({"$and": ["a", "b"]})
        );
        assert_eq!(
            QueryItems::or(["a"]).to_complex_value(),
            json!({"$or": ["a"]})
        );
    }

    #[test]
    fn test_bare_list_is_or() {
        let items = QueryItems::from(vec!["eng".to_string(), "deu".to_string()]);
        assert_eq!(items.oper(), Some("or"));
        assert_eq!(items.values(), vec!["eng", "deu"]);
    }
}
