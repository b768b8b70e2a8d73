//! Entities referenced from articles, events and mentions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A label that is either plain text or keyed by language code.
///
/// Concepts and events carry multilingual labels (`{"eng": "Paris"}`),
/// categories a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Text(String),
    Multilingual(BTreeMap<String, String>),
}

impl Default for Label {
    fn default() -> Self {
        Self::Multilingual(BTreeMap::new())
    }
}

impl Label {
    /// The label in `lang`, if present.
    pub fn get(&self, lang: &str) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Multilingual(map) => map.get(lang).map(String::as_str),
        }
    }

    /// English when available, otherwise any language.
    pub fn best(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Multilingual(map) => map
                .get("eng")
                .or_else(|| map.values().next())
                .map(String::as_str),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Multilingual(map) => map.is_empty(),
        }
    }
}

/// A Wikipedia-backed concept (person, organization, location or thing).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    /// Concept URI, usually a Wikipedia URL.
    pub uri: String,

    /// Concept type (`person`, `org`, `loc`, `wiki`).
    #[serde(default, rename = "type")]
    pub concept_type: Option<String>,

    /// Relevance of the concept in the containing item.
    #[serde(default)]
    pub score: Option<f64>,

    #[serde(default)]
    pub label: Label,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Location details for `loc` concepts.
    #[serde(default)]
    pub location: Option<Location>,
}

impl Concept {
    /// The English label, falling back to the URI.
    pub fn display_label(&self) -> &str {
        self.label.best().unwrap_or(&self.uri)
    }
}

/// A news source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// Source URI (its domain, e.g. `bbc.co.uk`).
    pub uri: String,

    #[serde(default)]
    pub data_type: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub location: Option<Location>,

    /// Ranking details, when requested.
    #[serde(default)]
    pub ranking: Option<serde_json::Value>,
}

/// A topical category from one of the supported taxonomies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category URI (e.g. `dmoz/Business/Energy`).
    pub uri: String,

    #[serde(default)]
    pub label: Label,

    #[serde(default)]
    pub wgt: Option<f64>,

    #[serde(default)]
    pub parent_uri: Option<String>,
}

/// A geographic location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub uri: Option<String>,

    /// `place` or `country`.
    #[serde(default, rename = "type")]
    pub location_type: Option<String>,

    #[serde(default)]
    pub label: Label,

    #[serde(default)]
    pub lat: Option<f64>,

    #[serde(default)]
    pub long: Option<f64>,

    /// Country containing a place.
    #[serde(default)]
    pub country: Option<Box<Location>>,
}

/// An article author.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub uri: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default, rename = "type")]
    pub author_type: Option<String>,

    /// Whether the "author" is a news agency.
    #[serde(default)]
    pub is_agency: bool,
}

/// A typed kind of event that mentions describe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventType {
    pub uri: String,

    #[serde(default)]
    pub label: Label,
}

/// An entry returned by the suggest endpoints.
///
/// Suggestions mix concepts, categories, sources and locations, so only the
/// shared fields are typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub uri: String,

    #[serde(default, rename = "type")]
    pub suggestion_type: Option<String>,

    #[serde(default)]
    pub label: Label,

    /// Title of sources and source groups.
    #[serde(default)]
    pub title: Option<String>,

    /// Author names.
    #[serde(default)]
    pub name: Option<String>,
}

impl Suggestion {
    /// Best human-readable name for the suggestion.
    pub fn display_name(&self) -> &str {
        self.label
            .best()
            .or(self.title.as_deref())
            .or(self.name.as_deref())
            .unwrap_or(&self.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_variants() {
        let text: Label = serde_json::from_str(r#""news/Business""#).unwrap();
        assert_eq!(text.best(), Some("news/Business"));

        let multi: Label = serde_json::from_str(r#"{"deu": "Berlin", "eng": "Berlin (city)"}"#).unwrap();
        assert_eq!(multi.get("deu"), Some("Berlin"));
        assert_eq!(multi.best(), Some("Berlin (city)"));
    }

    #[test]
    fn test_concept_deserialize() {
        let json = r#"{
            "uri": "http://en.wikipedia.org/wiki/Elon_Musk",
            "type": "person",
            "score": 5,
            "label": {"eng": "Elon Musk"}
        }"#;
        let concept: Concept = serde_json::from_str(json).unwrap();
        assert_eq!(concept.concept_type.as_deref(), Some("person"));
        assert_eq!(concept.display_label(), "Elon Musk");
        assert_eq!(concept.score, Some(5.0));
    }

    #[test]
    fn test_concept_without_label_falls_back_to_uri() {
        let concept: Concept = serde_json::from_str(r#"{"uri": "http://x"}"#).unwrap();
        assert_eq!(concept.display_label(), "http://x");
    }

    #[test]
    fn test_location_with_country() {
        let json = r#"{
            "type": "place",
            "label": {"eng": "Lyon"},
            "country": {"type": "country", "label": {"eng": "France"}}
        }"#;
        let loc: Location = serde_json::from_str(json).unwrap();
        assert_eq!(
            loc.country.as_ref().and_then(|c| c.label.best()),
            Some("France")
        );
    }

    #[test]
    fn test_suggestion_display_name() {
        let source: Suggestion =
            serde_json::from_str(r#"{"uri": "bbc.co.uk", "title": "BBC"}"#).unwrap();
        assert_eq!(source.display_name(), "BBC");
    }
}
