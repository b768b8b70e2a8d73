//! String-valued options accepted by the API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::EventRegistryError;

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
        default = $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// The value sent over the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = EventRegistryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok(Self::$variant), )+
                    other => Err(EventRegistryError::InvalidParameter(format!(
                        "unknown {} '{}'",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }

        impl From<$name> for Value {
            fn from(v: $name) -> Value {
                Value::String(v.as_str().to_string())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

string_enum! {
    /// Where keywords are searched for.
    pub enum KeywordLoc {
        Body => "body",
        Title => "title",
        BodyAndTitle => "body,title",
    }
    default = Body;
}

string_enum! {
    /// How multi-word keywords are matched.
    pub enum KeywordSearchMode {
        /// All words anywhere in the text.
        Simple => "simple",
        /// Words in exactly this order.
        Exact => "exact",
        /// Words close to each other.
        Phrase => "phrase",
    }
    default = Phrase;
}

string_enum! {
    /// Kind of content a source publishes.
    pub enum DataType {
        News => "news",
        PressRelease => "pr",
        Blog => "blog",
    }
    default = News;
}

string_enum! {
    /// Filter on whether an article is a duplicate of another.
    pub enum IsDuplicateFilter {
        KeepAll => "keepAll",
        SkipDuplicates => "skipDuplicates",
        KeepOnlyDuplicates => "keepOnlyDuplicates",
    }
    default = KeepAll;
}

string_enum! {
    /// Filter on whether an article has duplicates elsewhere.
    pub enum HasDuplicateFilter {
        KeepAll => "keepAll",
        SkipHasDuplicates => "skipHasDuplicates",
        KeepOnlyHasDuplicates => "keepOnlyHasDuplicates",
    }
    default = KeepAll;
}

string_enum! {
    /// Filter on whether an article was assigned to an event.
    pub enum EventFilter {
        KeepAll => "keepAll",
        SkipArticlesWithoutEvent => "skipArticlesWithoutEvent",
        KeepOnlyArticlesWithoutEvent => "keepOnlyArticlesWithoutEvent",
    }
    default = KeepAll;
}

string_enum! {
    /// Article ordering.
    pub enum ArticleSortBy {
        Date => "date",
        Relevance => "rel",
        SourceImportance => "sourceImportance",
        SourceAlexaGlobalRank => "sourceAlexaGlobalRank",
        SourceAlexaCountryRank => "sourceAlexaCountryRank",
        SocialScore => "socialScore",
        FacebookShares => "facebookShares",
    }
    default = Date;
}

string_enum! {
    /// Ordering of the articles that belong to one event.
    pub enum EventArticleSortBy {
        /// Similarity to the event centroid.
        CosSim => "cosSim",
        Date => "date",
        SourceImportance => "sourceImportance",
        SocialScore => "socialScore",
        FacebookShares => "facebookShares",
    }
    default = CosSim;
}

string_enum! {
    /// Event ordering.
    pub enum EventSortBy {
        Unsorted => "none",
        Date => "date",
        Relevance => "rel",
        Size => "size",
        SocialScore => "socialScore",
    }
    default = Relevance;
}

string_enum! {
    /// Mention ordering.
    pub enum MentionSortBy {
        Date => "date",
        Relevance => "rel",
        SourceImportance => "sourceImportance",
        SourceAlexaGlobalRank => "sourceAlexaGlobalRank",
    }
    default = Date;
}

string_enum! {
    /// Ordering of URI/weight lists.
    pub enum UriWgtSortBy {
        Date => "date",
        Relevance => "rel",
        Size => "size",
        SocialScore => "socialScore",
    }
    default = Relevance;
}

string_enum! {
    /// Which signal trend endpoints use.
    pub enum TrendSource {
        News => "news",
        Social => "social",
    }
    default = News;
}

string_enum! {
    /// Coarse concept classification.
    pub enum ConceptType {
        Person => "person",
        Organization => "org",
        Location => "loc",
        Wiki => "wiki",
    }
    default = Person;
}

string_enum! {
    /// Category taxonomy used by the categorizer.
    pub enum Taxonomy {
        Dmoz => "dmoz",
        News => "news",
    }
    default = Dmoz;
}

string_enum! {
    /// Text similarity measure.
    pub enum SimilarityMethod {
        Cosine => "cosine",
        Jaccard => "jaccard",
    }
    default = Cosine;
}

string_enum! {
    /// Kind of item whose daily counts are requested.
    pub enum CountsType {
        Concept => "concept",
        Category => "category",
    }
    default = Concept;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip_through_from_str() {
        assert_eq!("rel".parse::<ArticleSortBy>().unwrap(), ArticleSortBy::Relevance);
        assert_eq!(ArticleSortBy::SocialScore.as_str(), "socialScore");
        assert_eq!(DataType::PressRelease.to_string(), "pr");
    }

    #[test]
    fn test_unknown_value_is_invalid_parameter() {
        let err = "newest".parse::<EventSortBy>().unwrap_err();
        assert!(matches!(err, EventRegistryError::InvalidParameter(_)));
    }

    #[test]
    fn test_serde_uses_wire_names() {
        assert_eq!(serde_json::to_value(DataType::Blog).unwrap(), Value::from("blog"));
        let parsed: Vec<DataType> = serde_json::from_str(r#"["news", "pr"]"#).unwrap();
        assert_eq!(parsed, vec![DataType::News, DataType::PressRelease]);
    }

    #[test]
    fn test_defaults_match_server_defaults() {
        assert_eq!(KeywordLoc::default(), KeywordLoc::Body);
        assert_eq!(KeywordSearchMode::default(), KeywordSearchMode::Phrase);
        assert_eq!(IsDuplicateFilter::default().as_str(), "keepAll");
    }
}
