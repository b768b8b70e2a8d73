//! Controls which properties the server includes for returned entities.
//!
//! Each entity kind has a flag set whose defaults mirror the server's
//! defaults. Only flags that were changed are sent, as
//! `include<Entity><Property>` booleans.

use crate::query::{Params, QueryParams};

macro_rules! info_flags {
    (
        $(#[$meta:meta])*
        pub struct $name:ident : $entity:literal {
            $( $(#[$fmeta:meta])* $field:ident => $key:literal = $default:expr, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: bool, )+
        }

        impl Default for $name {
            fn default() -> Self {
                Self { $( $field: $default, )+ }
            }
        }

        impl $name {
            /// Flags with every property turned on.
            #[must_use]
            pub fn all() -> Self {
                Self { $( $field: true, )+ }
            }

            fn write_to(&self, params: &mut QueryParams) {
                let defaults = Self::default();
                $(
                    if self.$field != defaults.$field {
                        params.set_val(concat!("include", $entity, $key), self.$field);
                    }
                )+
            }
        }
    };
}

info_flags! {
    /// Article properties.
    pub struct ArticleInfoFlags : "Article" {
        basic_info => "BasicInfo" = true,
        title => "Title" = true,
        body => "Body" = true,
        url => "Url" = true,
        event_uri => "EventUri" = true,
        authors => "Authors" = true,
        concepts => "Concepts" = false,
        categories => "Categories" = false,
        links => "Links" = false,
        videos => "Videos" = false,
        image => "Image" = true,
        social_score => "SocialScore" = false,
        sentiment => "Sentiment" = true,
        location => "Location" = false,
        dates => "Dates" = false,
        extracted_dates => "ExtractedDates" = false,
        duplicate_list => "DuplicateList" = false,
        original_article => "OriginalArticle" = false,
        story_uri => "StoryUri" = false,
    }
}

info_flags! {
    /// Event properties.
    pub struct EventInfoFlags : "Event" {
        title => "Title" = true,
        summary => "Summary" = true,
        article_counts => "ArticleCounts" = true,
        concepts => "Concepts" = true,
        categories => "Categories" = true,
        location => "Location" = true,
        date => "Date" = true,
        common_dates => "CommonDates" = false,
        info_article => "InfoArticle" = false,
        stories => "Stories" = false,
        social_score => "SocialScore" = false,
    }
}

info_flags! {
    /// Concept properties.
    pub struct ConceptInfoFlags : "Concept" {
        label => "Label" = true,
        synonyms => "Synonyms" = false,
        image => "Image" = false,
        description => "Description" = false,
        trending_score => "TrendingScore" = false,
    }
}

info_flags! {
    /// News source properties.
    pub struct SourceInfoFlags : "Source" {
        title => "Title" = true,
        description => "Description" = false,
        location => "Location" = false,
        ranking => "Ranking" = false,
        image => "Image" = false,
        social_media => "SocialMedia" = false,
    }
}

info_flags! {
    /// Category properties.
    pub struct CategoryInfoFlags : "Category" {
        parent_uri => "ParentUri" = false,
        children_uris => "ChildrenUris" = false,
        trending_score => "TrendingScore" = false,
    }
}

info_flags! {
    /// Location properties.
    pub struct LocationInfoFlags : "Location" {
        label => "Label" = true,
        wiki_uri => "WikiUri" = false,
        geo_names_id => "GeoNamesId" = false,
        population => "Population" = false,
        geo_location => "GeoLocation" = false,
        country_details => "CountryDetails" = false,
        place_country => "PlaceCountry" = true,
    }
}

info_flags! {
    /// Mention properties.
    pub struct MentionInfoFlags : "Mention" {
        basic_info => "BasicInfo" = true,
        slug => "Slug" = false,
        categories => "Categories" = false,
        frameworks => "Frameworks" = false,
        concepts => "Concepts" = false,
        sentiment => "Sentiment" = true,
    }
}

/// What to return for every entity kind in a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnInfo {
    pub article: ArticleInfoFlags,
    /// Characters of article body to return; `-1` returns the full body.
    pub article_body_len: i32,
    pub event: EventInfoFlags,
    pub concept: ConceptInfoFlags,
    /// Languages in which concept labels are returned.
    pub concept_lang: Vec<String>,
    pub source: SourceInfoFlags,
    pub category: CategoryInfoFlags,
    pub location: LocationInfoFlags,
    pub mention: MentionInfoFlags,
}

impl Default for ReturnInfo {
    fn default() -> Self {
        Self {
            article: ArticleInfoFlags::default(),
            article_body_len: -1,
            event: EventInfoFlags::default(),
            concept: ConceptInfoFlags::default(),
            concept_lang: Vec::new(),
            source: SourceInfoFlags::default(),
            category: CategoryInfoFlags::default(),
            location: LocationInfoFlags::default(),
            mention: MentionInfoFlags::default(),
        }
    }
}

impl ReturnInfo {
    #[must_use]
    pub fn with_article(mut self, flags: ArticleInfoFlags) -> Self {
        self.article = flags;
        self
    }

    #[must_use]
    pub fn with_article_body_len(mut self, len: i32) -> Self {
        self.article_body_len = len;
        self
    }

    #[must_use]
    pub fn with_event(mut self, flags: EventInfoFlags) -> Self {
        self.event = flags;
        self
    }

    #[must_use]
    pub fn with_concept(mut self, flags: ConceptInfoFlags) -> Self {
        self.concept = flags;
        self
    }

    #[must_use]
    pub fn with_concept_lang<I, S>(mut self, langs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.concept_lang = langs.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_source(mut self, flags: SourceInfoFlags) -> Self {
        self.source = flags;
        self
    }

    #[must_use]
    pub fn with_category(mut self, flags: CategoryInfoFlags) -> Self {
        self.category = flags;
        self
    }

    #[must_use]
    pub fn with_location(mut self, flags: LocationInfoFlags) -> Self {
        self.location = flags;
        self
    }

    #[must_use]
    pub fn with_mention(mut self, flags: MentionInfoFlags) -> Self {
        self.mention = flags;
        self
    }

    /// Append the non-default settings to a parameter builder.
    pub fn write_to(&self, params: &mut QueryParams) {
        self.article.write_to(params);
        params.set_val_if_not_default("articleBodyLen", self.article_body_len, -1);
        self.event.write_to(params);
        self.concept.write_to(params);
        params.set_list("conceptLang", &self.concept_lang);
        self.source.write_to(params);
        self.category.write_to(params);
        self.location.write_to(params);
        self.mention.write_to(params);
    }

    /// The non-default settings as a standalone parameter map.
    pub fn params(&self) -> Params {
        let mut params = QueryParams::new();
        self.write_to(&mut params);
        params.into_params()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_default_return_info_sends_nothing() {
        assert!(ReturnInfo::default().params().is_empty());
    }

    #[test]
    fn test_changed_flags_are_sent() {
        let info = ReturnInfo::default()
            .with_article(ArticleInfoFlags {
                concepts: true,
                body: false,
                ..Default::default()
            })
            .with_article_body_len(300)
            .with_concept_lang(["eng", "deu"]);
        let params = info.params();

        assert_eq!(params.get("includeArticleConcepts"), Some(&Value::Bool(true)));
        assert_eq!(params.get("includeArticleBody"), Some(&Value::Bool(false)));
        assert_eq!(params.get("articleBodyLen"), Some(&Value::from(300)));
        assert_eq!(params.get("conceptLang"), Some(&serde_json::json!(["eng", "deu"])));
        assert!(!params.contains_key("includeArticleTitle"));
    }

    #[test]
    fn test_all_flags() {
        let params = ReturnInfo::default()
            .with_source(SourceInfoFlags::all())
            .params();
        assert_eq!(params.get("includeSourceRanking"), Some(&Value::Bool(true)));
        // Already true by default, so not repeated
        assert!(!params.contains_key("includeSourceTitle"));
    }
}
