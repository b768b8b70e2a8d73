//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the erclient binary.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::query::{Filtered, QueryItems};

/// Event Registry command-line interface.
#[derive(Parser, Debug)]
#[command(name = "erclient", about = "Event Registry API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// JSON settings file with `apiKey`, `host` and `hostAnalytics`.
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search articles.
    Articles {
        #[command(flatten)]
        filters: SearchFilters,

        #[command(flatten)]
        paging: Paging,
    },

    /// Search events.
    Events {
        #[command(flatten)]
        filters: SearchFilters,

        #[command(flatten)]
        paging: Paging,

        /// Only events with at least this many articles.
        #[arg(long)]
        min_articles: Option<u32>,
    },

    /// Search event mentions.
    Mentions {
        #[command(flatten)]
        filters: SearchFilters,

        #[command(flatten)]
        paging: Paging,

        /// Event type URI (see `suggest event-type`).
        #[arg(long)]
        event_type: Option<String>,
    },

    /// Get a single article or event by URI.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// The article or event URI.
        uri: String,
    },

    /// Look up URIs by name prefix.
    Suggest {
        /// What to suggest.
        kind: SuggestKind,

        /// Name prefix to complete.
        prefix: String,

        /// Language of the prefix.
        #[arg(long, default_value = "eng")]
        lang: String,

        /// Number of suggestions.
        #[arg(long, default_value = "10")]
        count: u32,
    },

    /// Show what is trending right now.
    Trends {
        /// Trend categories instead of concepts.
        #[arg(long)]
        categories: bool,

        /// Measure trends in social media instead of news.
        #[arg(long)]
        social: bool,

        /// Number of trending items.
        #[arg(long, default_value = "20")]
        count: u32,
    },

    /// Show token usage of the API key.
    Usage,

    /// Poll the recent-activity feed once.
    Recent {
        /// Feed to poll.
        #[arg(value_enum, default_value = "articles")]
        feed: Feed,

        /// How far back to look, in minutes.
        #[arg(long, default_value = "10")]
        mins_ago: u32,

        /// Most items to return.
        #[arg(long, default_value = "50")]
        count: u32,
    },
}

/// Filters shared by the search commands.
#[derive(Args, Debug, Clone, Default)]
pub struct SearchFilters {
    /// Keyword to search for (repeat to require several).
    #[arg(long = "keyword", short = 'k')]
    pub keywords: Vec<String>,

    /// Concept URI (repeat to require several).
    #[arg(long = "concept")]
    pub concepts: Vec<String>,

    /// Category URI.
    #[arg(long)]
    pub category: Option<String>,

    /// News source URI.
    #[arg(long)]
    pub source: Option<String>,

    /// Language (ISO 639-3, e.g. `eng`).
    #[arg(long)]
    pub lang: Option<String>,

    /// Earliest date (YYYY-MM-DD).
    #[arg(long)]
    pub date_start: Option<NaiveDate>,

    /// Latest date (YYYY-MM-DD).
    #[arg(long)]
    pub date_end: Option<NaiveDate>,
}

impl SearchFilters {
    /// Apply the filters to any query with shared conditions.
    pub fn apply<Q: Filtered>(&self, mut query: Q) -> Q {
        if !self.keywords.is_empty() {
            query = query.with_keywords(QueryItems::and(self.keywords.clone()));
        }
        if !self.concepts.is_empty() {
            query = query.with_concept_uri(QueryItems::and(self.concepts.clone()));
        }
        if let Some(ref category) = self.category {
            query = query.with_category_uri(category.as_str());
        }
        if let Some(ref source) = self.source {
            query = query.with_source_uri(source.as_str());
        }
        if let Some(ref lang) = self.lang {
            query = query.with_lang(lang.as_str());
        }
        if self.date_start.is_some() || self.date_end.is_some() {
            query = query.with_date_range(self.date_start, self.date_end);
        }
        query
    }
}

/// Page selection for the search commands.
#[derive(Args, Debug, Clone)]
pub struct Paging {
    /// Page number (1-indexed).
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Number of items per page.
    #[arg(long, default_value = "20")]
    pub count: u32,
}

/// Entity types that can be fetched by URI.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A news article.
    #[value(alias = "articles")]
    Article,
    /// An event.
    #[value(alias = "events")]
    Event,
}

/// Kinds of suggestion.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuggestKind {
    Concept,
    Category,
    Source,
    SourceGroup,
    Location,
    Author,
    EventType,
    ConceptClass,
}

/// Recent-activity feeds.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feed {
    Articles,
    Events,
}
