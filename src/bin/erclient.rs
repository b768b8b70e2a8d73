//! Event Registry CLI binary.
//!
//! A command-line interface for searching the Event Registry news archive.

use clap::Parser;
use eventregistry::cli::{Cli, Command, Entity, Feed, SuggestKind};
use eventregistry::output::PrettyPrint;
use eventregistry::{
    Article, ClientConfig, Event, EventRegistry, EventRegistryError, Get, List, Mention, Page,
    QueryArticles, QueryEvents, QueryMentions, RecentArticles, RecentEvents, SuggestOptions,
    Suggestion, TrendSource, TrendingCategories, TrendingConcepts,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let client = match build_client(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set EVENT_REGISTRY_API_KEY environment variable or pass --settings");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn build_client(cli: &Cli) -> eventregistry::Result<EventRegistry> {
    let config = match cli.settings {
        Some(ref path) => ClientConfig::from_settings_file(path)?,
        None => ClientConfig::from_env(),
    };
    if config.api_key.is_none() {
        return Err(EventRegistryError::ConfigMissing("no API key configured".to_string()));
    }
    EventRegistry::with_config(config)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(client: &EventRegistry, cli: Cli) -> eventregistry::Result<()> {
    match cli.command {
        Command::Articles { filters, paging } => {
            let query = filters.apply(QueryArticles::new());
            let page = Article::list_page(client, &query, paging.page, paging.count).await?;
            output_page(&page, cli.json, |a| ArticleRow::from(a))
        }
        Command::Events {
            filters,
            paging,
            min_articles,
        } => {
            let query = filters
                .apply(QueryEvents::new())
                .articles_in_event(min_articles, None);
            let page = Event::list_page(client, &query, paging.page, paging.count).await?;
            output_page(&page, cli.json, |e| EventRow::from(e))
        }
        Command::Mentions {
            filters,
            paging,
            event_type,
        } => {
            let mut query = filters.apply(QueryMentions::new());
            if let Some(event_type) = event_type {
                query = query.with_event_type_uri(event_type);
            }
            let page = Mention::list_page(client, &query, paging.page, paging.count).await?;
            output_page(&page, cli.json, |m| MentionRow::from(m))
        }
        Command::Get { entity, uri } => handle_get(client, entity, uri, cli.json).await,
        Command::Suggest {
            kind,
            prefix,
            lang,
            count,
        } => handle_suggest(client, kind, &prefix, &lang, count, cli.json).await,
        Command::Trends {
            categories,
            social,
            count,
        } => handle_trends(client, categories, social, count, cli.json).await,
        Command::Usage => {
            let usage = client.usage_info().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&usage)?);
            } else {
                println!("Used tokens:      {}", usage.used_tokens);
                println!("Available tokens: {}", usage.available_tokens);
                println!("Remaining:        {}", usage.remaining_tokens());
            }
            Ok(())
        }
        Command::Recent {
            feed,
            mins_ago,
            count,
        } => handle_recent(client, feed, mins_ago, count, cli.json).await,
    }
}

async fn handle_get(
    client: &EventRegistry,
    entity: Entity,
    uri: String,
    json: bool,
) -> eventregistry::Result<()> {
    match entity {
        Entity::Article => {
            let article = Article::get(client, uri).await?;
            output_single(&article, json)
        }
        Entity::Event => {
            let event = Event::get(client, uri).await?;
            output_single(&event, json)
        }
    }
}

async fn handle_suggest(
    client: &EventRegistry,
    kind: SuggestKind,
    prefix: &str,
    lang: &str,
    count: u32,
    json: bool,
) -> eventregistry::Result<()> {
    let options = SuggestOptions::default().with_lang(lang).with_count(count);
    let found = match kind {
        SuggestKind::Concept => client.suggest_concepts(prefix, &options).await?,
        SuggestKind::Category => client.suggest_categories(prefix, &options).await?,
        SuggestKind::Source => client.suggest_news_sources(prefix, &[], &options).await?,
        SuggestKind::SourceGroup => client.suggest_source_groups(prefix, &options).await?,
        SuggestKind::Location => {
            client
                .suggest_locations(prefix, None, None, &options)
                .await?
        }
        SuggestKind::Author => client.suggest_authors(prefix, &options).await?,
        SuggestKind::EventType => client.suggest_event_types(prefix, &options).await?,
        SuggestKind::ConceptClass => client.suggest_concept_classes(prefix, &options).await?,
    };
    output_list(&found, json, |s| SuggestionRow::from(s))
}

async fn handle_trends(
    client: &EventRegistry,
    categories: bool,
    social: bool,
    count: u32,
    json: bool,
) -> eventregistry::Result<()> {
    let source = if social {
        TrendSource::Social
    } else {
        TrendSource::News
    };
    if categories {
        let trending = TrendingCategories::new(source, count).fetch(client).await?;
        output_list(&trending, json, |c| TrendRow {
            uri: c.category.uri.clone(),
            label: c.category.label.best().unwrap_or_default().to_string(),
            score: score_text(c.trending_score.as_ref()),
        })
    } else {
        let trending = TrendingConcepts::new(source, count).fetch(client).await?;
        output_list(&trending, json, |c| TrendRow {
            uri: c.concept.uri.clone(),
            label: c.concept.display_label().to_string(),
            score: score_text(c.trending_score.as_ref()),
        })
    }
}

async fn handle_recent(
    client: &EventRegistry,
    feed: Feed,
    mins_ago: u32,
    count: u32,
    json: bool,
) -> eventregistry::Result<()> {
    match feed {
        Feed::Articles => {
            let mut recent = RecentArticles::new()
                .with_max_article_count(count)
                .updates_after_mins_ago(mins_ago);
            let articles = recent.get_updates(client).await?;
            output_list(&articles, json, |a| ArticleRow::from(a))
        }
        Feed::Events => {
            let mut recent = RecentEvents::new()
                .with_max_event_count(count)
                .updates_after_mins_ago(mins_ago);
            let activity = recent.get_updates(client).await?;
            let events: Vec<Event> = activity.events().cloned().collect();
            output_list(&events, json, |e| EventRow::from(e))
        }
    }
}

fn score_text(score: Option<&serde_json::Value>) -> String {
    match score {
        Some(serde_json::Value::Object(map)) => map
            .get("score")
            .map(ToString::to_string)
            .unwrap_or_default(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> eventregistry::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> eventregistry::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else if items.is_empty() {
        println!("No results");
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
    }
    Ok(())
}

fn output_page<T, R, F>(page: &Page<T>, json: bool, to_row: F) -> eventregistry::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
    } else {
        let rows: Vec<R> = page.items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        if let Some(total) = page.total {
            let total_pages = page
                .pages
                .map(u64::from)
                .unwrap_or_else(|| total.div_ceil(u64::from(page.count.max(1))));
            println!("\nPage {}/{} ({} total items)", page.page, total_pages, total);
        } else if page.has_more {
            println!("\nPage {} (more available)", page.page);
        } else {
            println!("\nPage {} (end)", page.page);
        }
    }
    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct ArticleRow {
    uri: String,
    date: String,
    source: String,
    title: String,
}

impl From<&Article> for ArticleRow {
    fn from(a: &Article) -> Self {
        Self {
            uri: a.uri.clone(),
            date: a.date.clone().unwrap_or_default(),
            source: a.source_title().unwrap_or_default().to_string(),
            title: truncate(a.title.as_deref().unwrap_or_default(), 70),
        }
    }
}

#[derive(Tabled)]
struct EventRow {
    uri: String,
    date: String,
    articles: String,
    title: String,
}

impl From<&Event> for EventRow {
    fn from(e: &Event) -> Self {
        Self {
            uri: e.uri.clone(),
            date: e.event_date.clone().unwrap_or_default(),
            articles: e
                .total_article_count
                .map(|c| c.to_string())
                .unwrap_or_default(),
            title: truncate(e.display_title(), 70),
        }
    }
}

#[derive(Tabled)]
struct MentionRow {
    uri: String,
    #[tabled(rename = "event type")]
    event_type: String,
    date: String,
    sentence: String,
}

impl From<&Mention> for MentionRow {
    fn from(m: &Mention) -> Self {
        Self {
            uri: m.uri.clone(),
            event_type: m
                .event_type
                .as_ref()
                .map(|t| t.uri.clone())
                .unwrap_or_default(),
            date: m.date.clone().unwrap_or_default(),
            sentence: truncate(m.sentence.trim(), 80),
        }
    }
}

#[derive(Tabled)]
struct SuggestionRow {
    uri: String,
    #[tabled(rename = "type")]
    suggestion_type: String,
    name: String,
}

impl From<&Suggestion> for SuggestionRow {
    fn from(s: &Suggestion) -> Self {
        Self {
            uri: s.uri.clone(),
            suggestion_type: s.suggestion_type.clone().unwrap_or_default(),
            name: s.display_name().to_string(),
        }
    }
}

#[derive(Tabled)]
struct TrendRow {
    uri: String,
    label: String,
    score: String,
}
