//! CLI argument parsing tests.

use chrono::NaiveDate;
use clap::Parser;
use eventregistry::cli::{Cli, Command, Entity, Feed, SuggestKind};

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["erclient", "get", "event", "eng-8561390"]);

    assert!(!cli.json);
    match cli.command {
        Command::Get { entity, uri } => {
            assert!(matches!(entity, Entity::Event));
            assert_eq!(uri, "eng-8561390");
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_articles_with_filters() {
    let cli = Cli::parse_from([
        "erclient",
        "articles",
        "-k",
        "Tesla",
        "--keyword",
        "battery",
        "--lang",
        "eng",
        "--date-start",
        "2024-03-01",
        "--page",
        "2",
        "--count",
        "50",
    ]);

    match cli.command {
        Command::Articles { filters, paging } => {
            assert_eq!(filters.keywords, vec!["Tesla", "battery"]);
            assert_eq!(filters.lang.as_deref(), Some("eng"));
            assert_eq!(filters.date_start, NaiveDate::from_ymd_opt(2024, 3, 1));
            assert_eq!(filters.date_end, None);
            assert_eq!(paging.page, 2);
            assert_eq!(paging.count, 50);
        }
        _ => panic!("Expected Articles command"),
    }
}

#[test]
fn test_cli_paging_defaults() {
    let cli = Cli::parse_from(["erclient", "events"]);

    match cli.command {
        Command::Events {
            paging,
            min_articles,
            ..
        } => {
            assert_eq!(paging.page, 1);
            assert_eq!(paging.count, 20);
            assert_eq!(min_articles, None);
        }
        _ => panic!("Expected Events command"),
    }
}

#[test]
fn test_cli_parses_suggest_kind() {
    let cli = Cli::parse_from(["erclient", "suggest", "source-group", "general"]);

    match cli.command {
        Command::Suggest {
            kind,
            prefix,
            lang,
            count,
        } => {
            assert_eq!(kind, SuggestKind::SourceGroup);
            assert_eq!(prefix, "general");
            assert_eq!(lang, "eng");
            assert_eq!(count, 10);
        }
        _ => panic!("Expected Suggest command"),
    }
}

#[test]
fn test_cli_json_flag_is_global() {
    let cli = Cli::parse_from(["erclient", "--json", "usage"]);
    assert!(cli.json);

    let cli = Cli::parse_from(["erclient", "usage", "--json"]);
    assert!(cli.json);
}

#[test]
fn test_cli_verbose_counts() {
    let cli = Cli::parse_from(["erclient", "-vv", "usage"]);
    assert_eq!(cli.verbose, 2);
}

#[test]
fn test_cli_recent_defaults_to_articles() {
    let cli = Cli::parse_from(["erclient", "recent"]);
    match cli.command {
        Command::Recent {
            feed,
            mins_ago,
            count,
        } => {
            assert_eq!(feed, Feed::Articles);
            assert_eq!(mins_ago, 10);
            assert_eq!(count, 50);
        }
        _ => panic!("Expected Recent command"),
    }
}

#[test]
fn test_cli_entity_aliases() {
    let cli = Cli::parse_from(["erclient", "get", "articles", "8001"]);
    assert!(matches!(
        cli.command,
        Command::Get {
            entity: Entity::Article,
            ..
        }
    ));
}

#[test]
fn test_cli_rejects_bad_date() {
    let result = Cli::try_parse_from(["erclient", "articles", "--date-start", "yesterday"]);
    assert!(result.is_err());
}
