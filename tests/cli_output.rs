//! Tests for CLI output formatting.
//!
//! - JSON output with --json flag
//! - Pretty-print output as default

use eventregistry::{Article, Concept, Event, Mention, PrettyPrint};

// ============================================================================
// JSON Output Tests
// ============================================================================

#[test]
fn test_json_output_is_valid_json() {
    let article = make_test_article();
    let json_output = serde_json::to_string_pretty(&article).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert!(parsed.is_object());
    assert_eq!(parsed["title"], "Storm hits coast");
}

#[test]
fn test_json_output_uses_api_field_names() {
    let article = make_test_article();
    let parsed = serde_json::to_value(&article).unwrap();

    assert_eq!(parsed["eventUri"], "eng-1");
    assert_eq!(parsed["isDuplicate"], false);
}

#[test]
fn test_json_for_list_outputs_array() {
    let articles = vec![make_test_article(), make_test_article()];
    let json_output = serde_json::to_string_pretty(&articles).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}

// ============================================================================
// Pretty-Print Tests
// ============================================================================

#[test]
fn test_article_pretty_print_includes_key_fields() {
    let output = make_test_article().pretty_print();

    assert!(output.starts_with("Article: 7001"));
    assert!(output.contains("Title:          Storm hits coast"));
    assert!(output.contains("Source:         Coast News"));
    assert!(output.contains("Event:          eng-1"));
    assert!(output.contains("Concepts:       Florida"));
    assert!(!output.contains("Duplicate:"));
}

#[test]
fn test_event_pretty_print() {
    let event: Event = serde_json::from_value(serde_json::json!({
        "uri": "eng-1",
        "title": {"eng": "Storm hits coast", "deu": "Sturm trifft Küste"},
        "summary": {"eng": "A storm made landfall."},
        "eventDate": "2024-09-10",
        "totalArticleCount": 152,
        "categories": [{"uri": "news/Environment", "label": "news/Environment"}]
    }))
    .unwrap();

    let output = event.pretty_print();
    assert!(output.contains("Title:          Storm hits coast"));
    assert!(output.contains("Date:           2024-09-10"));
    assert!(output.contains("Articles:       152"));
    assert!(output.contains("Categories:     news/Environment"));
    assert!(output.ends_with("A storm made landfall."));
}

#[test]
fn test_mention_pretty_print_ends_with_sentence() {
    let mention: Mention = serde_json::from_value(serde_json::json!({
        "uri": "m-1",
        "sentence": "  The company acquired its rival.  ",
        "eventType": {"uri": "et/acquisition", "label": {"eng": "Acquisition"}},
        "factLevel": "fact"
    }))
    .unwrap();

    let output = mention.pretty_print();
    assert!(output.contains("Event Type:     Acquisition"));
    assert!(output.contains("Fact Level:     fact"));
    assert!(output.ends_with("The company acquired its rival."));
}

#[test]
fn test_concept_pretty_print_falls_back_to_uri() {
    let concept: Concept = serde_json::from_value(serde_json::json!({
        "uri": "http://en.wikipedia.org/wiki/Tesla,_Inc.",
        "type": "org"
    }))
    .unwrap();

    let output = concept.pretty_print();
    assert!(output.starts_with("Concept: http://en.wikipedia.org/wiki/Tesla,_Inc."));
    assert!(output.contains("Type:           org"));
}

// ============================================================================
// Test Helpers
// ============================================================================

fn make_test_article() -> Article {
    serde_json::from_value(serde_json::json!({
        "uri": "7001",
        "lang": "eng",
        "isDuplicate": false,
        "date": "2024-09-10",
        "time": "14:05:00",
        "url": "https://coastnews.example/storm",
        "title": "Storm hits coast",
        "body": "A powerful storm made landfall on Tuesday.",
        "source": {"uri": "coastnews.example", "title": "Coast News"},
        "eventUri": "eng-1",
        "concepts": [
            {"uri": "http://en.wikipedia.org/wiki/Florida", "type": "loc", "label": {"eng": "Florida"}}
        ]
    }))
    .unwrap()
}
