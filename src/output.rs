//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Article, Concept, Event, Mention};

/// Longest body excerpt shown for an article.
const EXCERPT_CHARS: usize = 280;

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn excerpt(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= EXCERPT_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(EXCERPT_CHARS).collect();
    format!("{}...", cut.trim_end())
}

impl PrettyPrint for Article {
    fn pretty_print(&self) -> String {
        let header = format!("Article: {}", self.uri);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];

        if let Some(ref title) = self.title {
            lines.push(format!("Title:          {}", title));
        }
        if let Some(source) = self.source_title() {
            lines.push(format!("Source:         {}", source));
        }
        match (&self.date, &self.time) {
            (Some(date), Some(time)) => lines.push(format!("Published:      {} {}", date, time)),
            (Some(date), None) => lines.push(format!("Published:      {}", date)),
            _ => {}
        }
        if let Some(ref lang) = self.lang {
            lines.push(format!("Language:       {}", lang));
        }
        if let Some(ref url) = self.url {
            lines.push(format!("URL:            {}", url));
        }
        if let Some(sentiment) = self.sentiment {
            lines.push(format!("Sentiment:      {:+.2}", sentiment));
        }
        if self.has_event() {
            lines.push(format!(
                "Event:          {}",
                self.event_uri.as_deref().unwrap_or_default()
            ));
        }
        if self.is_duplicate {
            lines.push("Duplicate:      yes".to_string());
        }
        if !self.concepts.is_empty() {
            let labels: Vec<&str> =
                self.concepts.iter().take(5).map(|c| c.display_label()).collect();
            lines.push(format!("Concepts:       {}", labels.join(", ")));
        }
        if let Some(ref body) = self.body {
            if !body.is_empty() {
                lines.push(String::new());
                lines.push(excerpt(body));
            }
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Event {
    fn pretty_print(&self) -> String {
        let header = format!("Event: {}", self.uri);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Title:          {}", self.display_title()),
        ];

        if let Some(ref date) = self.event_date {
            lines.push(format!("Date:           {}", date));
        }
        if let Some(count) = self.total_article_count {
            lines.push(format!("Articles:       {}", count));
        }
        if let Some(place) = self.location.as_ref().and_then(|l| l.label.best()) {
            lines.push(format!("Location:       {}", place));
        }
        if let Some(sentiment) = self.sentiment {
            lines.push(format!("Sentiment:      {:+.2}", sentiment));
        }
        if !self.categories.is_empty() {
            let uris: Vec<&str> = self.categories.iter().take(3).map(|c| c.uri.as_str()).collect();
            lines.push(format!("Categories:     {}", uris.join(", ")));
        }
        if let Some(summary) = self.summary.best() {
            lines.push(String::new());
            lines.push(excerpt(summary));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Mention {
    fn pretty_print(&self) -> String {
        let header = format!("Mention: {}", self.uri);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];

        if let Some(label) = self.event_type.as_ref().and_then(|e| e.label.best()) {
            lines.push(format!("Event Type:     {}", label));
        }
        if let Some(ref level) = self.fact_level {
            lines.push(format!("Fact Level:     {}", level));
        }
        if let Some(ref date) = self.date {
            lines.push(format!("Date:           {}", date));
        }
        if let Some(ref uri) = self.article_uri {
            lines.push(format!("Article:        {}", uri));
        }
        lines.push(String::new());
        lines.push(self.sentence.trim().to_string());

        lines.join("\n")
    }
}

impl PrettyPrint for Concept {
    fn pretty_print(&self) -> String {
        let header = format!("Concept: {}", self.display_label());
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider, format!("URI:            {}", self.uri)];

        if let Some(ref concept_type) = self.concept_type {
            lines.push(format!("Type:           {}", concept_type));
        }
        if let Some(score) = self.score {
            lines.push(format!("Score:          {}", score));
        }
        if let Some(ref description) = self.description {
            lines.push(String::new());
            lines.push(excerpt(description));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_pretty_print_format() {
        let article: Article = serde_json::from_value(serde_json::json!({
            "uri": "8001",
            "title": "Rates rise again",
            "date": "2024-04-02",
            "time": "08:00:00",
            "source": {"uri": "example.com", "title": "Example Times"},
            "body": "The central bank raised rates."
        }))
        .unwrap();

        let output = article.pretty_print();
        assert!(output.starts_with("Article: 8001"));
        assert!(output.contains("Title:          Rates rise again"));
        assert!(output.contains("Source:         Example Times"));
        assert!(output.contains("Published:      2024-04-02 08:00:00"));
        assert!(output.ends_with("The central bank raised rates."));
    }

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        let long = "é".repeat(400);
        let out = excerpt(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), EXCERPT_CHARS + 3);
    }

    #[test]
    fn test_event_without_optional_fields() {
        let event: Event = serde_json::from_value(serde_json::json!({"uri": "eng-1"})).unwrap();
        let output = event.pretty_print();
        assert!(output.starts_with("Event: eng-1"));
        assert!(!output.contains("Articles:"));
    }
}
