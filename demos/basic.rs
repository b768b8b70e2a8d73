//! Basic example demonstrating the Event Registry client.
//!
//! Run with:
//! ```
//! EVENT_REGISTRY_API_KEY=your-key cargo run --example basic
//! ```

use eventregistry::{
    get_event_articles, Article, Event, EventRegistry, Filtered, Get, List, QueryArticles,
    QueryEvents, RecentArticles,
};

#[tokio::main]
async fn main() -> eventregistry::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Event Registry client...");
    let er = EventRegistry::from_env()?;
    println!("Connected to: {}", er.base_url());

    let usage = er.usage_info().await?;
    println!("Tokens left: {}", usage.remaining_tokens());

    // Resolve a concept before searching with it
    println!("\n--- Resolving Concept ---");
    let Some(concept_uri) = er.concept_uri("Tesla", "eng").await? else {
        println!("No concept found for 'Tesla'");
        return Ok(());
    };
    println!("Concept: {concept_uri}");

    // First page of matching articles
    println!("\n--- Searching Articles (first page) ---");
    let query = QueryArticles::new()
        .with_concept_uri(concept_uri.as_str())
        .with_lang("eng");
    let articles = Article::list_page(&er, &query, 1, 10).await?;
    println!(
        "Found {} articles (total: {:?})",
        articles.len(),
        articles.total
    );
    for article in &articles {
        println!(
            "  - {} [{}]",
            article.title.as_deref().unwrap_or("untitled"),
            article.source_title().unwrap_or("unknown source")
        );
    }

    // Events about the same concept
    println!("\n--- Searching Events ---");
    let events = Event::list_page(
        &er,
        &QueryEvents::new().with_concept_uri(concept_uri.as_str()),
        1,
        5,
    )
    .await?;

    if let Some(first) = events.items.first() {
        println!("\n--- Event Details ---");
        let event = Event::get(&er, first.uri.clone()).await?;
        println!("Event: {}", event.display_title());
        println!("  Date: {}", event.event_date.as_deref().unwrap_or("unknown"));
        println!("  Articles: {:?}", event.total_article_count);

        let reporting = get_event_articles(&er, &event.uri, Some(20)).await?;
        println!("\nFirst {} reporting articles:", reporting.len());
        for article in reporting.iter().take(5) {
            println!("  - {}", article.title.as_deref().unwrap_or("untitled"));
        }
    }

    // One poll of the recent-activity feed
    println!("\n--- Recent Articles ---");
    let mut feed = RecentArticles::new()
        .with_max_article_count(20)
        .updates_after_mins_ago(5);
    let recent = feed.get_updates(&er).await?;
    println!("{} articles added in the last 5 minutes", recent.len());

    println!("\nDone!");
    Ok(())
}
