//! Text analytics served from the analytics host.
//!
//! These calls work on text supplied by the caller rather than on the news
//! archive; the responses are returned as parsed JSON.

use serde_json::Value;

use crate::client::EventRegistry;
use crate::error::{EventRegistryError, Result};
use crate::query::{Params, QueryParams, SimilarityMethod, Taxonomy};

/// Client for the analytics endpoints.
#[derive(Debug, Clone)]
pub struct Analytics {
    client: EventRegistry,
}

fn check_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(EventRegistryError::invalid("text to analyze is empty"));
    }
    Ok(())
}

impl Analytics {
    pub fn new(client: EventRegistry) -> Self {
        Self { client }
    }

    async fn request(&self, path: &str, params: QueryParams) -> Result<Value> {
        self.client.json_request_analytics(path, params.into_params()).await
    }

    /// Annotate `text` with the concepts it mentions (semantic annotation
    /// and entity linking). `extra` is merged into the request.
    #[tracing::instrument(skip(self, text, extra))]
    pub async fn annotate(
        &self,
        text: &str,
        lang: Option<&str>,
        extra: Option<Params>,
    ) -> Result<Value> {
        check_text(text)?;
        let mut params = QueryParams::new();
        params.set_val("text", text);
        params.set_opt("lang", lang);
        if let Some(extra) = extra {
            params.extend(extra);
        }
        self.request("api/v1/annotate", params).await
    }

    /// Assign categories from `taxonomy` to `text`.
    #[tracing::instrument(skip(self, text))]
    pub async fn categorize(&self, text: &str, taxonomy: Taxonomy) -> Result<Value> {
        check_text(text)?;
        let mut params = QueryParams::new();
        params.set_val("text", text);
        params.set_val("taxonomy", taxonomy);
        self.request("api/v1/categorize", params).await
    }

    /// Sentiment of `text`, analyzing at most `sentences` sentences.
    #[tracing::instrument(skip(self, text))]
    pub async fn sentiment(
        &self,
        text: &str,
        sentences: u32,
        return_sentences: bool,
    ) -> Result<Value> {
        check_text(text)?;
        let mut params = QueryParams::new();
        params.set_val("text", text);
        params.set_val("method", "vocabulary");
        params.set_val("sentences", sentences);
        params.set_val("returnSentences", return_sentences);
        self.request("api/v1/sentiment", params).await
    }

    /// Semantic similarity of two documents.
    #[tracing::instrument(skip(self, text1, text2))]
    pub async fn semantic_similarity(
        &self,
        text1: &str,
        text2: &str,
        method: SimilarityMethod,
        lang: &str,
    ) -> Result<Value> {
        check_text(text1)?;
        check_text(text2)?;
        let mut params = QueryParams::new();
        params.set_val("text1", text1);
        params.set_val("text2", text2);
        params.set_val("method", method);
        params.set_val("lang", lang);
        self.request("api/v1/semanticSimilarity", params).await
    }

    /// Title, body, date and other details of the article at `url`.
    #[tracing::instrument(skip(self))]
    pub async fn extract_article_info(&self, url: &str) -> Result<Value> {
        let url = url::Url::parse(url)?;
        let mut params = QueryParams::new();
        params.set_val("url", url.as_str());
        self.request("api/v1/extractArticleInfo", params).await
    }

    /// Languages `text` is written in.
    #[tracing::instrument(skip(self, text))]
    pub async fn detect_language(&self, text: &str) -> Result<Value> {
        check_text(text)?;
        let mut params = QueryParams::new();
        params.set_val("text", text);
        self.request("api/v1/detectLanguage", params).await
    }

    /// Named entities in `text`.
    #[tracing::instrument(skip(self, text))]
    pub async fn ner(&self, text: &str) -> Result<Value> {
        check_text(text)?;
        let mut params = QueryParams::new();
        params.set_val("text", text);
        self.request("api/v1/ner", params).await
    }
}
