//! Web searcher trait for supplementary ingredient lookups.
//!
//! The enricher issues one query per ingredient and attaches whatever
//! snippets come back. This trait abstracts over search providers
//! (Google Custom Search, Tavily, etc.); failures are the caller's to
//! absorb — the enricher degrades every failure to "no results".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{AnalysisError, Result};
use crate::security::SearchCredentials;

/// One search hit: title, link, snippet as the provider returned them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result page title.
    pub title: Option<String>,

    /// Result URL.
    pub link: String,

    /// Snippet/description text.
    pub snippet: Option<String>,
}

impl SearchResult {
    /// Create a result from a link.
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            title: None,
            link: link.into(),
            snippet: None,
        }
    }

    /// Add a title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a snippet.
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }
}

/// External web search capability.
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Search the web, returning up to `limit` result snippets.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>>;
}

/// Mock web searcher for testing.
#[derive(Default)]
pub struct MockWebSearcher {
    results: RwLock<HashMap<String, Vec<SearchResult>>>,
    failing_queries: RwLock<Vec<String>>,
}

impl MockWebSearcher {
    /// Create a new mock searcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script results for a query.
    pub fn with_results(self, query: &str, results: Vec<SearchResult>) -> Self {
        self.results
            .write()
            .unwrap()
            .insert(query.to_string(), results);
        self
    }

    /// Make a query fail, for testing degradation paths.
    pub fn with_failure(self, query: &str) -> Self {
        self.failing_queries.write().unwrap().push(query.to_string());
        self
    }
}

#[async_trait]
impl WebSearcher for MockWebSearcher {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        if self.failing_queries.read().unwrap().iter().any(|q| q == query) {
            return Err(AnalysisError::Search("mock quota exceeded".into()));
        }
        let mut results = self
            .results
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default();
        results.truncate(limit);
        Ok(results)
    }
}

/// Google Custom Search-backed searcher.
pub struct GoogleWebSearcher {
    credentials: SearchCredentials,
    client: reqwest::Client,
}

impl GoogleWebSearcher {
    /// Create a new searcher from credentials.
    pub fn new(credentials: SearchCredentials) -> Self {
        Self {
            credentials,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl WebSearcher for GoogleWebSearcher {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        #[derive(Deserialize)]
        struct Response {
            #[serde(default)]
            items: Vec<Item>,
        }

        #[derive(Deserialize)]
        struct Item {
            title: Option<String>,
            link: String,
            snippet: Option<String>,
        }

        let response = self
            .client
            .get("https://www.googleapis.com/customsearch/v1")
            .query(&[
                ("key", self.credentials.api_key.expose()),
                ("cx", &self.credentials.engine_id),
                ("q", query),
                ("num", &limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AnalysisError::Search(Box::new(e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AnalysisError::Search(
                format!("Custom Search API error: {}", status).into(),
            ));
        }

        let parsed: Response = response
            .json()
            .await
            .map_err(|e| AnalysisError::Search(Box::new(e)))?;

        Ok(parsed
            .items
            .into_iter()
            .map(|item| {
                let mut result = SearchResult::new(item.link);
                if let Some(title) = item.title {
                    result = result.with_title(title);
                }
                if let Some(snippet) = item.snippet {
                    result = result.with_snippet(snippet);
                }
                result
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_searcher_scripted_results() {
        let searcher = MockWebSearcher::new().with_results(
            "aspartame safety",
            vec![
                SearchResult::new("https://a.example.com").with_snippet("snippet a"),
                SearchResult::new("https://b.example.com").with_snippet("snippet b"),
            ],
        );

        let results = searcher.search("aspartame safety", 10).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].link, "https://a.example.com");
    }

    #[tokio::test]
    async fn test_mock_searcher_respects_limit() {
        let searcher = MockWebSearcher::new().with_results(
            "q",
            vec![
                SearchResult::new("https://a.example.com"),
                SearchResult::new("https://b.example.com"),
                SearchResult::new("https://c.example.com"),
            ],
        );

        let results = searcher.search("q", 1).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_searcher_scripted_failure() {
        let searcher = MockWebSearcher::new().with_failure("bad query");
        assert!(searcher.search("bad query", 2).await.is_err());
    }
}
