//! Application setup and router configuration.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use labelcheck::ai::GeminiVision;
use labelcheck::{
    GoogleWebSearcher, Pipeline, PipelineConfig, ReferenceSet, Result, SearchCredentials,
    SearchResult, SiteRouter, WebSearcher,
};

use crate::routes::{analyze_handler, health_handler};

/// The searcher the server runs with. Enrichment is driven by whether
/// Custom Search credentials were configured; `Disabled` exists so the
/// pipeline type stays concrete when they weren't.
pub enum Searcher {
    Google(GoogleWebSearcher),
    Disabled,
}

#[async_trait]
impl WebSearcher for Searcher {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        match self {
            Self::Google(searcher) => searcher.search(query, limit).await,
            Self::Disabled => Ok(Vec::new()),
        }
    }
}

/// The concrete pipeline this server runs.
pub type AppPipeline = Pipeline<GeminiVision, SiteRouter, Searcher>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AppPipeline>,
}

/// Assemble the pipeline from its production implementations.
pub fn build_pipeline(
    vision: GeminiVision,
    search_credentials: Option<SearchCredentials>,
    tables: Arc<ReferenceSet>,
) -> AppPipeline {
    let config = PipelineConfig::default().with_search_enrichment(search_credentials.is_some());
    let searcher = match search_credentials {
        Some(credentials) => Searcher::Google(GoogleWebSearcher::new(credentials)),
        None => Searcher::Disabled,
    };

    Pipeline::new(vision, SiteRouter::new(), searcher, tables, config)
}

/// Build the Axum application router.
pub fn build_app(pipeline: Arc<AppPipeline>) -> Router {
    let state = AppState { pipeline };

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/analyze", post(analyze_handler))
        // Gallery fetches plus two model round-trips can be slow.
        .layer(TimeoutLayer::new(Duration::from_secs(180)))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
