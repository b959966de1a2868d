// Main entry point for the label analysis API server

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use labelcheck::ai::GeminiVision;
use labelcheck::ReferenceSet;
use server_core::{build_app, build_pipeline, Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,labelcheck=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting label analysis API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        search_enrichment = config.search_credentials.is_some(),
        "Configuration loaded"
    );

    // Load reference tables once; shared read-only across requests
    let tables = Arc::new(
        ReferenceSet::load_dir(&config.reference_data_dir)
            .context("Failed to load reference tables")?,
    );

    // Build the pipeline and application
    let vision = GeminiVision::new(config.gemini_api_key.expose());
    let pipeline = Arc::new(build_pipeline(vision, config.search_credentials, tables));
    let app = build_app(pipeline);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/api/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
