//! Environment-driven server configuration.

use anyhow::{Context, Result};

use labelcheck::{SearchCredentials, SecretString};

/// Server configuration, loaded once at startup.
pub struct Config {
    /// Gemini API key (required).
    pub gemini_api_key: SecretString,

    /// Google Custom Search credentials; enrichment stays off without them.
    pub search_credentials: Option<SearchCredentials>,

    /// Directory holding the four reference table JSON files.
    pub reference_data_dir: String,

    /// Listen port.
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required: `GEMINI_API_KEY`. Optional: `GOOGLE_CUSTOM_SEARCH_API_KEY` +
    /// `GOOGLE_CUSTOM_SEARCH_ENGINE_ID` (both or neither), `REFERENCE_DATA_DIR`,
    /// `PORT`.
    pub fn from_env() -> Result<Self> {
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .context("GEMINI_API_KEY must be set")?
            .into();

        let search_credentials = match (
            std::env::var("GOOGLE_CUSTOM_SEARCH_API_KEY").ok(),
            std::env::var("GOOGLE_CUSTOM_SEARCH_ENGINE_ID").ok(),
        ) {
            (Some(key), Some(engine_id)) => Some(SearchCredentials::new(key, engine_id)),
            (None, None) => None,
            _ => anyhow::bail!(
                "GOOGLE_CUSTOM_SEARCH_API_KEY and GOOGLE_CUSTOM_SEARCH_ENGINE_ID must be set together"
            ),
        };

        let reference_data_dir = std::env::var("REFERENCE_DATA_DIR")
            .unwrap_or_else(|_| "packages/labelcheck/reference-data".to_string());

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().context("PORT must be a valid port number")?,
            Err(_) => 8000,
        };

        Ok(Self {
            gemini_api_key,
            search_credentials,
            reference_data_dir,
            port,
        })
    }
}
