//! Pure Gemini REST API client
//!
//! A clean, minimal client for Google's Generative Language API with no
//! domain-specific logic. Supports multimodal `generateContent` calls with
//! text and inline image parts.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{GeminiClient, Part};
//!
//! let client = GeminiClient::from_env()?;
//!
//! // Text-only generation
//! let text = client.generate_text("gemini-1.5-pro", "Hello!").await?;
//!
//! // Multimodal generation
//! let parts = vec![
//!     Part::text("Describe this label"),
//!     Part::inline_data("image/jpeg", &jpeg_bytes),
//! ];
//! let text = client.generate("gemini-1.5-pro", parts).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, Part,
};

use reqwest::Client;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".to_string()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies or mock servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom HTTP client (timeouts, proxies).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    /// Single-turn generation from a list of parts. Returns the text of the
    /// first candidate.
    pub async fn generate(&self, model: &str, parts: Vec<Part>) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content::from_parts(parts)],
            generation_config: None,
        };
        self.generate_content(model, request).await
    }

    /// Text-only convenience wrapper around [`generate`](Self::generate).
    pub async fn generate_text(&self, model: &str, prompt: &str) -> Result<String> {
        self.generate(model, vec![Part::text(prompt)]).await
    }

    /// Full-control generateContent call.
    pub async fn generate_content(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        debug!(model = %model, parts = request.contents.len(), "Gemini generateContent request");

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        parsed.first_text().ok_or(GeminiError::EmptyResponse)
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_api_key() {
        let client = GeminiClient::new("secret-key-123");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret-key-123"));
        assert!(debug.contains("[REDACTED]"));
    }
}
