//! Gemini implementation of the `VisionModel` trait.
//!
//! A reference implementation backed by the `gemini-client` crate. Images
//! ride along as inline data parts after the instruction text.
//!
//! # Example
//!
//! ```rust,ignore
//! use labelcheck::ai::GeminiVision;
//!
//! let model = GeminiVision::new("AIza...").with_model("gemini-2.0-flash");
//! ```

use async_trait::async_trait;

use gemini_client::{GeminiClient, GeminiError, Part};

use crate::error::{AnalysisError, Result};
use crate::traits::vision::VisionModel;
use crate::types::image::ProductImage;

/// Gemini-backed vision model.
#[derive(Clone)]
pub struct GeminiVision {
    client: GeminiClient,
    model: String,
}

impl GeminiVision {
    /// Create a new Gemini vision model with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: GeminiClient::new(api_key),
            model: "gemini-2.0-flash".to_string(),
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let client = GeminiClient::from_env()
            .map_err(|e| AnalysisError::Config(e.to_string()))?;
        Ok(Self {
            client,
            model: "gemini-2.0-flash".to_string(),
        })
    }

    /// Set the model (default: gemini-2.0-flash).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Wrap an existing client, for callers that configure it themselves.
    pub fn with_client(client: GeminiClient) -> Self {
        Self {
            client,
            model: "gemini-2.0-flash".to_string(),
        }
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl VisionModel for GeminiVision {
    async fn generate(&self, instruction: &str, images: &[ProductImage]) -> Result<String> {
        let mut parts = Vec::with_capacity(1 + images.len());
        parts.push(Part::text(instruction));
        for image in images {
            parts.push(Part::inline_data(&image.mime_type, &image.data));
        }

        self.client
            .generate(&self.model, parts)
            .await
            .map_err(|e: GeminiError| AnalysisError::Model(Box::new(e)))
    }
}
