//! Vision model trait — the multimodal generation capability.
//!
//! The model is opaque to the pipeline: instruction text plus zero or more
//! images in, free-form text out. Implementations wrap specific providers
//! (Gemini, OpenAI, etc.) and nothing else; prompt content and response
//! parsing live in the pipeline, not here.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::image::ProductImage;

/// Multimodal generation capability.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Generate text from an instruction plus images, order preserved.
    ///
    /// An empty image list is a valid request: the model is expected to
    /// answer with its "not present" sentinels, not to fail locally.
    async fn generate(&self, instruction: &str, images: &[ProductImage]) -> Result<String>;

    /// Text-only generation (used by the analysis step over the finished
    /// structured record).
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.generate(prompt, &[]).await
    }
}
