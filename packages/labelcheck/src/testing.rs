//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the labelcheck library
//! without making real model or network calls. Mocks for the scraper and
//! searcher seams live next to their traits; the vision mock lives here
//! because it is the one most tests reach for.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{AnalysisError, Result};
use crate::traits::vision::VisionModel;
use crate::types::image::ProductImage;
use crate::types::record::{INGREDIENTS_ABSENT, NUTRITION_ABSENT};

/// A mock vision model for testing.
///
/// Returns scripted responses in order; once the script runs out (or was
/// never set), falls back to a valid label response with both sentinels so
/// downstream parsing still succeeds.
#[derive(Default)]
pub struct MockVisionModel {
    /// Scripted responses, consumed front to back
    responses: Arc<RwLock<VecDeque<String>>>,

    /// When set, every call fails with this message
    failure: Arc<RwLock<Option<String>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<VisionCall>>>,
}

/// Record of a call made to the mock vision model.
#[derive(Debug, Clone)]
pub struct VisionCall {
    pub instruction: String,
    pub image_count: usize,
}

impl MockVisionModel {
    /// Create a new mock vision model with default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a scripted response.
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.write().unwrap().push_back(response.into());
        self
    }

    /// Make every call fail with the given message.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        *self.failure.write().unwrap() = Some(message.into());
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<VisionCall> {
        self.calls.read().unwrap().clone()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }

    fn default_response() -> String {
        format!(
            r#"{{"ingredients": "{INGREDIENTS_ABSENT}", "nutritional label": "{NUTRITION_ABSENT}"}}"#
        )
    }
}

#[async_trait]
impl VisionModel for MockVisionModel {
    async fn generate(&self, instruction: &str, images: &[ProductImage]) -> Result<String> {
        self.calls.write().unwrap().push(VisionCall {
            instruction: instruction.to_string(),
            image_count: images.len(),
        });

        if let Some(message) = self.failure.read().unwrap().clone() {
            return Err(AnalysisError::Model(message.into()));
        }

        Ok(self
            .responses
            .write()
            .unwrap()
            .pop_front()
            .unwrap_or_else(Self::default_response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_responses_consumed_in_order() {
        let model = MockVisionModel::new()
            .with_response("first")
            .with_response("second");

        assert_eq!(model.generate("go", &[]).await.unwrap(), "first");
        assert_eq!(model.generate("go", &[]).await.unwrap(), "second");

        let calls = model.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].instruction, "go");
        assert_eq!(calls[0].image_count, 0);
    }

    #[tokio::test]
    async fn test_default_response_parses_as_label() {
        let model = MockVisionModel::new();
        let raw = model.generate("extract", &[]).await.unwrap();

        let (ingredients, nutrition) =
            crate::pipeline::parse_label_response(&raw).unwrap();
        assert!(ingredients.is_absent());
        assert!(nutrition.is_absent());
    }

    #[tokio::test]
    async fn test_failure_mode() {
        let model = MockVisionModel::new().with_failure("quota exceeded");
        let err = model.generate("go", &[]).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Model(_)));
    }
}
