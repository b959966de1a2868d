//! Analysis invoker — narrative health summary over the finished record.
//!
//! The record is read-only here; the model's free text is returned verbatim.

use crate::error::Result;
use crate::traits::vision::VisionModel;
use crate::types::record::ExtractionRecord;

use super::prompts::ANALYZE_PRODUCT_PROMPT;

/// Generate the health-analysis narrative for a finished record.
pub async fn analyze(model: &dyn VisionModel, record: &ExtractionRecord) -> Result<String> {
    let serialized = serde_json::to_string_pretty(record)
        .map_err(|e| crate::error::AnalysisError::Model(Box::new(e)))?;

    let prompt = format!(
        "{}\n\nAnalyze this product data:\n{}",
        ANALYZE_PRODUCT_PROMPT, serialized
    );

    model.complete(&prompt).await
}
