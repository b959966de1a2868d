//! Extraction invoker — model call, fence stripping, strict parsing.
//!
//! The model commonly wraps its JSON in a markdown code fence. Rather than
//! guessing at partial structure, the decoder strips one optional fence and
//! then parses strictly; anything that still fails is `MalformedModelOutput`
//! with the raw text preserved for diagnostics. No silent retries.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::Result;
use crate::traits::vision::VisionModel;
use crate::types::image::ProductImage;
use crate::types::record::{ExtractionRecord, LabelField};

use super::prompts::EXTRACT_LABEL_PROMPT;

/// Strip a single leading/trailing markdown code fence, with or without a
/// language tag. Content without a fence passes through unchanged.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the language tag line ("json", "JSON", or nothing).
    let body = match rest.split_once('\n') {
        Some((_tag, body)) => body,
        None => rest,
    };

    body.trim().strip_suffix("```").unwrap_or(body).trim()
}

/// Ingredients as the model encodes them: a list, or a sentinel string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawIngredients {
    List(Vec<String>),
    Sentinel(String),
}

/// Nutrition label as the model encodes it: a mapping, or a sentinel string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawNutrition {
    Map(IndexMap<String, String>),
    Sentinel(String),
}

/// The model's response record, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLabelResponse {
    #[serde(default)]
    pub ingredients: Option<RawIngredients>,

    #[serde(rename = "nutritional label", default)]
    pub nutrition: Option<RawNutrition>,
}

/// Parse raw model text into the two label fields.
///
/// - Unparsable JSON → `MalformedModelOutput` carrying the raw text.
/// - A missing field takes its default (empty list / empty map): the
///   sentinel contract already lets the model signal absence, so a missing
///   field is never a hard failure.
/// - Any string where a list/map was expected is the model signaling
///   absence → `LabelField::Absent`.
pub fn parse_label_response(
    raw: &str,
) -> Result<(LabelField<Vec<String>>, LabelField<IndexMap<String, String>>)> {
    let stripped = strip_code_fence(raw);

    let response: RawLabelResponse = serde_json::from_str(stripped)
        .map_err(|e| crate::error::AnalysisError::malformed(e.to_string(), raw))?;

    let ingredients = match response.ingredients {
        Some(RawIngredients::List(items)) => LabelField::Present(items),
        Some(RawIngredients::Sentinel(_)) => LabelField::Absent,
        None => LabelField::Present(Vec::new()),
    };

    let nutrition = match response.nutrition {
        Some(RawNutrition::Map(map)) => LabelField::Present(map),
        Some(RawNutrition::Sentinel(_)) => LabelField::Absent,
        None => LabelField::Present(IndexMap::new()),
    };

    Ok((ingredients, nutrition))
}

/// Run the extraction call and build the initial record.
///
/// An empty image list is a valid request: the model answers with its
/// "not present" sentinels and the result is a well-formed record.
pub async fn extract(
    model: &dyn VisionModel,
    images: &[ProductImage],
) -> Result<ExtractionRecord> {
    let raw = model.generate(EXTRACT_LABEL_PROMPT, images).await?;
    tracing::debug!(response_len = raw.len(), "extraction response received");

    let (ingredients, nutrition) = parse_label_response(&raw)?;

    let mut record = ExtractionRecord::empty();
    record.ingredients = ingredients;
    record.nutrition = nutrition;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    const PLAIN: &str = r#"{"ingredients": ["Water", "Sugar"], "nutritional label": {"Energy": "180 kcal"}}"#;

    #[test]
    fn test_strip_fence_with_language_tag() {
        let fenced = format!("```json\n{}\n```", PLAIN);
        assert_eq!(strip_code_fence(&fenced), PLAIN);
    }

    #[test]
    fn test_strip_fence_without_language_tag() {
        let fenced = format!("```\n{}\n```", PLAIN);
        assert_eq!(strip_code_fence(&fenced), PLAIN);
    }

    #[test]
    fn test_strip_fence_passthrough() {
        assert_eq!(strip_code_fence(PLAIN), PLAIN);
        assert_eq!(strip_code_fence("  \n{}\n "), "{}");
    }

    #[test]
    fn test_fenced_and_unfenced_parse_identically() {
        let fenced = format!("```json\n{}\n```", PLAIN);
        let (plain_ing, plain_nut) = parse_label_response(PLAIN).unwrap();
        let (fenced_ing, fenced_nut) = parse_label_response(&fenced).unwrap();
        assert_eq!(plain_ing, fenced_ing);
        assert_eq!(plain_nut, fenced_nut);
    }

    #[test]
    fn test_sentinel_strings_become_absent() {
        let raw = r#"{"ingredients": "ingredients not present", "nutritional label": "nutritional label not present"}"#;
        let (ingredients, nutrition) = parse_label_response(raw).unwrap();
        assert!(ingredients.is_absent());
        assert!(nutrition.is_absent());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let (ingredients, nutrition) = parse_label_response("{}").unwrap();
        assert_eq!(ingredients, LabelField::Present(Vec::new()));
        assert_eq!(nutrition.as_present().unwrap().len(), 0);
    }

    #[test]
    fn test_unparsable_response_preserves_raw_text() {
        let raw = "Sorry, I cannot read these images.";
        let err = parse_label_response(raw).unwrap_err();
        match err {
            AnalysisError::MalformedModelOutput { raw: kept, .. } => {
                assert_eq!(kept, raw);
            }
            other => panic!("expected MalformedModelOutput, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_zero_images_still_yields_wellformed_record() {
        // The mock's fallback response uses both sentinels, which is exactly
        // what a real model is instructed to answer when it sees nothing.
        let model = crate::testing::MockVisionModel::new();
        let record = extract(&model, &[]).await.unwrap();
        assert!(record.ingredients.is_absent());
        assert!(record.nutrition.is_absent());
    }

    #[test]
    fn test_nutrition_order_is_preserved() {
        let raw = r#"{"ingredients": [], "nutritional label": {"Energy": "180 kcal", "Protein": "2 g", "Sodium": "120 mg"}}"#;
        let (_, nutrition) = parse_label_response(raw).unwrap();
        let keys: Vec<_> = nutrition.as_present().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["Energy", "Protein", "Sodium"]);
    }
}
