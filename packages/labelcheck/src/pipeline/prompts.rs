//! Fixed model instructions for the pipeline.
//!
//! The field names and sentinel strings here are a contract with the model;
//! the parser in `extract.rs` and the record serializer both key off them.

/// Instruction for the label-extraction call.
///
/// The model must answer with a JSON object carrying an `ingredients` field
/// and a `nutritional label` field, using the literal sentinels when a field
/// cannot be read from the supplied images.
pub const EXTRACT_LABEL_PROMPT: &str = r#"You are reading photographs of a packaged grocery product.

Extract exactly two things from the images:
1. The ingredients list, as printed, one ingredient per entry, in label order.
2. The nutritional label, as printed, one entry per nutrient row. Keep the
   value text verbatim including units (e.g. "10.5 g", "180 kcal").

Respond with ONLY a JSON object of this shape:
{
    "ingredients": ["ingredient 1", "ingredient 2", ...],
    "nutritional label": {"Nutrient name": "value as printed", ...}
}

If no ingredients list is visible in any image, use the exact string
"ingredients not present" as the value of "ingredients".
If no nutritional label is visible in any image, use the exact string
"nutritional label not present" as the value of "nutritional label".
Do not guess, infer, or add fields."#;

/// Instruction prefix for the health-analysis call over the finished record.
pub const ANALYZE_PRODUCT_PROMPT: &str = r#"You are a food safety analyst. You will receive a structured record for one
packaged grocery product: its extracted ingredients, nutritional label,
safety classifications from regulatory reference databases (FDA SCOGS, IARC,
California Prop 65, EFSA), and optional web search context.

Write a concise health analysis of this product:
- Flag any ingredient with a concerning classification and say what the
  classification means in plain language.
- Comment on the nutritional profile (sugar, sodium, saturated fat) where
  the label provides it.
- End with a one-sentence overall take.

Base every statement on the record; do not invent data that is not in it."#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record::{INGREDIENTS_ABSENT, NUTRITION_ABSENT};

    #[test]
    fn test_extract_prompt_names_the_sentinels() {
        // The prompt and the parser must agree on the exact sentinel text.
        assert!(EXTRACT_LABEL_PROMPT.contains(INGREDIENTS_ABSENT));
        assert!(EXTRACT_LABEL_PROMPT.contains(NUTRITION_ABSENT));
    }

    #[test]
    fn test_extract_prompt_names_both_fields() {
        assert!(EXTRACT_LABEL_PROMPT.contains("\"ingredients\""));
        assert!(EXTRACT_LABEL_PROMPT.contains("\"nutritional label\""));
    }
}
