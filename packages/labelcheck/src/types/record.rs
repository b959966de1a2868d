//! The structured record accumulated by the pipeline.
//!
//! Absence is a tagged variant internally ([`LabelField::Absent`]), never a
//! magic string. The literal sentinel strings exist only at two boundaries
//! where the contract is fixed externally: the model's response encoding and
//! the serialized HTTP payload.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::traits::searcher::SearchResult;

/// Sentinel the model emits when no ingredients list is readable.
pub const INGREDIENTS_ABSENT: &str = "ingredients not present";

/// Sentinel the model emits when no nutrition label is readable.
pub const NUTRITION_ABSENT: &str = "nutritional label not present";

/// Sentinel classification when every reference table comes up empty.
///
/// Callers distinguish this from real classifications by string identity.
pub const NO_CLASSIFICATION: &str = "No safety classification found in reference databases";

/// A label field that may be intentionally absent from the product images.
///
/// Distinct from an unset field: `Absent` means the model looked and the
/// label genuinely wasn't there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelField<T> {
    Present(T),
    Absent,
}

impl<T> LabelField<T> {
    /// Borrow the value if present.
    pub fn as_present(&self) -> Option<&T> {
        match self {
            Self::Present(v) => Some(v),
            Self::Absent => None,
        }
    }

    /// True when the field was marked absent on the label.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl<T: Serialize> LabelField<T> {
    fn serialize_or_sentinel<S: Serializer>(&self, sentinel: &str, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(v) => v.serialize(s),
            Self::Absent => s.serialize_str(sentinel),
        }
    }
}

fn ingredients_field<S: Serializer>(
    field: &LabelField<Vec<String>>,
    s: S,
) -> Result<S::Ok, S::Error> {
    field.serialize_or_sentinel(INGREDIENTS_ABSENT, s)
}

fn nutrition_field<S: Serializer>(
    field: &LabelField<IndexMap<String, String>>,
    s: S,
) -> Result<S::Ok, S::Error> {
    field.serialize_or_sentinel(NUTRITION_ABSENT, s)
}

/// Canonical structured output of the pipeline.
///
/// Created by the extraction invoker; the cross-referencer and search
/// enricher each add one field in place; read-only from then on.
/// Single-owner, one request's task only.
///
/// Invariant: `safety_classifications` keys equal the extracted ingredient
/// names exactly. Every extracted ingredient gets a lookup, even when the
/// answer is the [`NO_CLASSIFICATION`] placeholder.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionRecord {
    /// Ingredient names in label order, as literally extracted.
    #[serde(serialize_with = "ingredients_field")]
    pub ingredients: LabelField<Vec<String>>,

    /// Nutrient label → value text, units retained as written.
    ///
    /// No numeric coercion: source labels are too inconsistent for it.
    #[serde(rename = "nutritional label", serialize_with = "nutrition_field")]
    pub nutrition: LabelField<IndexMap<String, String>>,

    /// Ingredient name → classification strings, each naming its source
    /// table (e.g. "FDA SCOGS Status: ...", "IARC Group: ...").
    pub safety_classifications: IndexMap<String, Vec<String>>,

    /// Ingredient name → raw search snippets (best-effort).
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub search_results: IndexMap<String, Vec<SearchResult>>,
}

impl ExtractionRecord {
    /// A record with both label fields absent and no lookups yet.
    pub fn empty() -> Self {
        Self {
            ingredients: LabelField::Absent,
            nutrition: LabelField::Absent,
            safety_classifications: IndexMap::new(),
            search_results: IndexMap::new(),
        }
    }

    /// The extracted ingredient names, empty when the field is absent.
    pub fn ingredient_names(&self) -> &[String] {
        self.ingredients
            .as_present()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Check the keys invariant between ingredients and classifications.
    ///
    /// Labels legitimately repeat names (e.g. sugar inside a sub-list), and
    /// the classification map keys each name once, so the comparison is
    /// set-wise: every extracted name has an entry, and no entry exists for
    /// a name that was never extracted.
    pub fn classifications_consistent(&self) -> bool {
        let names = self.ingredient_names();
        names
            .iter()
            .all(|n| self.safety_classifications.contains_key(n))
            && self
                .safety_classifications
                .keys()
                .all(|k| names.contains(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_serialize_to_sentinels() {
        let record = ExtractionRecord::empty();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["ingredients"], INGREDIENTS_ABSENT);
        assert_eq!(json["nutritional label"], NUTRITION_ABSENT);
    }

    #[test]
    fn test_present_fields_serialize_structurally() {
        let mut record = ExtractionRecord::empty();
        record.ingredients = LabelField::Present(vec!["Water".to_string()]);
        let mut nutrition = IndexMap::new();
        nutrition.insert("Energy".to_string(), "180 kcal".to_string());
        record.nutrition = LabelField::Present(nutrition);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["ingredients"][0], "Water");
        assert_eq!(json["nutritional label"]["Energy"], "180 kcal");
    }

    #[test]
    fn test_consistency_check() {
        let mut record = ExtractionRecord::empty();
        record.ingredients = LabelField::Present(vec!["Water".to_string(), "Salt".to_string()]);
        assert!(!record.classifications_consistent());

        record
            .safety_classifications
            .insert("Water".to_string(), vec![NO_CLASSIFICATION.to_string()]);
        record
            .safety_classifications
            .insert("Salt".to_string(), vec![NO_CLASSIFICATION.to_string()]);
        assert!(record.classifications_consistent());
    }

    #[test]
    fn test_repeated_ingredient_names_stay_consistent() {
        let mut record = ExtractionRecord::empty();
        record.ingredients = LabelField::Present(vec![
            "Sugar".to_string(),
            "Cocoa Solids".to_string(),
            "Sugar".to_string(),
        ]);
        record
            .safety_classifications
            .insert("Sugar".to_string(), vec![NO_CLASSIFICATION.to_string()]);
        record.safety_classifications.insert(
            "Cocoa Solids".to_string(),
            vec![NO_CLASSIFICATION.to_string()],
        );

        // Two distinct names, three entries on the label: still consistent.
        assert!(record.classifications_consistent());
    }

    #[test]
    fn test_stray_classification_key_is_inconsistent() {
        let mut record = ExtractionRecord::empty();
        record.ingredients = LabelField::Present(vec!["Water".to_string()]);
        record
            .safety_classifications
            .insert("Water".to_string(), vec![NO_CLASSIFICATION.to_string()]);
        record
            .safety_classifications
            .insert("Salt".to_string(), vec![NO_CLASSIFICATION.to_string()]);

        assert!(!record.classifications_consistent());
    }

    #[test]
    fn test_absent_ingredients_are_consistent_when_no_lookups() {
        let record = ExtractionRecord::empty();
        assert!(record.classifications_consistent());
    }
}
