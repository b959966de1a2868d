//! Safety cross-referencer — ingredient lookups across the reference tables.
//!
//! Pure functions over the read-only `ReferenceSet`; safe to call
//! concurrently across distinct ingredients against the same shared tables.

use indexmap::IndexMap;

use crate::reference::ReferenceSet;
use crate::types::record::{ExtractionRecord, NO_CLASSIFICATION};

/// Look one ingredient up across all four tables.
///
/// Per table: case-insensitive substring match on the substance column, or
/// exact match of the registry (CAS) number where one is supplied. The first
/// matching row per table is authoritative; a table with no match emits
/// nothing. When every table misses, the result is the single-element
/// [`NO_CLASSIFICATION`] sentinel — callers distinguish it by string
/// identity.
pub fn classify(
    ingredient_name: &str,
    registry_number: Option<&str>,
    tables: &ReferenceSet,
) -> Vec<String> {
    let classifications: Vec<String> = tables
        .tables()
        .iter()
        .filter_map(|table| {
            table
                .find_match(ingredient_name, registry_number)
                .map(|row| format!("{}: {}", table.label, row.verdict))
        })
        .collect();

    if classifications.is_empty() {
        vec![NO_CLASSIFICATION.to_string()]
    } else {
        classifications
    }
}

/// Cross-reference every extracted ingredient, writing the
/// `safety_classifications` field in place.
///
/// Upholds the record invariant: the classification keys equal the
/// extracted ingredient list exactly — an ingredient with no match still
/// gets its sentinel entry, never a silent omission. Registry numbers are
/// not available from image-derived data, so name matching is the sole
/// signal here.
pub fn cross_reference(record: &mut ExtractionRecord, tables: &ReferenceSet) {
    let mut classifications = IndexMap::new();
    for name in record.ingredient_names() {
        classifications.insert(name.clone(), classify(name, None, tables));
    }
    record.safety_classifications = classifications;

    debug_assert!(record.classifications_consistent());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{ReferenceRow, ReferenceTable};
    use crate::types::record::LabelField;

    fn table(name: &str, label: &str, rows: &[(&str, &str)]) -> ReferenceTable {
        ReferenceTable::new(
            name,
            label,
            rows.iter()
                .map(|(substance, verdict)| ReferenceRow {
                    substance: substance.to_string(),
                    cas_number: None,
                    verdict: verdict.to_string(),
                })
                .collect(),
        )
    }

    fn test_tables() -> ReferenceSet {
        ReferenceSet::new(vec![
            table(
                "scogs",
                "FDA SCOGS Status",
                &[("aspartame", "Reviewed, no safety concern")],
            ),
            table("iarc", "IARC Group", &[]),
            table("prop65", "California Prop 65", &[]),
            table("efsa", "EFSA Conclusion", &[]),
        ])
    }

    #[test]
    fn test_case_permuted_lookup_yields_table_verdict() {
        let tables = test_tables();
        for name in ["aspartame", "Aspartame", "ASPARTAME", "aSpArTaMe"] {
            let result = classify(name, None, &tables);
            assert_eq!(
                result,
                vec!["FDA SCOGS Status: Reviewed, no safety concern".to_string()],
                "failed for {name}"
            );
        }
    }

    #[test]
    fn test_absent_everywhere_yields_exact_sentinel() {
        let tables = test_tables();
        let result = classify("Water", None, &tables);
        assert_eq!(result, vec![NO_CLASSIFICATION.to_string()]);
    }

    #[test]
    fn test_multiple_table_hits_accumulate_in_table_order() {
        let tables = ReferenceSet::new(vec![
            table("scogs", "FDA SCOGS Status", &[("aspartame", "Reviewed, no safety concern")]),
            table("iarc", "IARC Group", &[("aspartame", "Group 2B (possibly carcinogenic to humans)")]),
            table("prop65", "California Prop 65", &[]),
            table("efsa", "EFSA Conclusion", &[]),
        ]);

        let result = classify("aspartame", None, &tables);
        assert_eq!(
            result,
            vec![
                "FDA SCOGS Status: Reviewed, no safety concern".to_string(),
                "IARC Group: Group 2B (possibly carcinogenic to humans)".to_string(),
            ]
        );
    }

    #[test]
    fn test_cross_reference_keys_match_ingredients_exactly() {
        let tables = test_tables();
        let mut record = ExtractionRecord::empty();
        record.ingredients = LabelField::Present(vec![
            "Aspartame".to_string(),
            "Water".to_string(),
        ]);

        cross_reference(&mut record, &tables);

        assert!(record.classifications_consistent());
        assert_eq!(
            record.safety_classifications.get("Aspartame").unwrap(),
            &vec!["FDA SCOGS Status: Reviewed, no safety concern".to_string()]
        );
        assert_eq!(
            record.safety_classifications.get("Water").unwrap(),
            &vec![NO_CLASSIFICATION.to_string()]
        );
    }

    #[test]
    fn test_cross_reference_tolerates_repeated_ingredient_names() {
        let tables = test_tables();
        let mut record = ExtractionRecord::empty();
        record.ingredients = LabelField::Present(vec![
            "Sugar".to_string(),
            "Aspartame".to_string(),
            "Sugar".to_string(),
        ]);

        cross_reference(&mut record, &tables);

        // The repeated name collapses to one keyed entry.
        assert_eq!(record.safety_classifications.len(), 2);
        assert!(record.classifications_consistent());
        assert_eq!(
            record.safety_classifications.get("Sugar").unwrap(),
            &vec![NO_CLASSIFICATION.to_string()]
        );
    }

    #[test]
    fn test_cross_reference_with_absent_ingredients_is_empty() {
        let tables = test_tables();
        let mut record = ExtractionRecord::empty();

        cross_reference(&mut record, &tables);

        assert!(record.safety_classifications.is_empty());
        assert!(record.classifications_consistent());
    }

    #[test]
    fn test_registry_number_reaches_tables() {
        let tables = ReferenceSet::new(vec![ReferenceTable::new(
            "scogs",
            "FDA SCOGS Status",
            vec![ReferenceRow {
                substance: "aspartame".to_string(),
                cas_number: Some("22839-47-0".to_string()),
                verdict: "Reviewed, no safety concern".to_string(),
            }],
        )]);

        // Name misses, CAS hits.
        let result = classify("additive E951", Some("22839-47-0"), &tables);
        assert_eq!(
            result,
            vec!["FDA SCOGS Status: Reviewed, no safety concern".to_string()]
        );
    }
}
