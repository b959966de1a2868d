//! Supplementary search enricher.
//!
//! Best-effort by contract: a failed query degrades that ingredient to an
//! empty result list. Nothing here ever propagates past the boundary.

use futures::future::join_all;
use indexmap::IndexMap;
use tracing::warn;

use crate::traits::searcher::{SearchResult, WebSearcher};
use crate::types::record::ExtractionRecord;

/// Query the searcher once per ingredient, concurrently.
pub async fn enrich(
    ingredients: &[String],
    searcher: &dyn WebSearcher,
    results_per_ingredient: usize,
) -> IndexMap<String, Vec<SearchResult>> {
    let lookups = ingredients.iter().map(|name| async move {
        let query = format!("{} food additive safety", name);
        let results = match searcher.search(&query, results_per_ingredient).await {
            Ok(results) => results,
            Err(e) => {
                warn!(ingredient = %name, error = %e, "search enrichment degraded");
                Vec::new()
            }
        };
        (name.clone(), results)
    });

    join_all(lookups).await.into_iter().collect()
}

/// Enrich the record in place from its extracted ingredients.
pub async fn enrich_record(
    record: &mut ExtractionRecord,
    searcher: &dyn WebSearcher,
    results_per_ingredient: usize,
) {
    let names = record.ingredient_names().to_vec();
    record.search_results = enrich(&names, searcher, results_per_ingredient).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::searcher::MockWebSearcher;

    #[tokio::test]
    async fn test_every_ingredient_gets_an_entry() {
        let searcher = MockWebSearcher::new().with_results(
            "Aspartame food additive safety",
            vec![SearchResult::new("https://a.example.com").with_snippet("sweetener study")],
        );

        let ingredients = vec!["Aspartame".to_string(), "Water".to_string()];
        let enriched = enrich(&ingredients, &searcher, 2).await;

        assert_eq!(enriched.len(), 2);
        assert_eq!(enriched.get("Aspartame").unwrap().len(), 1);
        assert!(enriched.get("Water").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failures_degrade_to_empty_not_error() {
        let searcher = MockWebSearcher::new()
            .with_failure("Aspartame food additive safety")
            .with_results(
                "Water food additive safety",
                vec![SearchResult::new("https://w.example.com")],
            );

        let ingredients = vec!["Aspartame".to_string(), "Water".to_string()];
        let enriched = enrich(&ingredients, &searcher, 2).await;

        // The failing ingredient is present but empty; the batch survives.
        assert!(enriched.get("Aspartame").unwrap().is_empty());
        assert_eq!(enriched.get("Water").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_order_follows_ingredient_order() {
        let searcher = MockWebSearcher::new();
        let ingredients = vec!["C".to_string(), "A".to_string(), "B".to_string()];
        let enriched = enrich(&ingredients, &searcher, 2).await;
        let keys: Vec<_> = enriched.keys().cloned().collect();
        assert_eq!(keys, vec!["C", "A", "B"]);
    }
}
