//! The analysis pipeline — the core of the library.
//!
//! Stage order is fixed: acquisition → extraction → safety cross-reference →
//! search enrichment → (optional) narrative analysis. Each stage's output is
//! the next stage's input; the record accumulates fields additively and is
//! never restructured.

pub mod analyze;
pub mod classify;
pub mod enrich;
pub mod extract;
pub mod prompts;

pub use analyze::analyze;
pub use classify::{classify, cross_reference};
pub use enrich::{enrich, enrich_record};
pub use extract::{extract, parse_label_response, strip_code_fence, RawLabelResponse};
pub use prompts::{ANALYZE_PRODUCT_PROMPT, EXTRACT_LABEL_PROMPT};

use std::sync::Arc;

use tracing::info;

use crate::acquire::{acquire, ImageFetcher, ImageSource};
use crate::error::{AnalysisError, Result};
use crate::reference::ReferenceSet;
use crate::traits::{gallery::GalleryScraper, searcher::WebSearcher, vision::VisionModel};
use crate::types::config::PipelineConfig;
use crate::types::record::ExtractionRecord;

/// One configured pipeline instance.
///
/// Capabilities are injected at construction; the reference tables are
/// shared read-only across all concurrent requests. One `run` call serves
/// one source, on the calling task.
pub struct Pipeline<V, G, S> {
    vision: V,
    gallery: G,
    searcher: S,
    tables: Arc<ReferenceSet>,
    fetcher: ImageFetcher,
    config: PipelineConfig,
}

impl<V, G, S> Pipeline<V, G, S>
where
    V: VisionModel,
    G: GalleryScraper,
    S: WebSearcher,
{
    /// Create a pipeline from its capabilities and shared tables.
    pub fn new(
        vision: V,
        gallery: G,
        searcher: S,
        tables: Arc<ReferenceSet>,
        config: PipelineConfig,
    ) -> Self {
        let fetcher = ImageFetcher::new(config.image_fetch_timeout_secs);
        Self {
            vision,
            gallery,
            searcher,
            tables,
            fetcher,
            config,
        }
    }

    /// Run acquisition through enrichment, producing the finished record.
    ///
    /// Policy: an empty acquired-image set aborts with `AcquisitionFailure`
    /// before any model call — a request with nothing to read is a request
    /// failure, not a sentinel-filled success.
    pub async fn run(&self, source: &ImageSource) -> Result<ExtractionRecord> {
        let images = acquire(source, &self.gallery, &self.fetcher, self.config.max_images).await?;
        if images.is_empty() {
            return Err(AnalysisError::AcquisitionFailure {
                origin: source.describe(),
            });
        }
        info!(images = images.len(), source = %source.describe(), "images acquired");

        let mut record = extract::extract(&self.vision, &images).await?;
        drop(images);

        cross_reference(&mut record, &self.tables);
        info!(
            ingredients = record.ingredient_names().len(),
            "safety cross-reference complete"
        );

        if self.config.enrich_with_search {
            enrich_record(
                &mut record,
                &self.searcher,
                self.config.search_results_per_ingredient,
            )
            .await;
        }

        Ok(record)
    }

    /// Generate the narrative analysis for a finished record.
    pub async fn analyze(&self, record: &ExtractionRecord) -> Result<String> {
        analyze::analyze(&self.vision, record).await
    }

    /// Convenience: run the pipeline and the analysis step in sequence.
    pub async fn run_with_analysis(
        &self,
        source: &ImageSource,
    ) -> Result<(ExtractionRecord, String)> {
        let record = self.run(source).await?;
        let narrative = self.analyze(&record).await?;
        Ok((record, narrative))
    }
}
