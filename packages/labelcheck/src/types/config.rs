//! Configuration for the analysis pipeline.

/// Configuration for one pipeline instance.
///
/// Constructed once at process start and passed into the pipeline; there is
/// no ambient global client state.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum gallery images to fetch per product.
    ///
    /// Galleries on grocery sites occasionally repeat frames; this bounds
    /// both fetch fan-out and model payload size. Default: 10.
    pub max_images: usize,

    /// Search results requested per ingredient during enrichment.
    /// Default: 2.
    pub search_results_per_ingredient: usize,

    /// Whether to run search enrichment at all.
    ///
    /// Off by default in tests; the server turns it on when credentials
    /// are configured.
    pub enrich_with_search: bool,

    /// Per-image HTTP fetch timeout in seconds. Default: 30.
    pub image_fetch_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_images: 10,
            search_results_per_ingredient: 2,
            enrich_with_search: false,
            image_fetch_timeout_secs: 30,
        }
    }
}

impl PipelineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-product image cap.
    pub fn with_max_images(mut self, max: usize) -> Self {
        self.max_images = max;
        self
    }

    /// Enable or disable search enrichment.
    pub fn with_search_enrichment(mut self, enabled: bool) -> Self {
        self.enrich_with_search = enabled;
        self
    }

    /// Set search results per ingredient.
    pub fn with_search_results(mut self, per_ingredient: usize) -> Self {
        self.search_results_per_ingredient = per_ingredient;
        self
    }
}
