//! Grocery Product Label Safety Library
//!
//! Given a product page URL from a supported grocery site (or a photo of a
//! product), this library fetches the product's gallery images, reads the
//! ingredient list and nutrition label off them with a multimodal model,
//! cross-references each ingredient against bundled toxicology reference
//! tables, and optionally pulls supporting web search results per
//! ingredient.
//!
//! # Design Philosophy
//!
//! - Capability seams (`VisionModel`, `GalleryScraper`, `WebSearcher`) are
//!   traits; the pipeline never names a concrete provider
//! - The extraction record accumulates additively through the stages and is
//!   serialized exactly once, at the boundary
//! - Absence is typed (`LabelField::Absent`), sentinels exist only in model
//!   prompts and serialized output
//! - Library handles mechanics, app handles transport
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use labelcheck::{ImageSource, Pipeline, PipelineConfig, ReferenceSet, SiteRouter};
//! use labelcheck::ai::GeminiVision;
//! use labelcheck::testing::MockVisionModel;
//! use labelcheck::MockWebSearcher;
//!
//! let tables = Arc::new(ReferenceSet::load_dir("reference-data")?);
//! let pipeline = Pipeline::new(
//!     GeminiVision::from_env()?,
//!     SiteRouter::new(),
//!     MockWebSearcher::new(),
//!     tables,
//!     PipelineConfig::default(),
//! );
//!
//! let source = ImageSource::Url("https://www.blinkit.com/prn/x/prid/12345".into());
//! let record = pipeline.run(&source).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (VisionModel, GalleryScraper, WebSearcher)
//! - [`types`] - Record, image, and config types
//! - [`pipeline`] - The acquisition → extraction → classification → enrichment pipeline
//! - [`acquire`] - Image acquisition (URL galleries and local files)
//! - [`scrapers`] - Per-site gallery scraper implementations
//! - [`reference`] - Toxicology reference table loading and matching
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod acquire;
pub mod error;
pub mod pipeline;
pub mod reference;
pub mod scrapers;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "gemini")]
pub mod ai;

// Re-export core types at crate root
pub use error::{AcquireError, AnalysisError, Result};
pub use traits::{
    gallery::{GalleryScraper, MockGalleryScraper},
    searcher::{GoogleWebSearcher, MockWebSearcher, SearchResult, WebSearcher},
    vision::VisionModel,
};
pub use types::{
    config::PipelineConfig,
    image::ProductImage,
    record::{
        ExtractionRecord, LabelField, INGREDIENTS_ABSENT, NO_CLASSIFICATION, NUTRITION_ABSENT,
    },
};

// Re-export the pipeline and its stage functions
pub use pipeline::{
    analyze, classify, cross_reference, enrich, enrich_record, extract, parse_label_response,
    strip_code_fence, Pipeline, ANALYZE_PRODUCT_PROMPT, EXTRACT_LABEL_PROMPT,
};

// Re-export acquisition
pub use acquire::{acquire, find_profile, ImageFetcher, ImageSource, SiteProfile};

// Re-export scrapers
pub use scrapers::{BlinkitScraper, SiteRouter, ZeptoScraper};

// Re-export reference tables
pub use reference::{ReferenceRow, ReferenceSet, ReferenceTable};

// Re-export security
pub use security::{SearchCredentials, SecretString};

// Re-export testing utilities
pub use testing::{MockVisionModel, VisionCall};
