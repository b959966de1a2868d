//! Core trait abstractions for the label analysis library.
//!
//! These traits define the seams where external capabilities plug in:
//! the multimodal model, site-specific gallery scraping, and web search.

pub mod gallery;
pub mod searcher;
pub mod vision;
