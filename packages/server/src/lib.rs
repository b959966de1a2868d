//! HTTP front end for the labelcheck pipeline.
//!
//! Thin by intent: transport, configuration, and the response envelope live
//! here; everything about products, labels, and safety lives in `labelcheck`.

pub mod app;
pub mod config;
pub mod routes;

pub use app::{build_app, build_pipeline, AppPipeline, AppState, Searcher};
pub use config::Config;
