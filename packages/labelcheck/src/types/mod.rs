//! Data types for the label analysis library.

pub mod config;
pub mod image;
pub mod record;
