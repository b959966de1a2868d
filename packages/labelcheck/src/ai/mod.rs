//! Vision model implementations for the labelcheck library.
//!
//! This module provides reference implementations of the `VisionModel` trait.
//! Users can use these directly or implement their own.

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::GeminiVision;
