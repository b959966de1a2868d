//! HTTP route handlers.

pub mod analyze;
pub mod health;

pub use analyze::analyze_handler;
pub use health::health_handler;
