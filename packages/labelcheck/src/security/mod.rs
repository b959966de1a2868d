//! Credential handling.

pub mod credentials;

pub use credentials::{SearchCredentials, SecretString};
