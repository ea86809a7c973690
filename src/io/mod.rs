//! Input/output operations and error handling

/// Command-line parsing and the per-model driver
pub mod cli;
/// Fixed layout and naming constants
pub mod configuration;
/// Error types and path context
pub mod error;
/// PNG export of rendered figures
pub mod image;
/// Artifact discovery and JSON decoding
pub mod loader;
/// Progress display across models
pub mod progress;
