//! Predicted aligned error heatmaps for structure prediction output
//!
//! Reads the full-data and summary-confidence JSON artifacts of every
//! predicted model in a directory, segments the per-token chain labels and
//! writes one annotated heatmap PNG per model.

#![forbid(unsafe_code)]

/// Chain segmentation of per-token labels
pub mod chain;
/// Input/output operations and error handling
pub mod io;
/// Figure layout and rasterization
pub mod render;

pub use io::error::{PaeError, Result};
