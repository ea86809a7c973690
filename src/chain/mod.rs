//! Chain identity analysis of per-token labels

/// Label indexing and first/last occurrence spans
pub mod segmentation;

pub use segmentation::{ChainSegmentation, ChainSpan};
