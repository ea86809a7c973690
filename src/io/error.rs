//! Error types and path context for loading, rendering and exporting figures

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all figure generation operations
#[derive(Debug)]
pub enum PaeError {
    /// A file could not be opened, read or created
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A JSON artifact is not well-formed JSON
    JsonSyntax {
        /// Path to the artifact
        path: PathBuf,
        /// Underlying decoder error
        source: serde_json::Error,
    },

    /// A JSON artifact is well-formed but lacks a key or has a mistyped value
    JsonSchema {
        /// Path to the artifact
        path: PathBuf,
        /// Underlying decoder error
        source: serde_json::Error,
    },

    /// Prediction data decoded but cannot be drawn
    InvalidPrediction {
        /// Model index the data belongs to
        model: usize,
        /// Description of what's wrong with the data
        reason: String,
    },

    /// The figure could not be rasterized
    Render {
        /// Description of the drawing failure
        reason: String,
    },

    /// Failed to save a rendered figure to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },
}

impl fmt::Display for PaeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::JsonSyntax { path, source } => {
                write!(f, "Malformed JSON in '{}': {source}", path.display())
            }
            Self::JsonSchema { path, source } => {
                write!(f, "Unexpected content in '{}': {source}", path.display())
            }
            Self::InvalidPrediction { model, reason } => {
                write!(f, "Cannot draw model {model}: {reason}")
            }
            Self::Render { reason } => write!(f, "Failed to draw figure: {reason}"),
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export figure to '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for PaeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            Self::JsonSyntax { source, .. } | Self::JsonSchema { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::InvalidPrediction { .. } | Self::Render { .. } => None,
        }
    }
}

/// Convenience type alias for crate results
pub type Result<T> = std::result::Result<T, PaeError>;

impl PaeError {
    /// Classify a JSON decoding failure for the artifact at `path`
    ///
    /// Data errors (missing field, wrong type) become [`PaeError::JsonSchema`],
    /// I/O errors surfaced by the reader become [`PaeError::FileSystem`] and
    /// everything else is a syntax problem.
    pub fn from_json(path: &Path, source: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match source.classify() {
            Category::Data => Self::JsonSchema {
                path: path.to_path_buf(),
                source,
            },
            Category::Io => Self::FileSystem {
                path: path.to_path_buf(),
                operation: "read",
                source: source.into(),
            },
            Category::Syntax | Category::Eof => Self::JsonSyntax {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Attaches the offending path to I/O failures
pub trait WithPath<T> {
    /// Convert the error into [`PaeError::FileSystem`] naming `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| PaeError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

/// Create an invalid prediction error
pub fn invalid_prediction(model: usize, reason: &impl ToString) -> PaeError {
    PaeError::InvalidPrediction {
        model,
        reason: reason.to_string(),
    }
}
