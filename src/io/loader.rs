//! Artifact discovery and JSON decoding for predicted models
//!
//! A prediction directory `<dir>` holds, per model `i`, the documents
//! `<name>_full_data_<i>.json` and `<name>_summary_confidences_<i>.json`,
//! where `<name>` is the last component of `<dir>`.

use crate::io::configuration::{FIGURE_PREFIX, FULL_DATA_INFIX, SUMMARY_CONFIDENCES_INFIX};
use crate::io::error::{PaeError, Result, WithPath, invalid_prediction};
use ndarray::Array2;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Per-token data and the PAE matrix of one predicted model
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionBundle {
    /// Chain label of every token
    pub token_chain_ids: Vec<String>,
    /// Residue number of every token, parallel to `token_chain_ids`
    pub token_res_ids: Vec<i64>,
    /// Predicted aligned error in Å, one row per token
    pub pae: Vec<Vec<f64>>,
}

impl PredictionBundle {
    /// Number of tokens described by the chain labels
    pub const fn token_count(&self) -> usize {
        self.token_chain_ids.len()
    }

    /// Copy the PAE rows into a dense matrix
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix has no cells or its rows differ in length
    pub fn pae_matrix(&self, model: usize) -> Result<Array2<f64>> {
        let rows = self.pae.len();
        let cols = self.pae.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(invalid_prediction(model, &"PAE matrix is empty"));
        }

        if let Some((row, values)) = self
            .pae
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != cols)
        {
            return Err(invalid_prediction(
                model,
                &format!(
                    "PAE row {row} has {} values, expected {cols}",
                    values.len()
                ),
            ));
        }

        let flat: Vec<f64> = self.pae.iter().flatten().copied().collect();
        Array2::from_shape_vec((rows, cols), flat)
            .map_err(|e| invalid_prediction(model, &format!("PAE matrix shape: {e}")))
    }

    /// Describe any disagreement between token arrays and matrix size
    pub fn length_mismatch(&self) -> Option<String> {
        let tokens = self.token_count();
        let residues = self.token_res_ids.len();
        let rows = self.pae.len();
        (tokens != residues || tokens != rows).then(|| {
            format!("{tokens} chain labels, {residues} residue numbers, {rows} PAE rows")
        })
    }
}

/// Summary confidence scalars of one predicted model
///
/// Decoded so that a broken document is still reported, but not drawn.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfidenceBundle {
    /// Predicted TM-score
    pub ptm: Option<f64>,
    /// Interface predicted TM-score
    pub iptm: Option<f64>,
    /// Score used to rank the models
    pub ranking_score: Option<f64>,
    /// Fraction of the structure predicted as disordered
    pub fraction_disordered: Option<f64>,
    /// Whether the structure has steric clashes (0 or 1 in pipeline output)
    pub has_clash: Option<f64>,
    /// Number of recycles used for the prediction
    pub num_recycles: Option<f64>,
    /// Per-chain predicted TM-score
    pub chain_ptm: Option<Vec<f64>>,
    /// Per-chain interface predicted TM-score
    pub chain_iptm: Option<Vec<Option<f64>>>,
    /// Pairwise chain interface predicted TM-score
    pub chain_pair_iptm: Option<Vec<Vec<Option<f64>>>>,
    /// Pairwise minimum PAE between chains
    pub chain_pair_pae_min: Option<Vec<Vec<Option<f64>>>>,
}

/// Conventional artifact and figure locations inside a prediction directory
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    directory: PathBuf,
    name: String,
}

impl ArtifactPaths {
    /// Derive artifact names from the last component of `directory`
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        let directory = directory.into();
        let name = directory.file_name().map_or_else(
            || directory.to_string_lossy().into_owned(),
            |name| name.to_string_lossy().into_owned(),
        );
        Self { directory, name }
    }

    /// Prediction directory all paths are rooted at
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Prediction name used as the artifact file prefix
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full-data document of `model`
    pub fn full_data(&self, model: usize) -> PathBuf {
        self.directory
            .join(format!("{}{FULL_DATA_INFIX}{model}.json", self.name))
    }

    /// Summary-confidence document of `model`
    pub fn summary_confidences(&self, model: usize) -> PathBuf {
        self.directory
            .join(format!("{}{SUMMARY_CONFIDENCES_INFIX}{model}.json", self.name))
    }

    /// Figure written for `model`
    pub fn figure(&self, model: usize) -> PathBuf {
        self.directory.join(format!("{FIGURE_PREFIX}{model}.png"))
    }
}

/// Both documents of one model
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    /// Model index
    pub model: usize,
    /// Per-token data and PAE matrix
    pub prediction: PredictionBundle,
    /// Summary confidence scalars
    pub confidence: ConfidenceBundle,
}

impl ModelArtifacts {
    /// Load the full-data and summary-confidence documents of `model`
    ///
    /// # Errors
    ///
    /// Returns an error if either document is missing, unreadable, malformed
    /// or lacks a required key
    pub fn load(paths: &ArtifactPaths, model: usize) -> Result<Self> {
        let prediction = load_prediction(&paths.full_data(model))?;
        let confidence = load_confidence(&paths.summary_confidences(model))?;
        Ok(Self {
            model,
            prediction,
            confidence,
        })
    }
}

/// Decode a full-data document
///
/// # Errors
///
/// Returns an error if the file cannot be opened, is not valid JSON or lacks
/// `token_chain_ids`, `token_res_ids` or `pae`
pub fn load_prediction(path: &Path) -> Result<PredictionBundle> {
    read_json(path)
}

/// Decode a summary-confidence document
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not valid JSON
pub fn load_confidence(path: &Path) -> Result<ConfidenceBundle> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_path(path, "open")?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| PaeError::from_json(path, e))
}
