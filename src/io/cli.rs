//! Command-line interface and the per-model figure driver

use crate::chain::ChainSegmentation;
use crate::io::configuration::MODEL_COUNT;
use crate::io::error::Result;
use crate::io::image::save_figure;
use crate::io::loader::{ArtifactPaths, ConfidenceBundle, ModelArtifacts};
use crate::io::progress::ProgressManager;
use crate::render::PaeFigure;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

/// Exit status for a missing or malformed command line
pub const USAGE_EXIT_CODE: u8 = 1;

#[derive(Parser, Debug)]
#[command(name = "paeviz")]
#[command(
    author,
    version,
    about = "Render predicted aligned error heatmaps for every model of a prediction"
)]
/// Command-line arguments for the figure tool
pub struct Cli {
    /// Prediction directory holding the full-data and summary-confidence JSON files
    #[arg(value_name = "PREDICTION_DIR")]
    pub target: PathBuf,
}

/// Renders and saves the figure of every model in one prediction directory
///
/// Models are handled strictly in order and each one is loaded only when its
/// turn comes, so figures already written survive a later failure.
pub struct FigureProcessor {
    paths: ArtifactPaths,
    progress: ProgressManager,
}

impl FigureProcessor {
    /// Create a processor for the directory named on the command line
    pub fn new(cli: Cli) -> Self {
        Self {
            paths: ArtifactPaths::new(cli.target),
            progress: ProgressManager::new(MODEL_COUNT),
        }
    }

    /// Replace the progress display, e.g. with [`ProgressManager::hidden`]
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressManager) -> Self {
        self.progress = progress;
        self
    }

    /// Render every model, returning the written figure paths
    ///
    /// # Errors
    ///
    /// Returns the first error of any model; later models are not attempted
    pub fn process(&self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(MODEL_COUNT);
        log::info!(
            "rendering {MODEL_COUNT} models of '{}' in {}",
            self.paths.name(),
            self.paths.directory().display()
        );

        for model in 0..MODEL_COUNT {
            match self.process_model(model) {
                Ok(path) => written.push(path),
                Err(err) => {
                    log::info!(
                        "stopping after {} of {MODEL_COUNT} figures",
                        self.progress.completed()
                    );
                    self.progress.abandon();
                    return Err(err);
                }
            }
        }

        self.progress.finish();
        Ok(written)
    }

    /// Load, segment, render and save a single model
    ///
    /// # Errors
    ///
    /// Returns an error if either artifact cannot be loaded, the data cannot
    /// be drawn or the figure cannot be written
    pub fn process_model(&self, model: usize) -> Result<PathBuf> {
        let start_time = Instant::now();
        let output_path = self.paths.figure(model);
        self.progress.start_model(
            model,
            &output_path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy(),
        );

        let artifacts = ModelArtifacts::load(&self.paths, model)?;
        log_confidence(artifacts.model, &artifacts.confidence);

        let prediction = &artifacts.prediction;
        if let Some(mismatch) = prediction.length_mismatch() {
            log::warn!("model {model}: token arrays disagree ({mismatch})");
        }

        let chains = ChainSegmentation::from_labels(&prediction.token_chain_ids);
        let interleaved = chains.interleaved_labels();
        if !interleaved.is_empty() {
            log::warn!(
                "model {model}: chains {} are not contiguous; their boundaries span other chains",
                interleaved.join(", ")
            );
        }

        let pae = prediction.pae_matrix(model)?;
        let figure = PaeFigure::new(model, &pae, &chains)?;
        save_figure(&figure.render()?, &output_path)?;

        self.progress.complete_model();
        log::info!(
            "model {model}: wrote {} ({} tokens, {} chains) in {:.2?}",
            output_path.display(),
            chains.token_count(),
            chains.len(),
            start_time.elapsed()
        );

        Ok(output_path)
    }
}

fn log_confidence(model: usize, confidence: &ConfidenceBundle) {
    let show = |value: Option<f64>| value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.3}"));
    log::debug!(
        "model {model}: ptm {} iptm {} ranking score {}",
        show(confidence.ptm),
        show(confidence.iptm),
        show(confidence.ranking_score)
    );
}
