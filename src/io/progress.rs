//! Progress display across the models of one prediction

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static MODEL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Models: [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar advanced once per rendered figure
///
/// The bar draws to stderr and stays hidden when stderr is not a terminal.
pub struct ProgressManager {
    bar: ProgressBar,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ProgressManager {
    /// Create a progress bar for `model_count` models
    pub fn new(model_count: usize) -> Self {
        let bar = ProgressBar::new(model_count as u64);
        bar.set_style(MODEL_STYLE.clone());
        Self { bar }
    }

    /// Progress bar with no draw target, for library use and tests
    pub fn hidden(model_count: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(model_count as u64);
        Self { bar }
    }

    /// Show which file is being processed
    pub fn start_model(&self, model: usize, figure_name: &str) {
        self.bar.set_message(format!("model {model} -> {figure_name}"));
    }

    /// Count a finished figure
    pub fn complete_model(&self) {
        self.bar.inc(1);
    }

    /// Number of figures finished so far
    pub fn completed(&self) -> u64 {
        self.bar.position()
    }

    /// Close the bar after all figures are written
    pub fn finish(&self) {
        self.bar.finish_with_message("all figures written");
    }

    /// Close the bar leaving the failed model visible
    pub fn abandon(&self) {
        self.bar.abandon();
    }
}
