//! Tests for command-line parsing and the per-model figure driver

#[cfg(test)]
mod tests {
    use clap::Parser;
    use paeviz::PaeError;
    use paeviz::io::cli::{Cli, FigureProcessor, USAGE_EXIT_CODE};
    use paeviz::io::loader::ArtifactPaths;
    use paeviz::io::progress::ProgressManager;
    use serde_json::json;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::process::Command;
    use tempfile::TempDir;

    fn prediction_dir(root: &TempDir) -> PathBuf {
        let dir = root.path().join("fold_test");
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_model(dir: &Path, model: usize, pae: &serde_json::Value) {
        let paths = ArtifactPaths::new(dir);
        let full = json!({
            "token_chain_ids": ["A", "A", "A", "B", "B", "B"],
            "token_res_ids": [1, 2, 3, 1, 2, 3],
            "pae": pae
        });
        fs::write(paths.full_data(model), full.to_string()).unwrap();
        let summary = json!({ "ptm": 0.8, "iptm": 0.7, "ranking_score": 0.75 });
        fs::write(paths.summary_confidences(model), summary.to_string()).unwrap();
    }

    fn square(value: f64) -> serde_json::Value {
        json!(vec![vec![value; 6]; 6])
    }

    fn quiet_processor(dir: &Path) -> FigureProcessor {
        let cli = Cli::parse_from(["paeviz", dir.to_str().unwrap()]);
        FigureProcessor::new(cli).with_progress(ProgressManager::hidden(5))
    }

    // Tests CLI parsing with the single positional directory
    // Verified by renaming the positional argument
    #[test]
    fn test_cli_parse_directory() {
        let cli = Cli::parse_from(["paeviz", "fold_abc"]);
        assert_eq!(cli.target, PathBuf::from("fold_abc"));
    }

    // Tests a missing directory argument is a usage error
    // Verified by making the target optional
    #[test]
    fn test_cli_missing_argument() {
        let result = Cli::try_parse_from(["paeviz"]);
        assert!(result.is_err_and(|err| err.use_stderr()));
    }

    // Tests the binary prints usage and exits with status 1 without arguments
    // Verified by returning clap's default exit code
    #[test]
    fn test_binary_missing_argument_exit_code() {
        let output = Command::new(env!("CARGO_BIN_EXE_paeviz"))
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(i32::from(USAGE_EXIT_CODE)));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Usage"));
    }

    // Tests help output is printed and is not treated as a failure
    // Verified by exiting with the usage code for every parse error
    #[test]
    fn test_binary_help_exit_code() {
        let output = Command::new(env!("CARGO_BIN_EXE_paeviz"))
            .arg("--help")
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(0));
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("PREDICTION_DIR"));
    }

    // Tests every model of a complete directory gets a figure
    // Verified by stopping after the first model
    #[test]
    fn test_process_all_models() {
        let root = TempDir::new().unwrap();
        let dir = prediction_dir(&root);
        for model in 0..5 {
            write_model(&dir, model, &square(model as f64 * 5.0));
        }

        let processor = quiet_processor(&dir);
        let written = processor.process().unwrap();

        assert_eq!(written.len(), 5);
        for model in 0..5 {
            let path = dir.join(format!("figure_pae_{model}.png"));
            assert!(path.exists(), "missing {}", path.display());
            let figure = image::open(&path).unwrap();
            assert!(figure.width() > 930);
        }
    }

    // Tests a missing file on model 1 keeps model 0 and stops the run
    // Verified by loading all models before rendering
    #[test]
    fn test_partial_failure_keeps_earlier_figures() {
        let root = TempDir::new().unwrap();
        let dir = prediction_dir(&root);
        for model in 0..5 {
            write_model(&dir, model, &square(1.0));
        }
        fs::remove_file(ArtifactPaths::new(&dir).summary_confidences(1)).unwrap();

        let processor = quiet_processor(&dir);
        let result = processor.process();

        assert!(matches!(result, Err(PaeError::FileSystem { .. })));
        assert!(dir.join("figure_pae_0.png").exists());
        for model in 1..5 {
            assert!(!dir.join(format!("figure_pae_{model}.png")).exists());
        }
    }

    // Tests a document without the pae key aborts with a schema error
    // Verified by skipping models that fail to decode
    #[test]
    fn test_missing_key_aborts() {
        let root = TempDir::new().unwrap();
        let dir = prediction_dir(&root);
        for model in 0..5 {
            write_model(&dir, model, &square(2.0));
        }
        let paths = ArtifactPaths::new(&dir);
        let no_pae = json!({ "token_chain_ids": ["A"], "token_res_ids": [1] });
        fs::write(paths.full_data(0), no_pae.to_string()).unwrap();

        let result = quiet_processor(&dir).process();

        assert!(matches!(result, Err(PaeError::JsonSchema { .. })));
        assert!(!dir.join("figure_pae_0.png").exists());
    }

    // Tests existing figures are overwritten
    // Verified by skipping models whose figure exists
    #[test]
    fn test_existing_figure_overwritten() {
        let root = TempDir::new().unwrap();
        let dir = prediction_dir(&root);
        for model in 0..5 {
            write_model(&dir, model, &square(0.0));
        }
        let stale = dir.join("figure_pae_0.png");
        fs::write(&stale, b"stale").unwrap();

        quiet_processor(&dir).process().unwrap();

        assert!(image::open(&stale).is_ok());
    }

    // Tests a single model can be processed on its own
    // Verified by writing the figure under the wrong index
    #[test]
    fn test_process_single_model() {
        let root = TempDir::new().unwrap();
        let dir = prediction_dir(&root);
        write_model(&dir, 3, &square(12.0));

        let processor = quiet_processor(&dir);
        let path = processor.process_model(3).unwrap();

        assert_eq!(path, ArtifactPaths::new(&dir).figure(3));
        assert!(path.exists());
    }
}
