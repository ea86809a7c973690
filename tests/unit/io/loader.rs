//! Tests for artifact naming, JSON decoding and PAE matrix conversion

#[cfg(test)]
mod tests {
    use paeviz::PaeError;
    use paeviz::io::loader::{
        ArtifactPaths, ModelArtifacts, PredictionBundle, load_confidence, load_prediction,
    };
    use serde_json::json;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_json(path: &Path, value: &serde_json::Value) {
        fs::write(path, value.to_string()).unwrap();
    }

    fn bundle(labels: &[&str], pae: Vec<Vec<f64>>) -> PredictionBundle {
        PredictionBundle {
            token_chain_ids: labels.iter().map(|label| (*label).to_string()).collect(),
            token_res_ids: (1..=labels.len() as i64).collect(),
            pae,
        }
    }

    // Tests artifact paths follow the directory naming convention
    // Verified by using the full directory path as the prefix
    #[test]
    fn test_artifact_paths() {
        let paths = ArtifactPaths::new("runs/fold_abc");

        assert_eq!(paths.name(), "fold_abc");
        assert_eq!(paths.directory(), Path::new("runs/fold_abc"));
        assert_eq!(
            paths.full_data(2),
            PathBuf::from("runs/fold_abc/fold_abc_full_data_2.json")
        );
        assert_eq!(
            paths.summary_confidences(4),
            PathBuf::from("runs/fold_abc/fold_abc_summary_confidences_4.json")
        );
        assert_eq!(
            paths.figure(0),
            PathBuf::from("runs/fold_abc/figure_pae_0.png")
        );
    }

    // Tests a bare directory name is its own prefix
    // Verified by stripping the name to its parent
    #[test]
    fn test_artifact_paths_bare_name() {
        let paths = ArtifactPaths::new("fold_x");

        assert_eq!(
            paths.full_data(0),
            PathBuf::from("fold_x/fold_x_full_data_0.json")
        );
    }

    // Tests a complete full-data document decodes and extra keys are ignored
    // Verified by denying unknown fields
    #[test]
    fn test_load_prediction() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("full.json");
        write_json(
            &path,
            &json!({
                "atom_chain_ids": ["A", "A", "B"],
                "atom_plddts": [90.0, 91.0, 70.0],
                "contact_probs": [[1.0, 0.5], [0.5, 1.0]],
                "token_chain_ids": ["A", "B"],
                "token_res_ids": [1, 1],
                "pae": [[0.5, 8.0], [7.5, 0.25]]
            }),
        );

        let prediction = load_prediction(&path).unwrap();
        assert_eq!(prediction.token_chain_ids, vec!["A", "B"]);
        assert_eq!(prediction.token_res_ids, vec![1, 1]);
        assert_eq!(prediction.token_count(), 2);

        let matrix = prediction.pae_matrix(0).unwrap();
        assert_eq!(matrix.dim(), (2, 2));
        assert_eq!(matrix[(1, 0)], 7.5);
    }

    // Tests a missing file is a file system error naming the path
    // Verified by mapping open failures to syntax errors
    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");

        match load_prediction(&path) {
            Err(PaeError::FileSystem {
                path: reported,
                operation,
                ..
            }) => {
                assert_eq!(reported, path);
                assert_eq!(operation, "open");
            }
            other => unreachable!("Expected FileSystem error, got {other:?}"),
        }
    }

    // Tests malformed JSON is a syntax error
    // Verified by treating malformed input as an empty document
    #[test]
    fn test_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{\"pae\": [[0.0,").unwrap();

        assert!(matches!(
            load_prediction(&path),
            Err(PaeError::JsonSyntax { .. })
        ));
    }

    // Tests a missing required key is a schema error
    // Verified by defaulting the pae field
    #[test]
    fn test_missing_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no_pae.json");
        write_json(
            &path,
            &json!({ "token_chain_ids": ["A"], "token_res_ids": [1] }),
        );

        assert!(matches!(
            load_prediction(&path),
            Err(PaeError::JsonSchema { .. })
        ));
    }

    // Tests ragged and empty matrices are rejected
    // Verified by padding short rows
    #[test]
    fn test_pae_matrix_shape_errors() {
        let ragged = bundle(&["A", "A"], vec![vec![0.0, 1.0], vec![2.0]]);
        assert!(matches!(
            ragged.pae_matrix(2),
            Err(PaeError::InvalidPrediction { model: 2, .. })
        ));

        let empty = bundle(&[], Vec::new());
        assert!(matches!(
            empty.pae_matrix(0),
            Err(PaeError::InvalidPrediction { .. })
        ));
    }

    // Tests disagreeing token arrays are reported
    // Verified by comparing only chain labels and residue numbers
    #[test]
    fn test_length_mismatch() {
        let consistent = bundle(&["A", "B"], vec![vec![0.0; 2]; 2]);
        assert!(consistent.length_mismatch().is_none());

        let short_matrix = bundle(&["A", "B", "B"], vec![vec![0.0; 2]; 2]);
        assert!(
            short_matrix
                .length_mismatch()
                .is_some_and(|message| message.contains("2 PAE rows"))
        );
    }

    // Tests summary confidences decode with partial content
    // Verified by making ptm a required field
    #[test]
    fn test_load_confidence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conf.json");
        write_json(
            &path,
            &json!({
                "iptm": 0.82,
                "ptm": 0.85,
                "ranking_score": 0.91,
                "has_clash": 0.0,
                "num_recycles": 10,
                "chain_pair_iptm": [[0.8, null], [null, 0.7]],
                "unrelated": "ignored"
            }),
        );

        let confidence = load_confidence(&path).unwrap();
        assert_eq!(confidence.ptm, Some(0.85));
        assert_eq!(confidence.iptm, Some(0.82));
        assert_eq!(confidence.num_recycles, Some(10.0));
        assert!(confidence.chain_ptm.is_none());
        assert_eq!(
            confidence.chain_pair_iptm,
            Some(vec![vec![Some(0.8), None], vec![None, Some(0.7)]])
        );
    }

    // Tests both documents of a model load together
    // Verified by loading the confidence of the wrong model
    #[test]
    fn test_model_artifacts_load() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("pred");
        fs::create_dir_all(&dir).unwrap();
        let paths = ArtifactPaths::new(&dir);

        write_json(
            &paths.full_data(1),
            &json!({ "token_chain_ids": ["A"], "token_res_ids": [1], "pae": [[0.0]] }),
        );
        write_json(&paths.summary_confidences(1), &json!({ "ptm": 0.5 }));
        write_json(&paths.summary_confidences(0), &json!({ "ptm": 0.1 }));

        let artifacts = ModelArtifacts::load(&paths, 1).unwrap();
        assert_eq!(artifacts.model, 1);
        assert_eq!(artifacts.confidence.ptm, Some(0.5));
        assert_eq!(artifacts.prediction.token_count(), 1);

        // Model 0 has a confidence document but no full data
        assert!(matches!(
            ModelArtifacts::load(&paths, 0),
            Err(PaeError::FileSystem { .. })
        ));
    }
}
