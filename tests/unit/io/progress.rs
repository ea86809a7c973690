//! Tests for per-model progress tracking

#[cfg(test)]
mod tests {
    use paeviz::io::progress::ProgressManager;

    // Tests completed models are counted
    // Verified by not incrementing on completion
    #[test]
    fn test_complete_model_counts() {
        let progress = ProgressManager::hidden(5);

        progress.start_model(0, "figure_pae_0.png");
        progress.complete_model();
        progress.start_model(1, "figure_pae_1.png");
        progress.complete_model();

        assert_eq!(progress.completed(), 2);
        progress.finish();
    }

    // Tests an abandoned run keeps its count
    // Verified by resetting position on abandon
    #[test]
    fn test_abandon_keeps_position() {
        let progress = ProgressManager::hidden(5);

        progress.complete_model();
        progress.abandon();

        assert_eq!(progress.completed(), 1);
    }

    // Tests default construction starts at zero
    // Verified by seeding the position
    #[test]
    fn test_default() {
        let progress = ProgressManager::default();
        assert_eq!(progress.completed(), 0);
    }
}
