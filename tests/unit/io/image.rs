//! Tests for PNG export including overwrite and directory creation

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use paeviz::PaeError;
    use paeviz::io::image::save_figure;
    use tempfile::TempDir;

    // Tests PNG file creation and pixel round trip
    // Verified by disabling file save operation
    #[test]
    fn test_save_figure_creates_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("figure_pae_0.png");
        let figure = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));

        save_figure(&figure, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(2, 1).0, [10, 20, 30]);
    }

    // Tests existing figures are replaced without complaint
    // Verified by refusing to overwrite existing files
    #[test]
    fn test_save_figure_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("figure_pae_1.png");

        save_figure(&RgbImage::new(4, 4), &path).unwrap();
        save_figure(&RgbImage::new(7, 5), &path).unwrap();

        let loaded = image::open(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (7, 5));
    }

    // Tests missing parent directories are created
    // Verified by removing directory creation
    #[test]
    fn test_save_figure_creates_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/figure_pae_2.png");

        save_figure(&RgbImage::new(2, 2), &path).unwrap();
        assert!(path.exists());
    }

    // Tests empty figures are rejected
    // Verified by ignoring zero dimensions
    #[test]
    fn test_save_figure_empty_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.png");

        let result = save_figure(&RgbImage::new(0, 0), &path);
        assert!(matches!(result, Err(PaeError::ImageExport { .. })));
        assert!(!path.exists());
    }
}
