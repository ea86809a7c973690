//! PNG export of rendered figures

use crate::io::error::{PaeError, Result, WithPath};
use image::{ImageFormat, RgbImage};
use std::path::Path;

/// Write a figure as an opaque PNG, replacing any existing file
///
/// # Errors
///
/// Returns an error if:
/// - The figure has no pixels
/// - The parent directory cannot be created
/// - The image cannot be encoded or written to the specified path
pub fn save_figure(figure: &RgbImage, output_path: &Path) -> Result<()> {
    if figure.width() == 0 || figure.height() == 0 {
        return Err(PaeError::ImageExport {
            path: output_path.to_path_buf(),
            source: image::ImageError::Parameter(image::error::ParameterError::from_kind(
                image::error::ParameterErrorKind::DimensionMismatch,
            )),
        });
    }

    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }

    figure
        .save_with_format(output_path, ImageFormat::Png)
        .map_err(|e| PaeError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
