//! Fixed figure layout and artifact naming constants

// Artifact naming
/// Number of predicted models written by the pipeline
pub const MODEL_COUNT: usize = 5;
/// Infix between the prediction name and model index of full-data artifacts
pub const FULL_DATA_INFIX: &str = "_full_data_";
/// Infix between the prediction name and model index of confidence artifacts
pub const SUMMARY_CONFIDENCES_INFIX: &str = "_summary_confidences_";
/// File name prefix of rendered figures
pub const FIGURE_PREFIX: &str = "figure_pae_";

// Color scale
/// Lower end of the PAE color scale in Å
pub const PAE_VMIN: f64 = 0.0;
/// Upper end of the PAE color scale in Å
pub const PAE_VMAX: f64 = 30.0;
/// Spacing of colorbar ticks in Å
pub const COLORBAR_TICK_STEP: f64 = 5.0;
/// Colorbar caption
pub const COLORBAR_LABEL: &str = "PAE (Å)";

// Raster resolution
/// Output resolution in dots per inch
pub const DPI: f64 = 300.0;
/// Points per inch, for converting point sizes to pixels
pub const POINTS_PER_INCH: f64 = 72.0;

// Layout, all sizes relative to the heatmap panel or in inches
/// Width of the heatmap panel in inches
pub const HEATMAP_INCHES: f64 = 3.1;
/// Colorbar width as a fraction of the heatmap width
pub const COLORBAR_FRACTION: f64 = 0.05;
/// Gap between heatmap and colorbar in inches
pub const COLORBAR_PAD_INCHES: f64 = 0.2;
/// Chain strip thickness as a fraction of the heatmap size
pub const STRIP_FRACTION: f64 = 0.08;
/// Gap between heatmap and chain strips in inches
pub const STRIP_PAD_INCHES: f64 = 0.03;
/// Whitespace kept around the tight bounding box in inches
pub const FIGURE_PAD_INCHES: f64 = 0.1;

// Strokes and text
/// Width of separators and the heatmap frame in points
pub const LINE_WIDTH_POINTS: f64 = 1.0;
/// Width of the colorbar outline and tick marks in points
pub const OUTLINE_WIDTH_POINTS: f64 = 0.8;
/// Length of axis tick marks in points
pub const TICK_LENGTH_POINTS: f64 = 3.5;
/// Dash on-length in points for a 1 pt line
pub const DASH_ON_POINTS: f64 = 3.7;
/// Dash off-length in points for a 1 pt line
pub const DASH_OFF_POINTS: f64 = 1.6;
/// Font size of all figure text in points
pub const FONT_POINTS: f64 = 12.0;
/// Target number of column ticks on the heatmap
pub const TARGET_COLUMN_TICKS: usize = 5;

// Colors
/// Opacity of the chain strips over the white background
pub const STRIP_ALPHA: f64 = 0.7;
/// Chain label text color
pub const CHAIN_LABEL_COLOR: [u8; 3] = [0x22, 0x22, 0x22];
/// Figure background color
pub const BACKGROUND_COLOR: [u8; 3] = [255, 255, 255];
/// Frame, tick and heatmap separator color
pub const FOREGROUND_COLOR: [u8; 3] = [0, 0, 0];
/// Strip separator color
pub const STRIP_SEPARATOR_COLOR: [u8; 3] = [255, 255, 255];
