//! Rasterization of annotated PAE figures

/// Clipped drawing primitives over an RGB image
pub mod canvas;
/// Sequential and qualitative color scales
pub mod colormap;
/// Heatmap, colorbar, chain strips and their annotations
pub mod figure;
/// Embedded bitmap font
pub mod font;
/// Panel geometry at the output resolution
pub mod layout;

pub use figure::PaeFigure;
