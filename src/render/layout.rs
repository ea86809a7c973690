//! Pixel geometry of the PAE figure
//!
//! The heatmap panel has a fixed width; every other panel, gap and margin is
//! derived from it or from the configured physical sizes at the output DPI.

use crate::io::configuration::{
    COLORBAR_FRACTION, COLORBAR_PAD_INCHES, DASH_OFF_POINTS, DASH_ON_POINTS, DPI,
    FIGURE_PAD_INCHES, FONT_POINTS, HEATMAP_INCHES, LINE_WIDTH_POINTS, OUTLINE_WIDTH_POINTS,
    PAE_VMAX, POINTS_PER_INCH, STRIP_FRACTION, STRIP_PAD_INCHES, TARGET_COLUMN_TICKS,
    TICK_LENGTH_POINTS,
};
use crate::render::canvas::{PixelRect, Stroke};
use crate::render::font::FontScale;

/// Convert a physical length in inches to whole pixels
pub fn inches_to_pixels(inches: f64) -> u32 {
    (inches * DPI).round().max(0.0) as u32
}

/// Convert a length in points to whole pixels, never thinner than one pixel
pub fn points_to_pixels(points: f64) -> u32 {
    ((points * DPI / POINTS_PER_INCH).round() as u32).max(1)
}

fn fraction_of(length: u32, fraction: f64) -> u32 {
    ((f64::from(length) * fraction).round() as u32).max(1)
}

fn scale_side(side: u32, short: usize, long: usize) -> u32 {
    ((f64::from(side) * short as f64 / long as f64).round() as u32).max(1)
}

/// Matrix cells under one output pixel with their share of its width
pub type Footprint = Vec<(usize, f64)>;

/// Panel rectangles and stroke metrics of one figure
#[derive(Debug, Clone)]
pub struct FigureLayout {
    /// Full image width
    pub width: u32,
    /// Full image height
    pub height: u32,
    /// PAE heatmap panel
    pub heatmap: PixelRect,
    /// Colorbar gradient
    pub colorbar: PixelRect,
    /// Chain strip above the heatmap
    pub top_strip: PixelRect,
    /// Chain strip left of the heatmap
    pub left_strip: PixelRect,
    /// Matrix rows
    pub rows: usize,
    /// Matrix columns
    pub cols: usize,
    /// Tokens along each chain strip
    pub tokens: usize,
    /// Scale of all figure text
    pub font: FontScale,
    /// Separator and heatmap frame stroke
    pub dashed: Stroke,
    /// Strip separator stroke
    pub solid: Stroke,
    /// Colorbar outline and tick stroke
    pub outline: Stroke,
    /// Tick mark length
    pub tick_length: u32,
    /// Gap between tick mark and tick label
    pub tick_pad: u32,
}

impl FigureLayout {
    /// Lay out a figure for a `rows` x `cols` matrix and `tokens` chain labels
    pub fn new(rows: usize, cols: usize, tokens: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let font = FontScale::for_points(FONT_POINTS, DPI);
        let text_height = font.text_height();
        let pad = inches_to_pixels(FIGURE_PAD_INCHES);
        let tick_length = points_to_pixels(TICK_LENGTH_POINTS);
        let tick_pad = points_to_pixels(TICK_LENGTH_POINTS);

        // The longer matrix side spans the full panel; cells stay square
        let side = inches_to_pixels(HEATMAP_INCHES).max(1);
        let (heat_width, heat_height) = if rows > cols {
            (scale_side(side, cols, rows), side)
        } else {
            (side, scale_side(side, rows, cols))
        };

        let strip_pad = inches_to_pixels(STRIP_PAD_INCHES);
        let strip_thickness = fraction_of(side, STRIP_FRACTION);
        let left_strip_width = strip_thickness;
        let top_strip_height = strip_thickness;

        let heatmap = PixelRect::new(
            pad + left_strip_width + strip_pad,
            pad + top_strip_height + strip_pad,
            heat_width,
            heat_height,
        );
        let top_strip = PixelRect::new(heatmap.x, pad, heat_width, top_strip_height);
        let left_strip = PixelRect::new(pad, heatmap.y, left_strip_width, heat_height);
        let colorbar = PixelRect::new(
            heatmap.right() + inches_to_pixels(COLORBAR_PAD_INCHES),
            heatmap.y,
            fraction_of(side, COLORBAR_FRACTION),
            heat_height,
        );

        let widest_tick_label = font.text_width(&format!("{PAE_VMAX:.0}"));
        let width = colorbar.right()
            + tick_length
            + tick_pad
            + widest_tick_label
            + tick_pad
            + text_height
            + pad;
        let height = heatmap.bottom() + tick_length + tick_pad + text_height + pad;

        let line_width = points_to_pixels(LINE_WIDTH_POINTS);
        let dash_on = points_to_pixels(DASH_ON_POINTS * LINE_WIDTH_POINTS);
        let dash_off = points_to_pixels(DASH_OFF_POINTS * LINE_WIDTH_POINTS);

        Self {
            width,
            height,
            heatmap,
            colorbar,
            top_strip,
            left_strip,
            rows,
            cols,
            tokens,
            font,
            dashed: Stroke::dashed(line_width, dash_on, dash_off),
            solid: Stroke::solid(line_width),
            outline: Stroke::solid(points_to_pixels(OUTLINE_WIDTH_POINTS)),
            tick_length,
            tick_pad,
        }
    }

    /// Cells under each heatmap pixel column, left to right
    pub fn column_footprints(&self) -> Vec<Footprint> {
        footprints(self.cols, self.heatmap.width)
    }

    /// Cells under each heatmap pixel row, top to bottom
    pub fn row_footprints(&self) -> Vec<Footprint> {
        footprints(self.rows, self.heatmap.height)
    }

    /// Heatmap column of a data coordinate, where cell `i` spans `i - 0.5..i + 0.5`
    pub fn heatmap_x(&self, position: f64) -> f64 {
        data_to_pixel(position, self.cols, self.heatmap.x, self.heatmap.width)
    }

    /// Heatmap row of a data coordinate
    pub fn heatmap_y(&self, position: f64) -> f64 {
        data_to_pixel(position, self.rows, self.heatmap.y, self.heatmap.height)
    }

    /// Top strip column of a token coordinate
    pub fn strip_x(&self, position: f64) -> f64 {
        data_to_pixel(position, self.tokens, self.top_strip.x, self.top_strip.width)
    }

    /// Left strip row of a token coordinate
    pub fn strip_y(&self, position: f64) -> f64 {
        data_to_pixel(position, self.tokens, self.left_strip.y, self.left_strip.height)
    }

    /// Token shown at a strip pixel offset along its length
    pub fn token_at(&self, offset: u32, length: u32) -> usize {
        if self.tokens == 0 || length == 0 {
            return 0;
        }
        (offset as usize * self.tokens / length as usize).min(self.tokens - 1)
    }

    /// Token positions labelled below the heatmap
    pub fn column_ticks(&self) -> Vec<usize> {
        let step = nice_step(self.cols as f64 / TARGET_COLUMN_TICKS as f64);
        (0..self.cols).step_by(step).collect()
    }
}

/// Coverage of `cells` equal cells by `pixels` equal pixels along one axis
///
/// When cells are at least a pixel wide each pixel takes its nearest cell.
/// When they are narrower, a pixel covers several cells and weights each by
/// the overlapping length, so no cell is skipped.
pub fn footprints(cells: usize, pixels: u32) -> Vec<Footprint> {
    if cells == 0 || pixels == 0 {
        return Vec::new();
    }
    let pixel_count = pixels as usize;
    if cells <= pixel_count {
        return (0..pixel_count)
            .map(|p| vec![((p * cells / pixel_count).min(cells - 1), 1.0)])
            .collect();
    }

    let span = cells as f64 / f64::from(pixels);
    (0..pixels)
        .map(|p| {
            let start = f64::from(p) * span;
            let end = start + span;
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(cells);
            (first..last)
                .filter_map(|cell| {
                    let overlap = end.min((cell + 1) as f64) - start.max(cell as f64);
                    (overlap > 0.0).then_some((cell, overlap))
                })
                .collect()
        })
        .collect()
}

fn data_to_pixel(position: f64, count: usize, origin: u32, length: u32) -> f64 {
    let count = count.max(1) as f64;
    (position + 0.5).mul_add(f64::from(length) / count, f64::from(origin))
}

/// Round a raw tick spacing to 1, 2, 5 or 10 times a power of ten, at least 1
pub fn nice_step(raw: f64) -> usize {
    if raw <= 1.0 || !raw.is_finite() {
        return 1;
    }
    let magnitude = 10.0f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let step = if normalized < 1.5 {
        1.0
    } else if normalized < 3.5 {
        2.0
    } else if normalized < 7.5 {
        5.0
    } else {
        10.0
    };
    ((step * magnitude).round() as usize).max(1)
}
