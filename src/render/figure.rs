//! Composition of the annotated PAE heatmap
//!
//! Draw order matters: panels first, then separators over them, then text
//! so labels stay readable on top of the white strip separators.

use crate::chain::ChainSegmentation;
use crate::io::configuration::{
    BACKGROUND_COLOR, CHAIN_LABEL_COLOR, COLORBAR_LABEL, COLORBAR_TICK_STEP, FOREGROUND_COLOR,
    PAE_VMAX, PAE_VMIN, STRIP_ALPHA, STRIP_SEPARATOR_COLOR,
};
use crate::io::error::{Result, invalid_prediction};
use crate::render::canvas::{Canvas, PixelRect};
use crate::render::colormap::{SequentialScale, blend, tab10};
use crate::render::layout::{FigureLayout, Footprint};
use image::RgbImage;
use ndarray::Array2;

/// Renders one PAE figure from a matrix and its chain segmentation
pub struct PaeFigure<'a> {
    pae: &'a Array2<f64>,
    chains: &'a ChainSegmentation,
    scale: SequentialScale,
    layout: FigureLayout,
}

impl<'a> PaeFigure<'a> {
    /// Prepare a figure for `model`
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix or the chain label sequence is empty
    pub fn new(model: usize, pae: &'a Array2<f64>, chains: &'a ChainSegmentation) -> Result<Self> {
        if pae.is_empty() {
            return Err(invalid_prediction(model, &"PAE matrix is empty"));
        }
        if chains.token_count() == 0 {
            return Err(invalid_prediction(model, &"no chain labels"));
        }

        let (rows, cols) = pae.dim();
        Ok(Self {
            pae,
            chains,
            scale: SequentialScale::greens_reversed(PAE_VMIN, PAE_VMAX),
            layout: FigureLayout::new(rows, cols, chains.token_count()),
        })
    }

    /// Geometry the figure will be drawn with
    pub const fn layout(&self) -> &FigureLayout {
        &self.layout
    }

    /// Draw every panel and annotation
    ///
    /// # Errors
    ///
    /// Returns an error if the drawing backend fails
    pub fn render(&self) -> Result<RgbImage> {
        let mut canvas = Canvas::new(self.layout.width, self.layout.height, BACKGROUND_COLOR);

        self.draw_heatmap(&mut canvas)?;
        self.draw_column_ticks(&mut canvas)?;
        self.draw_colorbar(&mut canvas)?;
        self.draw_strips(&mut canvas)?;
        self.draw_separators(&mut canvas)?;
        self.draw_chain_labels(&mut canvas);

        canvas.into_image()
    }

    /// Mean PAE over the cells under one heatmap pixel, ignoring NaN cells
    pub fn pixel_value(&self, row: &Footprint, col: &Footprint) -> f64 {
        let mut total = 0.0;
        let mut weight = 0.0;
        for &(i, wy) in row {
            for &(j, wx) in col {
                let Some(&value) = self.pae.get((i, j)) else {
                    continue;
                };
                if value.is_nan() {
                    continue;
                }
                total += wy * wx * value;
                weight += wy * wx;
            }
        }
        if weight > 0.0 { total / weight } else { f64::NAN }
    }

    fn draw_heatmap(&self, canvas: &mut Canvas) -> Result<()> {
        let panel = self.layout.heatmap;
        let rows = self.layout.row_footprints();
        let cols = self.layout.column_footprints();

        canvas.shade(panel, |dx, dy| {
            let row = rows.get(dy as usize)?;
            let col = cols.get(dx as usize)?;
            self.scale.color(self.pixel_value(row, col))
        })?;
        canvas.stroke_rect(panel, self.layout.dashed, FOREGROUND_COLOR)
    }

    // Row ticks are suppressed; columns keep token-index ticks
    fn draw_column_ticks(&self, canvas: &mut Canvas) -> Result<()> {
        let panel = self.layout.heatmap;
        let tick_top = i64::from(panel.bottom());
        let tick_bottom = tick_top + i64::from(self.layout.tick_length);
        let label_y = tick_bottom + i64::from(self.layout.tick_pad);

        for position in self.layout.column_ticks() {
            let x = self.layout.heatmap_x(position as f64).round() as i64;
            canvas.vline(x, tick_top, tick_bottom, self.layout.outline, FOREGROUND_COLOR)?;
            let label = position.to_string();
            let half_width = i64::from(self.layout.font.text_width(&label) / 2);
            canvas.draw_text(
                x - half_width,
                label_y,
                &label,
                self.layout.font,
                FOREGROUND_COLOR,
            );
        }
        Ok(())
    }

    fn draw_colorbar(&self, canvas: &mut Canvas) -> Result<()> {
        let bar = self.layout.colorbar;
        let span = f64::from(bar.height.saturating_sub(1).max(1));
        for dy in 0..bar.height {
            // Top of the bar is the high end of the scale
            let t = 1.0 - f64::from(dy) / span;
            let row = PixelRect::new(bar.x, bar.y + dy, bar.width, 1);
            canvas.fill_rect(row, self.scale.sample(t))?;
        }
        canvas.stroke_rect(bar, self.layout.outline, FOREGROUND_COLOR)?;

        let tick_left = i64::from(bar.right());
        let tick_right = tick_left + i64::from(self.layout.tick_length);
        let label_x = tick_right + i64::from(self.layout.tick_pad);
        let text_height = i64::from(self.layout.font.text_height());
        let mut widest = 0;

        for value in colorbar_ticks(self.scale.vmin(), self.scale.vmax(), COLORBAR_TICK_STEP) {
            let Some(t) = self.scale.normalize(value) else {
                continue;
            };
            let y = (f64::from(bar.bottom()) - t * f64::from(bar.height)).round() as i64;
            canvas.hline(tick_left, tick_right, y, self.layout.outline, FOREGROUND_COLOR)?;
            let label = format!("{value:.0}");
            widest = widest.max(self.layout.font.text_width(&label));
            canvas.draw_text(
                label_x,
                y - text_height / 2,
                &label,
                self.layout.font,
                FOREGROUND_COLOR,
            );
        }

        let caption_x = label_x + i64::from(widest + self.layout.tick_pad) + text_height / 2;
        canvas.draw_text_vertical(
            caption_x,
            i64::from(bar.center_y()),
            COLORBAR_LABEL,
            self.layout.font,
            FOREGROUND_COLOR,
        );
        Ok(())
    }

    // Consecutive pixels showing the same chain are filled as one rectangle
    fn strip_runs(&self, length: u32) -> Vec<(u32, u32, [u8; 3])> {
        let codes = self.chains.codes();
        let max_code = self.chains.max_code();
        let mut runs: Vec<(u32, u32, [u8; 3])> = Vec::new();

        for offset in 0..length {
            let token = self.layout.token_at(offset, length);
            let code = codes.get((0, token)).copied().unwrap_or(0);
            let color = blend(tab10(code, max_code), BACKGROUND_COLOR, STRIP_ALPHA);
            match runs.last_mut() {
                Some((_, end, last)) if *last == color => *end = offset + 1,
                _ => runs.push((offset, offset + 1, color)),
            }
        }
        runs
    }

    fn draw_strips(&self, canvas: &mut Canvas) -> Result<()> {
        let top = self.layout.top_strip;
        for (start, end, color) in self.strip_runs(top.width) {
            canvas.fill_rect(
                PixelRect::new(top.x + start, top.y, end - start, top.height),
                color,
            )?;
        }

        let left = self.layout.left_strip;
        for (start, end, color) in self.strip_runs(left.height) {
            canvas.fill_rect(
                PixelRect::new(left.x, left.y + start, left.width, end - start),
                color,
            )?;
        }
        Ok(())
    }

    fn draw_separators(&self, canvas: &mut Canvas) -> Result<()> {
        let heat = self.layout.heatmap;
        let top = self.layout.top_strip;
        let left = self.layout.left_strip;

        for start in self.chains.separators() {
            let boundary = start as f64 - 0.5;

            let x = self.layout.heatmap_x(boundary).round() as i64;
            let y = self.layout.heatmap_y(boundary).round() as i64;
            canvas.vline(
                x,
                i64::from(heat.y),
                i64::from(heat.bottom()),
                self.layout.dashed,
                FOREGROUND_COLOR,
            )?;
            canvas.hline(
                i64::from(heat.x),
                i64::from(heat.right()),
                y,
                self.layout.dashed,
                FOREGROUND_COLOR,
            )?;

            let strip_x = self.layout.strip_x(boundary).round() as i64;
            let strip_y = self.layout.strip_y(boundary).round() as i64;
            canvas.vline(
                strip_x,
                i64::from(top.y),
                i64::from(top.bottom()),
                self.layout.solid,
                STRIP_SEPARATOR_COLOR,
            )?;
            canvas.hline(
                i64::from(left.x),
                i64::from(left.right()),
                strip_y,
                self.layout.solid,
                STRIP_SEPARATOR_COLOR,
            )?;
        }
        Ok(())
    }

    fn draw_chain_labels(&self, canvas: &mut Canvas) {
        let top = self.layout.top_strip;
        let left = self.layout.left_strip;

        for (label, span) in self.chains.iter() {
            let center = span.center();
            canvas.draw_text_centered(
                self.layout.strip_x(center).round() as i64,
                i64::from(top.center_y()),
                label,
                self.layout.font,
                CHAIN_LABEL_COLOR,
            );
            canvas.draw_text_centered(
                i64::from(left.center_x()),
                self.layout.strip_y(center).round() as i64,
                label,
                self.layout.font,
                CHAIN_LABEL_COLOR,
            );
        }
    }
}

/// Tick values from `vmin` to `vmax` inclusive at multiples of `step`
pub fn colorbar_ticks(vmin: f64, vmax: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || vmax < vmin {
        return Vec::new();
    }
    let first = (vmin / step).ceil() as i64;
    let last = (vmax / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}
