//! Raster drawing over an RGB buffer
//!
//! Shapes go through a `plotters` bitmap backend wrapped around the buffer.
//! Text is stamped directly from the embedded bitmap font.

use crate::io::error::{PaeError, Result};
use crate::render::font::{ADVANCE, FontScale, GLYPH_HEIGHT, GLYPH_WIDTH, glyph};
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;

const BYTES_PER_PIXEL: usize = 3;

// Keeps far off-canvas coordinates from overflowing the backend's arithmetic
const COORD_LIMIT: i64 = 1 << 24;

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl PixelRect {
    /// Rectangle from its top-left corner and size
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the right edge
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// One past the bottom edge
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Horizontal center
    pub const fn center_x(&self) -> u32 {
        self.x + self.width / 2
    }

    /// Vertical center
    pub const fn center_y(&self) -> u32 {
        self.y + self.height / 2
    }
}

/// Line thickness and optional on/off dash lengths, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    /// Line thickness
    pub width: u32,
    /// Dash on and off lengths, `None` for a solid line
    pub dash: Option<(u32, u32)>,
}

impl Stroke {
    /// Solid line
    pub const fn solid(width: u32) -> Self {
        Self { width, dash: None }
    }

    /// Dashed line
    pub const fn dashed(width: u32, on: u32, off: u32) -> Self {
        Self {
            width,
            dash: Some((on, off)),
        }
    }

    /// Painted `[start, end)` offsets along a line of `length` pixels
    pub fn runs(&self, length: i64) -> Vec<(i64, i64)> {
        match self.dash {
            Some((0, _)) => Vec::new(),
            Some((on, off)) => {
                let period = i64::from(on) + i64::from(off);
                (0..length.max(0))
                    .step_by(usize::try_from(period).unwrap_or(usize::MAX))
                    .map(|start| (start, (start + i64::from(on)).min(length)))
                    .collect()
            }
            _ if length > 0 => vec![(0, length)],
            _ => Vec::new(),
        }
    }
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn drawing_failed<E>(err: DrawingAreaErrorKind<E>) -> PaeError
where
    E: std::error::Error + Send + Sync,
{
    PaeError::Render {
        reason: err.to_string(),
    }
}

fn coord(value: i64) -> i32 {
    i32::try_from(value.clamp(-COORD_LIMIT, COORD_LIMIT)).unwrap_or_default()
}

fn rgb(color: [u8; 3]) -> RGBColor {
    RGBColor(color[0], color[1], color[2])
}

/// Drawing surface; everything outside the image is clipped
pub struct Canvas {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl Canvas {
    /// Blank canvas filled with `background`
    pub fn new(width: u32, height: u32, background: [u8; 3]) -> Self {
        let pixels = width as usize * height as usize;
        Self {
            width,
            height,
            buffer: background.repeat(pixels),
        }
    }

    fn area(&mut self) -> Area<'_> {
        BitMapBackend::with_buffer(&mut self.buffer, (self.width, self.height)).into_drawing_area()
    }

    /// Paint every pixel of `rect` that `shade` gives a color for
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects a pixel
    pub fn shade<F>(&mut self, rect: PixelRect, shade: F) -> Result<()>
    where
        F: Fn(u32, u32) -> Option<[u8; 3]>,
    {
        let area = self.area();
        for dy in 0..rect.height {
            for dx in 0..rect.width {
                if let Some(color) = shade(dx, dy) {
                    let x = coord(i64::from(rect.x) + i64::from(dx));
                    let y = coord(i64::from(rect.y) + i64::from(dy));
                    area.draw_pixel((x, y), &rgb(color))
                        .map_err(drawing_failed)?;
                }
            }
        }
        Ok(())
    }

    /// Fill a rectangle
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to draw
    pub fn fill_rect(&mut self, rect: PixelRect, color: [u8; 3]) -> Result<()> {
        if rect.width == 0 || rect.height == 0 {
            return Ok(());
        }
        let area = self.area();
        fill_span(
            &area,
            (i64::from(rect.x), i64::from(rect.y)),
            (i64::from(rect.right()), i64::from(rect.bottom())),
            color,
        )
    }

    /// Horizontal line from `x0` to `x1` (exclusive) centered on row `y`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to draw
    pub fn hline(
        &mut self,
        x0: i64,
        x1: i64,
        y: i64,
        stroke: Stroke,
        color: [u8; 3],
    ) -> Result<()> {
        let top = y - i64::from(stroke.width / 2);
        let bottom = top + i64::from(stroke.width);
        let area = self.area();
        for (start, end) in stroke.runs(x1 - x0) {
            fill_span(&area, (x0 + start, top), (x0 + end, bottom), color)?;
        }
        Ok(())
    }

    /// Vertical line from `y0` to `y1` (exclusive) centered on column `x`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to draw
    pub fn vline(
        &mut self,
        x: i64,
        y0: i64,
        y1: i64,
        stroke: Stroke,
        color: [u8; 3],
    ) -> Result<()> {
        let left = x - i64::from(stroke.width / 2);
        let right = left + i64::from(stroke.width);
        let area = self.area();
        for (start, end) in stroke.runs(y1 - y0) {
            fill_span(&area, (left, y0 + start), (right, y0 + end), color)?;
        }
        Ok(())
    }

    /// Outline drawn just inside `rect`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to draw
    pub fn stroke_rect(&mut self, rect: PixelRect, stroke: Stroke, color: [u8; 3]) -> Result<()> {
        let half = i64::from(stroke.width / 2);
        let left = i64::from(rect.x) + half;
        let top = i64::from(rect.y) + half;
        let right = i64::from(rect.right()) - i64::from(stroke.width) + half;
        let bottom = i64::from(rect.bottom()) - i64::from(stroke.width) + half;
        let x0 = i64::from(rect.x);
        let x1 = i64::from(rect.right());
        let y0 = i64::from(rect.y);
        let y1 = i64::from(rect.bottom());

        self.hline(x0, x1, top, stroke, color)?;
        self.hline(x0, x1, bottom, stroke, color)?;
        self.vline(left, y0, y1, stroke, color)?;
        self.vline(right, y0, y1, stroke, color)
    }

    /// Set one pixel of the buffer
    pub fn set_pixel(&mut self, x: i64, y: i64, color: [u8; 3]) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x >= self.width || y >= self.height {
            return;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        if let Some(pixel) = self.buffer.get_mut(offset..offset + BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&color);
        }
    }

    /// Text with its top-left corner at `(x, y)`
    pub fn draw_text(&mut self, x: i64, y: i64, text: &str, scale: FontScale, color: [u8; 3]) {
        let factor = i64::from(scale.factor());
        for (i, ch) in text.chars().enumerate() {
            let origin_x = x + i as i64 * i64::from(ADVANCE) * factor;
            self.draw_glyph(ch, scale, color, |col, row| {
                (origin_x + col * factor, y + row * factor)
            });
        }
    }

    /// Text centered on `(cx, cy)`
    pub fn draw_text_centered(
        &mut self,
        cx: i64,
        cy: i64,
        text: &str,
        scale: FontScale,
        color: [u8; 3],
    ) {
        let x = cx - i64::from(scale.text_width(text) / 2);
        let y = cy - i64::from(scale.text_height() / 2);
        self.draw_text(x, y, text, scale, color);
    }

    /// Text rotated a quarter turn counter-clockwise, reading bottom to top,
    /// centered on `(cx, cy)`
    pub fn draw_text_vertical(
        &mut self,
        cx: i64,
        cy: i64,
        text: &str,
        scale: FontScale,
        color: [u8; 3],
    ) {
        let factor = i64::from(scale.factor());
        let run = i64::from(scale.text_width(text));
        let thickness = i64::from(scale.text_height());
        let left = cx - thickness / 2;
        let bottom = cy + run / 2;

        for (i, ch) in text.chars().enumerate() {
            let along = i as i64 * i64::from(ADVANCE) * factor;
            // Glyph columns run upwards, glyph rows run rightwards
            self.draw_glyph(ch, scale, color, |col, row| {
                (left + row * factor, bottom - along - (col + 1) * factor)
            });
        }
    }

    // Paint every set bit of a glyph as a scaled block at `place(col, row)`
    fn draw_glyph<F>(&mut self, ch: char, scale: FontScale, color: [u8; 3], place: F)
    where
        F: Fn(i64, i64) -> (i64, i64),
    {
        let factor = i64::from(scale.factor());
        for (row, bits) in glyph(ch).iter().enumerate().take(GLYPH_HEIGHT as usize) {
            for col in 0..GLYPH_WIDTH {
                if bits & (0x10 >> col) == 0 {
                    continue;
                }
                let (px, py) = place(i64::from(col), row as i64);
                for dy in 0..factor {
                    for dx in 0..factor {
                        self.set_pixel(px + dx, py + dy, color);
                    }
                }
            }
        }
    }

    /// Finish drawing and take the image
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer does not match the canvas size
    pub fn into_image(self) -> Result<RgbImage> {
        let Self {
            width,
            height,
            buffer,
        } = self;
        RgbImage::from_raw(width, height, buffer).ok_or_else(|| PaeError::Render {
            reason: format!("buffer does not hold {width}x{height} pixels"),
        })
    }
}

// Fill the half-open pixel box `[from, to)`; plotters rectangles include both corners
fn fill_span(area: &Area<'_>, from: (i64, i64), to: (i64, i64), color: [u8; 3]) -> Result<()> {
    if to.0 <= from.0 || to.1 <= from.1 {
        return Ok(());
    }
    let corners = [
        (coord(from.0), coord(from.1)),
        (coord(to.0 - 1), coord(to.1 - 1)),
    ];
    area.draw(&Rectangle::new(corners, rgb(color).filled()))
        .map_err(drawing_failed)
}
