//! Sequential and qualitative color scales

use num_traits::clamp;

/// `ColorBrewer` "Greens", light to dark
const GREENS: [[u8; 3]; 9] = [
    [0xf7, 0xfc, 0xf5],
    [0xe5, 0xf5, 0xe0],
    [0xc7, 0xe9, 0xc0],
    [0xa1, 0xd9, 0x9b],
    [0x74, 0xc4, 0x76],
    [0x41, 0xab, 0x5d],
    [0x23, 0x8b, 0x45],
    [0x00, 0x6d, 0x2c],
    [0x00, 0x44, 0x1b],
];

/// "tab10" qualitative palette
const TAB10: [[u8; 3]; 10] = [
    [0x1f, 0x77, 0xb4],
    [0xff, 0x7f, 0x0e],
    [0x2c, 0xa0, 0x2c],
    [0xd6, 0x27, 0x28],
    [0x94, 0x67, 0xbd],
    [0x8c, 0x56, 0x4b],
    [0xe3, 0x77, 0xc2],
    [0x7f, 0x7f, 0x7f],
    [0xbc, 0xbd, 0x22],
    [0x17, 0xbe, 0xcf],
];

/// Piecewise-linear color scale over a fixed value range
///
/// Values outside `[vmin, vmax]` saturate at the nearest end; NaN maps to
/// `None` so callers can leave the cell unpainted.
#[derive(Debug, Clone, Copy)]
pub struct SequentialScale {
    stops: &'static [[u8; 3]],
    reversed: bool,
    vmin: f64,
    vmax: f64,
}

impl SequentialScale {
    /// Reversed "Greens": `vmin` is dark green, `vmax` is near white
    pub const fn greens_reversed(vmin: f64, vmax: f64) -> Self {
        Self {
            stops: &GREENS,
            reversed: true,
            vmin,
            vmax,
        }
    }

    /// Lower end of the value range
    pub const fn vmin(&self) -> f64 {
        self.vmin
    }

    /// Upper end of the value range
    pub const fn vmax(&self) -> f64 {
        self.vmax
    }

    /// Map a value to the range `[0, 1]`, saturating outside the scale
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if value.is_nan() {
            return None;
        }
        let span = self.vmax - self.vmin;
        if span <= 0.0 {
            return Some(0.0);
        }
        Some(clamp((value - self.vmin) / span, 0.0, 1.0))
    }

    /// Color of a data value
    pub fn color(&self, value: f64) -> Option<[u8; 3]> {
        self.normalize(value).map(|t| self.sample(t))
    }

    /// Color at a normalized position in `[0, 1]`
    pub fn sample(&self, t: f64) -> [u8; 3] {
        let t = if self.reversed { 1.0 - t } else { t };
        let segments = self.stops.len().saturating_sub(1);
        if segments == 0 {
            return self.stops.first().copied().unwrap_or([0, 0, 0]);
        }

        let position = clamp(t, 0.0, 1.0) * segments as f64;
        let lower = (position.floor() as usize).min(segments - 1);
        let fraction = position - lower as f64;

        let from = self.stops.get(lower).copied().unwrap_or([0, 0, 0]);
        let to = self.stops.get(lower + 1).copied().unwrap_or(from);
        lerp(from, to, fraction)
    }
}

/// Color of a chain index in "tab10"
///
/// Indices are normalized linearly over `0..=max_code` before picking one of
/// the ten entries, so chains spread across the palette rather than taking
/// consecutive colors.
pub fn tab10(code: usize, max_code: usize) -> [u8; 3] {
    let t = if max_code == 0 {
        0.0
    } else {
        clamp(code as f64 / max_code as f64, 0.0, 1.0)
    };
    let slot = ((t * TAB10.len() as f64) as usize).min(TAB10.len() - 1);
    TAB10.get(slot).copied().unwrap_or([0, 0, 0])
}

/// Composite `foreground` over `background` with the given opacity
pub fn blend(foreground: [u8; 3], background: [u8; 3], alpha: f64) -> [u8; 3] {
    lerp(background, foreground, clamp(alpha, 0.0, 1.0))
}

fn lerp(from: [u8; 3], to: [u8; 3], t: f64) -> [u8; 3] {
    let mix = |a: u8, b: u8| {
        let value = f64::from(b).mul_add(t, f64::from(a) * (1.0 - t));
        clamp(value.round(), 0.0, 255.0) as u8
    };
    [mix(from[0], to[0]), mix(from[1], to[1]), mix(from[2], to[2])]
}
