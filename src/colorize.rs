// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns a finished accumulation grid into pixels.
//!
//! The phase of each cell picks the hue and its magnitude, relative to
//! the brightest cell in the grid, picks the lightness.  That needs the
//! maximum first, so coloring is two passes: a reduction over the
//! whole grid, then an independent mapping of every cell.

use log::{info, warn};
use num::Complex;
use std::f64::consts::PI;

use crate::accumulate::AccumulationGrid;
use crate::colors::{hsl_to_rgb, Color};
use crate::planes::{IntegralPlane, Pixel};

/// Gain used by the linear shaping function unless told otherwise.
pub const DEFAULT_GAIN: f64 = 5.0;

/// Maps a cell's normalized density, in `[0, 1]`, to lightness.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shaping {
    /// `cbrt(1 - (x - 1)^2)`: rises steeply near zero and flattens
    /// toward full lightness, keeping faint cells visible.
    Cuberoot,
    /// `min(x * gain, 1)`: saturates every cell above `1 / gain`.
    Linear {
        /// Slope of the ramp.
        gain: f64,
    },
}

impl Default for Shaping {
    fn default() -> Self {
        Shaping::Cuberoot
    }
}

impl Shaping {
    /// Apply the curve.
    pub fn apply(&self, x: f64) -> f64 {
        match *self {
            Shaping::Cuberoot => (1.0 - (x - 1.0) * (x - 1.0)).cbrt(),
            Shaping::Linear { gain } => (x * gain).min(1.0),
        }
    }
}

/// The largest cell magnitude in the grid.
pub fn max_norm(grid: &AccumulationGrid) -> f64 {
    grid.cells().iter().map(|c| c.norm()).fold(0.0, f64::max)
}

/// One RGB pixel per output pixel, row-major.  Written once by the
/// colorizer and never modified.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageGrid {
    plane: IntegralPlane,
    pixels: Vec<Color>,
}

impl ImageGrid {
    /// An image of a single color.
    pub fn filled(plane: IntegralPlane, color: Color) -> Self {
        ImageGrid {
            plane,
            pixels: vec![color; plane.len()],
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.plane.0
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.plane.1
    }

    /// The pixels in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// The color of one pixel.
    pub fn get(&self, pixel: Pixel) -> Option<Color> {
        if pixel.0 >= self.plane.0 || pixel.1 >= self.plane.1 {
            return None;
        }
        Some(self.pixels[self.plane.offset(pixel)])
    }

    /// The image as packed, row-major RGB bytes.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for Color(r, g, b) in &self.pixels {
            bytes.extend_from_slice(&[*r, *g, *b]);
        }
        bytes
    }
}

/// Maps accumulated cells to colors.
#[derive(Copy, Clone, Debug)]
pub struct Colorizer {
    saturation: f64,
    shaping: Shaping,
    fallback: Color,
}

impl Default for Colorizer {
    fn default() -> Self {
        Colorizer::new(0.6, Shaping::Cuberoot)
    }
}

impl Colorizer {
    /// A colorizer that paints undefined cells black.
    pub fn new(saturation: f64, shaping: Shaping) -> Self {
        Colorizer {
            saturation,
            shaping,
            fallback: Color::BLACK,
        }
    }

    /// Use another color for cells whose lightness is undefined.
    pub fn with_fallback(mut self, fallback: Color) -> Self {
        self.fallback = fallback;
        self
    }

    /// The color of a single cell given the grid's maximum magnitude.
    pub fn color(&self, cell: Complex<f64>, max_abs: f64) -> Color {
        let hue = (cell.arg() + PI) / (2.0 * PI);
        let light = self.shaping.apply(cell.norm() / max_abs);
        if !(hue.is_finite() && light.is_finite()) {
            return self.fallback;
        }
        hsl_to_rgb(hue, self.saturation, light)
    }

    /// Color a whole grid.  A grid nothing was deposited into has no
    /// scale to normalize against and comes out in the fallback color.
    pub fn colorize(&self, grid: &AccumulationGrid) -> ImageGrid {
        let max_abs = max_norm(grid);
        info!("max_abs = {}", max_abs);
        let plane = grid.plane();
        if !(max_abs > 0.0 && max_abs.is_finite()) {
            warn!(
                "accumulation grid has no usable maximum ({}); emitting a uniform image",
                max_abs
            );
            return ImageGrid::filled(plane, self.fallback);
        }

        let pixels = plane
            .pixels()
            .map(|pixel| match grid.get(pixel) {
                Some(cell) => self.color(cell, max_abs),
                None => self.fallback,
            })
            .collect();
        ImageGrid { plane, pixels }
    }
}
