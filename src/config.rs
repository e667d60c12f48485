// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The parameters of a single render.  Everything the calculation
//! needs is fixed here before it starts, and `validate()` is the only
//! place a bad parameter is caught.

use num::Complex;

use crate::colorize::Shaping;
use crate::errors::{NebulaError, Result};
use crate::planes::Viewport;

/// Which seeds contribute their orbits to the accumulation grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SeedPolicy {
    /// Seeds the classifier retains (bounded orbits) are plotted.
    /// This is the default and the way the nebula was first drawn.
    Retained,
    /// Seeds that escape are plotted, the way a classic Buddhabrot is.
    Escaped,
}

impl Default for SeedPolicy {
    fn default() -> Self {
        SeedPolicy::Retained
    }
}

/// Image width at scale 1.
pub const BASE_WIDTH: usize = 1366;
/// Image height at scale 1.
pub const BASE_HEIGHT: usize = 768;
/// Default scale applied to the base resolution.
pub const SCALE: usize = 2;

/// Everything a render needs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Output width in pixels.
    pub width: usize,
    /// Output height in pixels.
    pub height: usize,
    /// Center of the view on the complex plane.
    pub center: Complex<f64>,
    /// Width of the view on the complex plane.  The height follows
    /// from the image's aspect ratio.
    pub view_width: f64,
    /// Iteration cap, shared by classification and accumulation.
    pub iterations: usize,
    /// Orbit magnitude beyond which a seed counts as escaped.
    pub bailout: f64,
    /// Samples per pixel along each axis.
    pub oversampling: usize,
    /// HSL saturation of every output pixel.
    pub saturation: f64,
    /// Maps normalized density to lightness.
    pub shaping: Shaping,
    /// Which seeds get plotted.
    pub policy: SeedPolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: BASE_WIDTH * SCALE,
            height: BASE_HEIGHT * SCALE,
            center: Complex::new(-0.5, 0.0),
            view_width: 4.0,
            iterations: 8192,
            bailout: 3.0,
            oversampling: 4,
            saturation: 0.6,
            shaping: Shaping::Cuberoot,
            policy: SeedPolicy::Retained,
        }
    }
}

impl RenderConfig {
    /// Check every parameter.  Nothing downstream re-validates.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(NebulaError::EmptyResolution(self.width, self.height));
        }
        if !(self.view_width.is_finite() && self.view_width > 0.0) {
            return Err(NebulaError::BadViewWidth(self.view_width));
        }
        if !(self.center.re.is_finite() && self.center.im.is_finite()) {
            return Err(NebulaError::BadCenter(self.center.re, self.center.im));
        }
        if self.iterations == 0 {
            return Err(NebulaError::ZeroIterations);
        }
        if !(self.bailout.is_finite() && self.bailout > 0.0) {
            return Err(NebulaError::BadBailout(self.bailout));
        }
        if self.oversampling == 0 {
            return Err(NebulaError::ZeroOversampling);
        }
        if !(self.saturation >= 0.0 && self.saturation <= 1.0) {
            return Err(NebulaError::BadSaturation(self.saturation));
        }
        if let Shaping::Linear { gain } = self.shaping {
            if !(gain.is_finite() && gain > 0.0) {
                return Err(NebulaError::BadGain(gain));
            }
        }
        Viewport::new(
            self.width,
            self.height,
            self.center,
            self.view_width,
            self.oversampling,
        )?;
        Ok(())
    }
}
