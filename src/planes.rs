// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Viewport struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0
//! (the output image) and a rectangle on the complex plane described
//! by its center and width.  The height of the complex rectangle is
//! not free: it follows from the aspect ratio of the image, so that
//! pixels stay square.
//!
//! The viewport also knows how densely to sample the complex
//! rectangle.  Seeds are laid out on a lattice whose spacing is the
//! pixel size divided by the oversampling factor, and the lattice is
//! exposed as a finite sequence that can be replayed, or cut into
//! index ranges, without any shared loop state.

use itertools::iproduct;
use log::info;
use num::Complex;
use std::ops::Range;

use crate::config::RenderConfig;
use crate::errors::{NebulaError, Result};

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

impl IntegralPlane {
    /// Number of cells in the plane.
    pub fn len(&self) -> usize {
        self.0 * self.1
    }

    /// Row-major offset of a pixel.  The pixel must lie on the plane.
    #[inline]
    pub fn offset(&self, pixel: Pixel) -> usize {
        pixel.1 * self.0 + pixel.0
    }

    /// Every pixel of the plane, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> {
        iproduct!(0..self.1, 0..self.0).map(|(row, column)| Pixel(column, row))
    }
}

/// Describes the column, row of a pixel in an integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Contains the definitions of two planes: the output image and the
/// region of the complex plane it shows.  Maps points from the
/// complex plane onto pixels, and lays out the seed lattice.
#[derive(Clone, Debug)]
pub struct Viewport {
    /// The output image.
    pub integral_plane: IntegralPlane,
    /// The lower-left corner of the viewed region.
    pub origin: Complex<f64>,
    /// Width and height of the viewed region.
    pub extent: (f64, f64),
    /// Distance between neighboring seeds along each axis.
    pub step: (f64, f64),
    // Number of seed columns and rows.
    lattice: (usize, usize),
}

/// True if stepping by `step` still moves a coordinate anywhere in
/// `[start, end]`.
fn resolvable(start: f64, step: f64, end: f64) -> bool {
    step > start.abs().max(end.abs()) * std::f64::EPSILON
}

/// Count the lattice points `start + k * step`, k = 0, 1, ..., that
/// stay before `end`.  With `inclusive` a point exactly on `end` counts.
fn lattice_len(start: f64, step: f64, end: f64, inclusive: bool) -> usize {
    let within = |k: usize| {
        let v = start + (k as f64) * step;
        if inclusive {
            v <= end
        } else {
            v < end
        }
    };
    // The quotient is only an estimate; settle rounding at the edge.
    let mut k = ((end - start) / step).floor().max(0.0) as usize;
    while k > 0 && !within(k) {
        k -= 1;
    }
    while within(k + 1) {
        k += 1;
    }
    if within(k) {
        k + 1
    } else {
        0
    }
}

impl Viewport {
    /// Takes the image resolution, the center and width of the region
    /// of the complex plane to show, and the number of samples per
    /// pixel along each axis.
    pub fn new(
        width: usize,
        height: usize,
        center: Complex<f64>,
        view_width: f64,
        oversampling: usize,
    ) -> Result<Viewport> {
        if width == 0 || height == 0 {
            return Err(NebulaError::EmptyResolution(width, height));
        }
        if !(view_width.is_finite() && view_width > 0.0) {
            return Err(NebulaError::BadViewWidth(view_width));
        }
        if !(center.re.is_finite() && center.im.is_finite()) {
            return Err(NebulaError::BadCenter(center.re, center.im));
        }
        if oversampling == 0 {
            return Err(NebulaError::ZeroOversampling);
        }

        let bad_lattice = || NebulaError::BadLattice(width, height, oversampling);
        let columns = width.checked_mul(oversampling).ok_or_else(bad_lattice)?;
        let rows = height.checked_mul(oversampling).ok_or_else(bad_lattice)?;

        let view_height = (height as f64) * view_width / (width as f64);
        let origin = Complex::new(center.re - view_width / 2.0, center.im - view_height / 2.0);
        let end = (origin.re + view_width, origin.im + view_height);
        let step = (view_width / (columns as f64), view_height / (rows as f64));
        if !(resolvable(origin.re, step.0, end.0) && resolvable(origin.im, step.1, end.1)) {
            return Err(bad_lattice());
        }

        let lattice = (
            lattice_len(origin.re, step.0, end.0, false),
            lattice_len(origin.im, step.1, end.1, true),
        );
        lattice.0.checked_mul(lattice.1).ok_or_else(bad_lattice)?;

        Ok(Viewport {
            integral_plane: IntegralPlane(width, height),
            origin,
            extent: (view_width, view_height),
            step,
            lattice,
        })
    }

    /// Build the viewport a configuration describes.
    pub fn from_config(config: &RenderConfig) -> Result<Viewport> {
        let viewport = Viewport::new(
            config.width,
            config.height,
            config.center,
            config.view_width,
            config.oversampling,
        )?;
        info!(
            "viewport {}x{} at {}: origin {}, extent {}x{}, {} seeds in {} rows",
            config.width,
            config.height,
            config.center,
            viewport.origin,
            viewport.extent.0,
            viewport.extent.1,
            viewport.sample_count(),
            viewport.sample_rows()
        );
        Ok(viewport)
    }

    /// Given a complex number corresponding to a location on the
    /// complex plane, return the pixel containing it, or None if it
    /// falls outside the image.
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> Option<Pixel> {
        let IntegralPlane(width, height) = self.integral_plane;
        let left = ((point.re - self.origin.re) * (width as f64) / self.extent.0).floor();
        let top = ((point.im - self.origin.im) * (height as f64) / self.extent.1).floor();
        // Written to reject NaN as well.
        if !(left >= 0.0 && left < width as f64 && top >= 0.0 && top < height as f64) {
            return None;
        }
        Some(Pixel(left as usize, top as usize))
    }

    /// As point_to_pixel, but returns the linear offset of the pixel
    /// into a row-major buffer.
    pub fn point_to_offset(&self, point: &Complex<f64>) -> Option<usize> {
        self.point_to_pixel(point)
            .map(|pixel| self.integral_plane.offset(pixel))
    }

    /// Number of seeds in one lattice row.
    pub fn sample_columns(&self) -> usize {
        self.lattice.0
    }

    /// Number of lattice rows.
    pub fn sample_rows(&self) -> usize {
        self.lattice.1
    }

    /// Total number of seeds.
    pub fn sample_count(&self) -> usize {
        self.lattice.0 * self.lattice.1
    }

    /// The seed at a row-major lattice index.
    pub fn sample(&self, index: usize) -> Complex<f64> {
        let (column, row) = (index % self.lattice.0, index / self.lattice.0);
        Complex::new(
            self.origin.re + (column as f64) * self.step.0,
            self.origin.im + (row as f64) * self.step.1,
        )
    }

    /// Every seed, row by row.
    pub fn samples(&self) -> Samples<'_> {
        self.samples_in(0..self.sample_count())
    }

    /// The seeds whose lattice index falls in `range`.  The range is
    /// clipped to the lattice.
    pub fn samples_in(&self, range: Range<usize>) -> Samples<'_> {
        let total = self.sample_count();
        let end = range.end.min(total);
        let start = range.start.min(end);
        Samples {
            viewport: self,
            indices: start..end,
        }
    }

    /// The seeds of one lattice row.
    pub fn sample_row(&self, row: usize) -> Samples<'_> {
        let columns = self.lattice.0;
        self.samples_in(row * columns..(row + 1) * columns)
    }
}

/// A finite run of seeds over a viewport's lattice.
#[derive(Clone, Debug)]
pub struct Samples<'a> {
    viewport: &'a Viewport,
    indices: Range<usize>,
}

impl<'a> Iterator for Samples<'a> {
    type Item = Complex<f64>;

    fn next(&mut self) -> Option<Complex<f64>> {
        self.indices.next().map(|i| self.viewport.sample(i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Samples<'a> {
    fn next_back(&mut self) -> Option<Complex<f64>> {
        self.indices.next_back().map(|i| self.viewport.sample(i))
    }
}

impl<'a> ExactSizeIterator for Samples<'a> {}
