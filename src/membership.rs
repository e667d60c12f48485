// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Decides whether a seed belongs to the filled Mandelbrot set.
//!
//! Most of the area of the set lies in two shapes with closed-form
//! boundaries: the main cardioid and the period-2 bulb to its left.
//! Anything inside either is bounded and needs no iteration at all.
//! Everything else is iterated until it either leaves the bailout
//! radius or survives the iteration cap.

use num::Complex;

const D4: f64 = 1.0 / 4.0;
const D16: f64 = D4 / 4.0;

/// The classifier's verdict on a seed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The orbit stayed bounded; the seed is treated as a member.
    Retained,
    /// The orbit escaped the bailout radius.
    Discarded,
}

/// True if the point lies strictly inside the main cardioid.
#[inline]
pub fn in_cardioid(c: &Complex<f64>) -> bool {
    let y = c.im * c.im;
    let x = c.re - D4;
    let q = x * x + y;
    q * (q + x) < y * D4
}

/// True if the point lies strictly inside the period-2 bulb centered
/// on -1.
#[inline]
pub fn in_bulb(c: &Complex<f64>) -> bool {
    let x = c.re + 1.0;
    x * x + c.im * c.im < D16
}

/// Classifies seeds with a fixed iteration cap and bailout radius.
#[derive(Copy, Clone, Debug)]
pub struct Classifier {
    iterations: usize,
    bailout_sqr: f64,
}

impl Classifier {
    /// The cap and radius must already be validated as positive.
    pub fn new(iterations: usize, bailout: f64) -> Self {
        Classifier {
            iterations,
            bailout_sqr: bailout * bailout,
        }
    }

    /// The iteration cap.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// True if `z` lies beyond the bailout radius.
    #[inline]
    pub fn escaped(&self, z: &Complex<f64>) -> bool {
        z.norm_sqr() > self.bailout_sqr
    }

    /// Iterate z <- z^2 + c starting from z = c, checking the bailout
    /// radius before each step.  Returns the step at which the orbit
    /// was found outside the radius, or None if it never was.
    pub fn escape_time(&self, c: &Complex<f64>) -> Option<usize> {
        let mut z = *c;
        for i in 0..self.iterations {
            if self.escaped(&z) {
                return Some(i);
            }
            z = z * z + c;
        }
        None
    }

    /// True if either closed-form test already proves membership.
    #[inline]
    pub fn obviously_inside(c: &Complex<f64>) -> bool {
        in_cardioid(c) || in_bulb(c)
    }

    /// The verdict for a seed.
    pub fn classify(&self, c: &Complex<f64>) -> Verdict {
        if Classifier::obviously_inside(c) {
            return Verdict::Retained;
        }
        match self.escape_time(c) {
            Some(_) => Verdict::Discarded,
            None => Verdict::Retained,
        }
    }
}
