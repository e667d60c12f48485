// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The accumulation grid and the orbit plotter that fills it.
//!
//! Each pixel holds a complex sum rather than a hit count.  Every time
//! an orbit passes through a pixel, the seed that started the orbit
//! is added to it, so the phase of a cell remembers which part of the
//! plane its visitors came from and the magnitude how many came.

use num::Complex;
use std::ops::AddAssign;

use crate::config::SeedPolicy;
use crate::membership::{Classifier, Verdict};
use crate::planes::{IntegralPlane, Pixel, Viewport};

/// One complex accumulator per output pixel, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct AccumulationGrid {
    plane: IntegralPlane,
    cells: Vec<Complex<f64>>,
}

impl AccumulationGrid {
    /// A zeroed grid for an image of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        let plane = IntegralPlane(width, height);
        AccumulationGrid {
            plane,
            cells: vec![Complex::new(0.0, 0.0); plane.len()],
        }
    }

    /// A zeroed grid matching a viewport's image.
    pub fn for_viewport(viewport: &Viewport) -> Self {
        let IntegralPlane(width, height) = viewport.integral_plane;
        AccumulationGrid::new(width, height)
    }

    /// The image dimensions.
    pub fn plane(&self) -> IntegralPlane {
        self.plane
    }

    /// The cells in row-major order.
    pub fn cells(&self) -> &[Complex<f64>] {
        &self.cells
    }

    /// The cell under a pixel.
    pub fn get(&self, pixel: Pixel) -> Option<Complex<f64>> {
        if pixel.0 >= self.plane.0 || pixel.1 >= self.plane.1 {
            return None;
        }
        Some(self.cells[self.plane.offset(pixel)])
    }

    /// Add `value` to the cell at a row-major offset.
    #[inline]
    pub fn deposit(&mut self, offset: usize, value: Complex<f64>) {
        self.cells[offset] += value;
    }

    /// True if no cell has been touched.
    pub fn is_zero(&self) -> bool {
        self.cells.iter().all(|c| c.re == 0.0 && c.im == 0.0)
    }

    /// Add every cell of another grid of the same size into this one.
    ///
    /// # Panics
    ///
    /// If the grids differ in size.
    pub fn merge(&mut self, other: &AccumulationGrid) {
        assert!(self.plane == other.plane, "merging grids of different sizes");
        for (cell, add) in self.cells.iter_mut().zip(other.cells.iter()) {
            *cell += *add;
        }
    }
}

/// Running totals of an accumulation pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AccumulationStats {
    /// Seeds offered to the accumulator.
    pub seeds: usize,
    /// Seeds whose orbits were plotted.
    pub plotted: usize,
    /// Deposits made into the grid.
    pub deposits: usize,
}

impl AddAssign for AccumulationStats {
    fn add_assign(&mut self, other: AccumulationStats) {
        self.seeds += other.seeds;
        self.plotted += other.plotted;
        self.deposits += other.deposits;
    }
}

/// Plots the orbits of seeds that pass the policy's gate.
pub struct Accumulator<'a> {
    viewport: &'a Viewport,
    classifier: Classifier,
    policy: SeedPolicy,
}

impl<'a> Accumulator<'a> {
    /// The classifier's cap is also the cap for the re-run.
    pub fn new(viewport: &'a Viewport, classifier: Classifier, policy: SeedPolicy) -> Self {
        Accumulator {
            viewport,
            classifier,
            policy,
        }
    }

    /// True if the policy wants this seed's orbit plotted.
    pub fn accepts(&self, c: &Complex<f64>) -> bool {
        match self.policy {
            SeedPolicy::Retained => self.classifier.classify(c) == Verdict::Retained,
            SeedPolicy::Escaped => {
                !Classifier::obviously_inside(c) && self.classifier.escape_time(c).is_some()
            }
        }
    }

    /// Re-run the orbit of a seed that has already been accepted,
    /// adding the seed into every pixel the orbit lands on.  The first
    /// step that lands off the image ends the orbit.  Returns the
    /// number of deposits.
    ///
    /// A retained seed survived the full cap under the classifier, so
    /// its re-run needs no bailout check.  An escaping seed stops as
    /// soon as it leaves the bailout radius.
    pub fn plot(&self, c: Complex<f64>, grid: &mut AccumulationGrid) -> usize {
        let check_bailout = self.policy == SeedPolicy::Escaped;
        let mut z = c;
        let mut deposits = 0;
        for _ in 0..self.classifier.iterations() {
            if check_bailout && self.classifier.escaped(&z) {
                break;
            }
            z = z * z + c;
            match self.viewport.point_to_offset(&z) {
                Some(offset) => grid.deposit(offset, c),
                None => break,
            }
            deposits += 1;
        }
        deposits
    }

    /// Gate and plot one seed.  Rejected seeds cost one classification
    /// and nothing else.
    pub fn process(&self, c: Complex<f64>, grid: &mut AccumulationGrid) -> AccumulationStats {
        let mut stats = AccumulationStats {
            seeds: 1,
            ..AccumulationStats::default()
        };
        if self.accepts(&c) {
            stats.plotted = 1;
            stats.deposits = self.plot(c, grid);
        }
        stats
    }

    /// Process every seed of a sequence into the grid.
    pub fn accumulate<I>(&self, seeds: I, grid: &mut AccumulationGrid) -> AccumulationStats
    where
        I: IntoIterator<Item = Complex<f64>>,
    {
        let mut stats = AccumulationStats::default();
        for c in seeds {
            stats += self.process(c, grid);
        }
        stats
    }
}
