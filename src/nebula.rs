// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Nebulabrot renderer
//!
//! Ties the phases together.  The renderer owns the viewport and the
//! classifier; each phase borrows what it needs and owns the buffer it
//! writes.  The accumulation grid is written only while calculating
//! and the image grid only while coloring.

use log::{debug, info};

use crate::accumulate::{AccumulationGrid, AccumulationStats, Accumulator};
use crate::colorize::{Colorizer, ImageGrid};
use crate::config::{RenderConfig, SeedPolicy};
use crate::errors::Result;
use crate::membership::Classifier;
use crate::planes::Viewport;

/// Holds the fixed parameters of a single render.  Once built it is
/// not mutated, and rendering twice gives the same image.
pub struct NebulaRenderer {
    viewport: Viewport,
    classifier: Classifier,
    colorizer: Colorizer,
    policy: SeedPolicy,
}

impl NebulaRenderer {
    /// Validates the configuration and lays out the viewport.
    pub fn new(config: &RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(NebulaRenderer {
            viewport: Viewport::from_config(config)?,
            classifier: Classifier::new(config.iterations, config.bailout),
            colorizer: Colorizer::new(config.saturation, config.shaping),
            policy: config.policy,
        })
    }

    /// The viewport being rendered.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn accumulator(&self) -> Accumulator<'_> {
        Accumulator::new(&self.viewport, self.classifier, self.policy)
    }

    /// Run every seed of the viewport's lattice, row by row, and return
    /// the filled accumulation grid.
    pub fn calculate(&self) -> (AccumulationGrid, AccumulationStats) {
        let mut grid = AccumulationGrid::for_viewport(&self.viewport);
        let accumulator = self.accumulator();
        let rows = self.viewport.sample_rows();
        let mut stats = AccumulationStats::default();
        for row in 0..rows {
            debug!("calculating row {}/{}...", row + 1, rows);
            stats += accumulator.accumulate(self.viewport.sample_row(row), &mut grid);
        }
        info!(
            "{} seeds, {} plotted, {} deposits",
            stats.seeds, stats.plotted, stats.deposits
        );
        (grid, stats)
    }

    /// Color a grid produced by `calculate`.
    pub fn colorize(&self, grid: &AccumulationGrid) -> ImageGrid {
        self.colorizer.colorize(grid)
    }

    /// Both phases.
    pub fn render(&self) -> ImageGrid {
        let (grid, _) = self.calculate();
        self.colorize(&grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Color;
    use num::Complex;

    fn small() -> RenderConfig {
        RenderConfig {
            width: 12,
            height: 8,
            center: Complex::new(-0.5, 0.0),
            view_width: 4.0,
            iterations: 64,
            bailout: 3.0,
            oversampling: 2,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn rejects_invalid_configuration() {
        let config = RenderConfig { iterations: 0, ..small() };
        assert!(NebulaRenderer::new(&config).is_err());
    }

    #[test]
    fn calculate_visits_every_seed() {
        let renderer = NebulaRenderer::new(&small()).unwrap();
        let (grid, stats) = renderer.calculate();
        assert_eq!(stats.seeds, renderer.viewport().sample_count());
        assert!(stats.plotted > 0);
        assert!(stats.deposits > 0);
        assert!(!grid.is_zero());
    }

    #[test]
    fn render_produces_a_nonblank_image() {
        let renderer = NebulaRenderer::new(&small()).unwrap();
        let image = renderer.render();
        assert_eq!((image.width(), image.height()), (12, 8));
        assert!(image.pixels().iter().any(|p| *p != Color::BLACK));
    }

    #[test]
    fn escaped_policy_renders_something_else() {
        let retained = NebulaRenderer::new(&small()).unwrap().render();
        let config = RenderConfig {
            policy: SeedPolicy::Escaped,
            ..small()
        };
        let escaped = NebulaRenderer::new(&config).unwrap().render();
        assert!(retained != escaped);
    }
}
