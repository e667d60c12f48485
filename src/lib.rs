#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Nebulabrot renderer
//!
//! The Buddhabrot (and the Nebulabrot) are variants of the Mandelbrot
//! set that plot where orbits go rather than how fast they leave.
//! Every seed on a fine lattice over the plane is iterated; each
//! iterate is itself a point on the plane, and the pixel under it is
//! credited with the visit.
//!
//! This renderer keeps the orbits of the seeds that stay bounded, the
//! black heart of the Mandelbrot, and instead of counting visits it
//! adds the seed itself into each pixel its orbit touches.  Each pixel
//! then holds a complex number: its phase says where on the plane the
//! visitors came from, and becomes the hue; its magnitude says how
//! many came, and becomes the lightness.
//!
//! ```no_run
//! use nebulabrot::{render, RenderConfig};
//!
//! let image = render(&RenderConfig::default()).unwrap();
//! image.save("nebulabrot.bmp").unwrap();
//! ```

extern crate failure;
extern crate image;
extern crate itertools;
extern crate num;

pub mod accumulate;
pub mod colorize;
pub mod colors;
pub mod config;
pub mod errors;
pub mod membership;
pub mod nebula;
pub mod planes;
pub mod sink;

pub use crate::accumulate::{AccumulationGrid, AccumulationStats, Accumulator};
pub use crate::colorize::{Colorizer, ImageGrid, Shaping};
pub use crate::colors::{hsl_to_rgb, hsv_to_rgb, Color};
pub use crate::config::{RenderConfig, SeedPolicy};
pub use crate::errors::{NebulaError, Result};
pub use crate::membership::{Classifier, Verdict};
pub use crate::nebula::NebulaRenderer;
pub use crate::planes::{Pixel, Viewport};

/// Validate a configuration and run both phases.
pub fn render(config: &RenderConfig) -> Result<ImageGrid> {
    Ok(NebulaRenderer::new(config)?.render())
}
