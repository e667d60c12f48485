// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong before or after the calculation.  The
//! calculation itself cannot fail: once the parameters have been
//! validated the numerical core is total.

use failure::Fail;
use std::io;

/// Errors raised by parameter validation and by the image sink.
#[derive(Debug, Fail)]
pub enum NebulaError {
    /// The iteration cap must be at least one.
    #[fail(display = "iteration cap must be positive")]
    ZeroIterations,

    /// The bailout radius must be a positive, finite number.
    #[fail(display = "bailout radius must be positive and finite, got {}", _0)]
    BadBailout(f64),

    /// The view width must be a positive, finite number.
    #[fail(display = "view width must be positive and finite, got {}", _0)]
    BadViewWidth(f64),

    /// Both image dimensions must be non-zero.
    #[fail(display = "image resolution must be non-zero, got {}x{}", _0, _1)]
    EmptyResolution(usize, usize),

    /// At least one sample per pixel is required.
    #[fail(display = "oversampling factor must be at least 1")]
    ZeroOversampling,

    /// The view center has a NaN or infinite component.
    #[fail(display = "view center must be finite, got {},{}", _0, _1)]
    BadCenter(f64, f64),

    /// The seed lattice overflows, or its step is too fine to move a
    /// coordinate at this position on the plane.
    #[fail(
        display = "a {}x{} image oversampled {} times cannot be sampled over this view",
        _0, _1, _2
    )]
    BadLattice(usize, usize, usize),

    /// Saturation is a fraction.
    #[fail(display = "saturation must lie in [0, 1], got {}", _0)]
    BadSaturation(f64),

    /// The linear shaping gain must be a positive, finite number.
    #[fail(display = "shaping gain must be positive and finite, got {}", _0)]
    BadGain(f64),

    /// A pixel buffer whose length disagrees with its stated dimensions.
    #[fail(display = "pixel buffer of {} bytes does not describe a {}x{} RGB image", _0, _1, _2)]
    BufferSize(usize, usize, usize),

    /// The image writer failed.
    #[fail(display = "could not write image: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for NebulaError {
    fn from(err: io::Error) -> Self {
        NebulaError::Io(err)
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, NebulaError>;
