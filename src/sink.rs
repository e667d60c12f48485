// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writes finished images to disk.  The format follows the file
//! extension; anything the `image` crate can encode as 8-bit RGB will
//! do.

use image::ColorType;
use log::debug;
use std::path::Path;

use crate::colorize::ImageGrid;
use crate::errors::{NebulaError, Result};

/// Write a packed, row-major RGB buffer of the given dimensions.
pub fn write_image<P: AsRef<Path>>(
    path: P,
    pixels: &[u8],
    width: usize,
    height: usize,
) -> Result<()> {
    let limit = u32::max_value() as usize;
    if pixels.len() != width * height * 3 || width > limit || height > limit {
        return Err(NebulaError::BufferSize(pixels.len(), width, height));
    }
    debug!("writing {}x{} image to {}", width, height, path.as_ref().display());
    image::save_buffer(path, pixels, width as u32, height as u32, ColorType::RGB(8))?;
    Ok(())
}

impl ImageGrid {
    /// Write the image to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_image(path, &self.to_rgb_bytes(), self.width(), self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn rejects_mismatched_buffers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.bmp");
        match write_image(&path, &[0; 5], 2, 1) {
            Err(NebulaError::BufferSize(5, 2, 1)) => (),
            other => panic!("unexpected {:?}", other),
        }
        assert!(!path.exists());
    }

    #[test]
    fn writes_a_bitmap() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiny.bmp");
        write_image(&path, &[255, 0, 0, 0, 255, 0], 2, 1).unwrap();
        let written = image::open(&path).unwrap().to_rgb();
        assert_eq!(written.dimensions(), (2, 1));
        assert_eq!(written.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(written.get_pixel(1, 0).0, [0, 255, 0]);
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.bmp");
        match write_image(&path, &[0; 3], 1, 1) {
            Err(NebulaError::Io(_)) => (),
            other => panic!("unexpected {:?}", other),
        }
    }
}
