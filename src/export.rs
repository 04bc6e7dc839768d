//! PNG import and export.
//!
//! Converts buffers to and from `image::RgbaImage`, with optional integer
//! scaling on export. This is the only module that touches image files.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::buffer::{PixelBuffer, Surface};
use crate::error::{PxedError, Result};
use crate::types::Colour;

/// Convert a buffer's pixel array to an RGBA image.
///
/// Uses nearest-neighbour scaling for crisp pixel art. A scale of 0 is
/// treated as 1.
pub fn to_rgba_image<S: Surface>(buffer: &PixelBuffer<S>, scale: u32) -> RgbaImage {
    let scale = scale.max(1);
    let (width, height) = buffer.size();

    ImageBuffer::from_fn(width * scale, height * scale, |px, py| {
        Rgba(Colour::unpack(buffer.get_pixel(px / scale, py / scale)).to_rgba())
    })
}

/// Copy an RGBA image into a new buffer.
pub fn from_rgba_image(img: &RgbaImage) -> Result<PixelBuffer> {
    let pixels = img
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            Colour::new(r, g, b, a).pack()
        })
        .collect();
    PixelBuffer::with_pixels(img.width(), img.height(), pixels)
}

/// Write a buffer to a PNG file.
///
/// # Arguments
///
/// * `buffer` - The buffer to write (its pixel array, not the surface)
/// * `path` - Output file path
/// * `scale` - Integer scale factor (1 = no scaling)
pub fn write_png<S: Surface>(buffer: &PixelBuffer<S>, path: &Path, scale: u32) -> Result<()> {
    to_rgba_image(buffer, scale)
        .save(path)
        .map_err(|e| PxedError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })
}

/// Read a PNG (or any format `image` decodes) into a buffer.
pub fn read_png(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)
        .map_err(|e| PxedError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read image: {}", e),
        })?
        .to_rgba8();
    from_rgba_image(&img)
}
