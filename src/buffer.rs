//! Pixel buffers and their presentation surfaces.
//!
//! A `PixelBuffer` keeps two copies of its image: the in-memory pixel array
//! that the engine mutates, and a presentation `Surface` (a texture, a window,
//! an image) that the host displays. Array edits reach the surface through
//! `commit`. Writes made straight onto the surface (brush composition) leave
//! the array `Stale` until a reader calls `fetch`.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{PxedError, Result};
use crate::types::Colour;

/// Backing store a buffer presents through.
///
/// Pixels cross this boundary in the packed `0xRRGGBBAA` layout. Callers only
/// ever pass coordinates inside `size()`.
pub trait Surface {
    /// Dimensions as (width, height).
    fn size(&self) -> (u32, u32);

    /// Read one packed pixel.
    fn read(&self, x: u32, y: u32) -> u32;

    /// Overwrite one packed pixel.
    fn write(&mut self, x: u32, y: u32, pixel: u32);
}

/// A plain in-memory surface, the default backing for new buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySurface {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl MemorySurface {
    /// Create a transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    /// The surface contents, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }
}

impl Surface for MemorySurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn read(&self, x: u32, y: u32) -> u32 {
        self.pixels[(y * self.width + x) as usize]
    }

    fn write(&mut self, x: u32, y: u32, pixel: u32) {
        self.pixels[(y * self.width + x) as usize] = pixel;
    }
}

impl Surface for RgbaImage {
    fn size(&self) -> (u32, u32) {
        self.dimensions()
    }

    fn read(&self, x: u32, y: u32) -> u32 {
        let [r, g, b, a] = self.get_pixel(x, y).0;
        Colour::new(r, g, b, a).pack()
    }

    fn write(&mut self, x: u32, y: u32, pixel: u32) {
        self.put_pixel(x, y, Rgba(Colour::unpack(pixel).to_rgba()));
    }
}

/// Whether the pixel array is current with respect to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// The array holds the latest pixels.
    #[default]
    Fresh,
    /// The surface was written directly; the array must be fetched.
    Stale,
}

/// Serialized form of a drawing: the raw pixel array and its dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

/// A rectangular grid of packed colours.
#[derive(Debug, Clone)]
pub struct PixelBuffer<S: Surface = MemorySurface> {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    surface: S,
    sync: SyncState,
}

impl PixelBuffer<MemorySurface> {
    /// Create a transparent buffer backed by an in-memory surface.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        check_size(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
            surface: MemorySurface::new(width, height),
            sync: SyncState::Fresh,
        })
    }

    /// Create a buffer from an existing row-major pixel array.
    pub fn with_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self> {
        check_size(width, height)?;
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(PxedError::Buffer {
                message: format!(
                    "{}x{} buffer needs {} pixels, got {}",
                    width,
                    height,
                    expected,
                    pixels.len()
                ),
                help: None,
            });
        }
        Ok(Self::from_valid(width, height, pixels))
    }

    /// Build a committed buffer from parts already known to be consistent.
    pub(crate) fn from_valid(width: u32, height: u32, pixels: Vec<u32>) -> Self {
        let mut buffer = Self {
            width,
            height,
            pixels,
            surface: MemorySurface::new(width, height),
            sync: SyncState::Fresh,
        };
        buffer.commit();
        buffer
    }

    /// Rebuild a buffer from its serialized form.
    pub fn from_data(data: BufferData) -> Result<Self> {
        Self::with_pixels(data.width, data.height, data.pixels)
    }
}

impl<S: Surface> PixelBuffer<S> {
    /// Wrap an existing surface. The buffer starts `Stale` so the first
    /// reader pulls the surface contents into the array.
    pub fn from_surface(surface: S) -> Result<Self> {
        let (width, height) = surface.size();
        check_size(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
            surface,
            sync: SyncState::Stale,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Check whether a signed coordinate lies inside the buffer.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Read a pixel.
    ///
    /// # Panics
    ///
    /// If `(x, y)` is outside the buffer.
    pub fn get_pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[self.index(x, y)]
    }

    /// Overwrite a pixel. No blending.
    ///
    /// # Panics
    ///
    /// If `(x, y)` is outside the buffer.
    pub fn set_pixel(&mut self, x: u32, y: u32, colour: u32) {
        let index = self.index(x, y);
        self.pixels[index] = colour;
    }

    /// Read a pixel, or `None` outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        self.contains(x, y)
            .then(|| self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Write a pixel if it lies inside the buffer. Returns whether it did.
    pub fn put(&mut self, x: i32, y: i32, colour: u32) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        self.pixels[y as usize * self.width as usize + x as usize] = colour;
        true
    }

    /// Set every pixel to `colour`.
    pub fn fill(&mut self, colour: u32) {
        self.pixels.fill(colour);
    }

    /// Set every pixel from a per-coordinate function.
    pub fn plot(&mut self, mut f: impl FnMut(u32, u32) -> u32) {
        let width = self.width as usize;
        for (i, pixel) in self.pixels.iter_mut().enumerate() {
            *pixel = f((i % width) as u32, (i / width) as u32);
        }
    }

    /// Read-only snapshot of the pixel array, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Mutable access to the pixel array, row-major.
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// The presentation surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Unwrap into the presentation surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn sync_state(&self) -> SyncState {
        self.sync
    }

    pub fn is_stale(&self) -> bool {
        self.sync == SyncState::Stale
    }

    /// Push the pixel array to the surface.
    pub fn commit(&mut self) {
        let width = self.width as usize;
        for (i, &pixel) in self.pixels.iter().enumerate() {
            self.surface
                .write((i % width) as u32, (i / width) as u32, pixel);
        }
        self.sync = SyncState::Fresh;
    }

    /// Pull the surface back into the pixel array.
    ///
    /// Only valid while `Stale`; a `Fresh` array has nothing to fetch and
    /// pulling would discard uncommitted edits.
    pub fn fetch(&mut self) -> Result<()> {
        if self.sync == SyncState::Fresh {
            return Err(PxedError::Sync {
                message: "fetch called on a fresh buffer".to_string(),
            });
        }
        self.pull();
        Ok(())
    }

    /// Fetch if stale. Returns whether a fetch happened.
    pub fn refresh(&mut self) -> bool {
        if self.sync == SyncState::Stale {
            self.pull();
            true
        } else {
            false
        }
    }

    /// Write straight onto the surface, bypassing the pixel array.
    ///
    /// The closure receives the surface and the buffer dimensions. The
    /// array is `Stale` afterwards.
    pub fn compose<R>(&mut self, f: impl FnOnce(&mut S, u32, u32) -> R) -> R {
        let result = f(&mut self.surface, self.width, self.height);
        self.sync = SyncState::Stale;
        result
    }

    /// Serialized form of the pixel array.
    pub fn to_data(&self) -> BufferData {
        BufferData {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }

    fn pull(&mut self) {
        let width = self.width as usize;
        for (i, pixel) in self.pixels.iter_mut().enumerate() {
            *pixel = self.surface.read((i % width) as u32, (i / width) as u32);
        }
        self.sync = SyncState::Fresh;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} buffer",
            x,
            y,
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }
}

fn check_size(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(PxedError::Buffer {
            message: format!("Invalid buffer size {}x{}", width, height),
            help: Some("Buffers must be at least 1x1".to_string()),
        });
    }
    Ok(())
}
