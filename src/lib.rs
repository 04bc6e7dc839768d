//! pxed - Pixel-editing engine
//!
//! Raster primitives for a pixel-art editor: Bresenham lines and filled
//! discs, brush stamping along freehand strokes, flood fill, and palette
//! quantization to and from indexed buffers. The engine works on in-memory
//! `PixelBuffer`s; the `export` module and the CLI handle files.

pub mod brush;
pub mod buffer;
pub mod cli;
pub mod error;
pub mod export;
pub mod fill;
pub mod output;
pub mod quantize;
pub mod raster;
pub mod types;

pub use brush::{stamp_stroke, CompositeMode, Stroke};
pub use buffer::{BufferData, MemorySurface, PixelBuffer, Surface, SyncState};
pub use error::{PxedError, Result};
pub use export::{read_png, write_png};
pub use fill::flood_fill;
pub use quantize::{materialize, nearest_index, quantize, remap_by_index, replace_color};
pub use raster::{draw_disc, draw_line, line, ring, Point};
pub use types::{Colour, Palette};
