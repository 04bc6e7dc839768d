//! Core value types for pxed.
//!
//! - `Colour` - RGBA colour values and the packed pixel layout
//! - `Palette` - Ordered colour palettes with a reserved index 0

mod colour;
mod palette;

pub use colour::Colour;
pub use palette::{Palette, MIN_PALETTE_LEN, RESERVED_INDEX};
