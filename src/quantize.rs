//! Palette quantization and index remapping.
//!
//! Converts full-colour buffers into indexed buffers (each pixel holds a
//! palette index) and back. Quantization decides each distinct colour once,
//! so every pixel of the same colour gets the same index.

use std::collections::HashMap;

use crate::buffer::{PixelBuffer, Surface};
use crate::types::{Colour, Palette, RESERVED_INDEX};

/// Alpha at or below this fraction quantizes to the reserved index.
pub const ALPHA_THRESHOLD: f32 = 0.5;

/// Pick the palette index for a single colour.
///
/// Transparent-ish colours (alpha ≤ 0.5) map to the reserved index 0.
/// Anything else maps to the nearest entry among indices `1..len` by
/// Euclidean RGB distance; on a tie the lowest index wins.
pub fn nearest_index(colour: Colour, palette: &Palette) -> usize {
    if colour.alpha() <= ALPHA_THRESHOLD {
        return RESERVED_INDEX;
    }

    let mut best_index = RESERVED_INDEX + 1;
    let mut best_diff = u32::MAX;
    for (index, candidate) in palette.iter().enumerate().skip(RESERVED_INDEX + 1) {
        let diff = colour.distance_sq(candidate);
        // strict: ties keep the earlier index
        if diff < best_diff {
            best_diff = diff;
            best_index = index;
        }
    }
    best_index
}

/// Quantize a full-colour buffer into a new indexed buffer.
pub fn quantize<S: Surface>(source: &PixelBuffer<S>, palette: &Palette) -> PixelBuffer {
    let mut mapping: HashMap<u32, u32> = HashMap::new();
    for &pixel in source.pixels() {
        mapping
            .entry(pixel)
            .or_insert_with(|| nearest_index(Colour::unpack(pixel), palette) as u32);
    }

    map_into(source, |pixel| mapping[&pixel])
}

/// Turn an indexed buffer back into colours. Indices outside the palette
/// become transparent.
pub fn materialize<S: Surface>(indexed: &PixelBuffer<S>, palette: &Palette) -> PixelBuffer {
    let packed = palette.packed();
    map_into(indexed, |index| {
        packed
            .get(index as usize)
            .copied()
            .unwrap_or(Colour::TRANSPARENT.pack())
    })
}

/// Recolour a full-colour buffer after a palette edit: every pixel equal to
/// `old[i]` becomes `new[i]`. Pixels matching no old entry are left alone.
/// If `old` repeats a colour, the later index wins.
pub fn remap_by_index<S: Surface>(buffer: &mut PixelBuffer<S>, old: &Palette, new: &Palette) {
    let mapping: HashMap<u32, u32> = old
        .iter()
        .zip(new.iter())
        .map(|(from, to)| (from.pack(), to.pack()))
        .collect();

    for pixel in buffer.pixels_mut() {
        if let Some(&to) = mapping.get(&*pixel) {
            *pixel = to;
        }
    }
}

/// Replace every pixel exactly equal to `prev` with `next`. Returns how
/// many pixels changed.
pub fn replace_color<S: Surface>(buffer: &mut PixelBuffer<S>, prev: u32, next: u32) -> usize {
    let mut replaced = 0;
    for pixel in buffer.pixels_mut().iter_mut().filter(|p| **p == prev) {
        *pixel = next;
        replaced += 1;
    }
    replaced
}

/// Build a same-sized memory buffer by mapping each source pixel.
fn map_into<S: Surface>(source: &PixelBuffer<S>, f: impl FnMut(u32) -> u32) -> PixelBuffer {
    let pixels = source.pixels().iter().copied().map(f).collect();
    PixelBuffer::from_valid(source.width(), source.height(), pixels)
}
