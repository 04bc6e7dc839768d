//! Flood fill.

use crate::buffer::{PixelBuffer, Surface};

/// 4-connected neighbour offsets: N, E, S, W.
const NEIGHBOURS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Replace the 4-connected region of pixels equal to the pixel at `(x, y)`
/// with `colour`.
///
/// Uses an explicit stack and a visited grid, so it never recurses and
/// writes each pixel at most once. Pixels of any other colour bound the
/// region, even one pixel thick ones. Works on the pixel array; commit
/// afterwards to present the result. Returns the number of pixels written.
///
/// # Panics
///
/// If `(x, y)` is outside the buffer.
pub fn flood_fill<S: Surface>(buffer: &mut PixelBuffer<S>, x: u32, y: u32, colour: u32) -> usize {
    let (width, height) = buffer.size();
    assert!(
        x < width && y < height,
        "flood fill start ({}, {}) outside {}x{} buffer",
        x,
        y,
        width,
        height
    );

    let initial = buffer.get_pixel(x, y);
    let stride = width as usize;
    let mut visited = vec![false; stride * height as usize];
    let mut stack = vec![(x as i32, y as i32)];
    visited[y as usize * stride + x as usize] = true;
    let mut written = 0;

    while let Some((cx, cy)) = stack.pop() {
        buffer.put(cx, cy, colour);
        written += 1;

        for (dx, dy) in NEIGHBOURS {
            let (nx, ny) = (cx + dx, cy + dy);
            // bounds first: the index below is only valid inside the buffer
            if !buffer.contains(nx, ny) {
                continue;
            }
            let index = ny as usize * stride + nx as usize;
            if !visited[index] && buffer.pixels()[index] == initial {
                visited[index] = true;
                stack.push((nx, ny));
            }
        }
    }

    written
}
