//! Line and disc rasterization.
//!
//! These functions only compute integer point sets; they never touch a
//! buffer. `draw_line` and `draw_disc` are thin helpers that write the
//! points with clipping.

use std::collections::BTreeSet;

use crate::buffer::{PixelBuffer, Surface};

/// An integer pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`, saturating at the ends of the `i32` range.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Rasterize the segment `from`-`to` with Bresenham's algorithm.
///
/// Returns `max(|dx|, |dy|) + 1` points ordered from `from` to `to`.
/// Reversing the endpoints yields the same points in reverse order.
pub fn line(from: Point, to: Point) -> Vec<Point> {
    let (mut x0, mut y0, mut x1, mut y1) = (from.x, from.y, to.x, to.y);

    let steep = distance(y0, y1) > distance(x0, x1);
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }

    // Always scan left to right so both directions pick identical pixels
    let reversed = x0 > x1;
    if reversed {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = distance(x0, x1);
    let dy = distance(y0, y1);
    let ystep = if y0 <= y1 { 1 } else { -1 };
    let mut err = dx / 2;
    let mut y = y0;

    let mut points = Vec::with_capacity(dx as usize + 1);
    for x in x0..=x1 {
        points.push(if steep { Point::new(y, x) } else { Point::new(x, y) });
        err -= dy;
        if err < 0 {
            y += ystep;
            err += dx;
        }
    }

    if reversed {
        points.reverse();
    }
    points
}

/// `|b - a|` widened to `i64`: endpoints anywhere in the `i32` range can be
/// more than `i32::MAX` apart.
fn distance(a: i32, b: i32) -> i64 {
    (i64::from(b) - i64::from(a)).abs()
}

/// Rasterize a filled disc inside a `diameter`-sided box with its top-left
/// corner at the origin.
///
/// Midpoint circle stepping; each of the eight symmetric arc points is
/// widened into a horizontal span. Even diameters have no centre pixel, so
/// the lower and right halves are shifted one pixel and the seam row and
/// column are drawn by both halves. The result is mirror-symmetric about
/// the box centre, deduplicated and in row-major order.
pub fn ring(diameter: u32) -> Vec<Point> {
    if diameter == 0 {
        return Vec::new();
    }

    let (radius, offset) = disc_geometry(diameter);
    let centre = radius;

    // Ordered by (y, x) for row-major output
    let mut cells: BTreeSet<(i32, i32)> = BTreeSet::new();
    let mut span = |row: i32, left: i32, right: i32| {
        for col in left..=right {
            cells.insert((row, col));
        }
    };

    let mut x = radius;
    let mut y = 0;
    let mut radius_error = 1 - x;

    while x >= y {
        span(centre + y + offset, centre - x, centre + x + offset);
        span(centre - y, centre - x, centre + x + offset);
        span(centre + x + offset, centre - y, centre + y + offset);
        span(centre - x, centre - y, centre + y + offset);

        y += 1;
        if radius_error < 0 {
            radius_error += 2 * y + 1;
        } else {
            x -= 1;
            radius_error += 2 * (y - x) + 1;
        }
    }

    cells.into_iter().map(|(y, x)| Point::new(x, y)).collect()
}

/// Radius and even-diameter seam offset for `ring`. Diameters are capped
/// at `i32::MAX` so every coordinate of the box fits a `Point`.
fn disc_geometry(diameter: u32) -> (i32, i32) {
    let diameter = i32::try_from(diameter).unwrap_or(i32::MAX);
    let offset = if diameter % 2 == 0 { 1 } else { 0 };
    ((diameter - 1) / 2, offset)
}

/// Draw a one-pixel line, clipped to the buffer. Returns pixels written.
pub fn draw_line<S: Surface>(
    buffer: &mut PixelBuffer<S>,
    from: Point,
    to: Point,
    colour: u32,
) -> usize {
    line(from, to)
        .into_iter()
        .filter(|p| buffer.put(p.x, p.y, colour))
        .count()
}

/// Draw a filled disc whose bounding box starts at `top_left`, clipped to
/// the buffer. Returns pixels written.
pub fn draw_disc<S: Surface>(
    buffer: &mut PixelBuffer<S>,
    top_left: Point,
    diameter: u32,
    colour: u32,
) -> usize {
    ring(diameter)
        .into_iter()
        .map(|p| top_left.offset(p.x, p.y))
        .filter(|p| buffer.put(p.x, p.y, colour))
        .count()
}
