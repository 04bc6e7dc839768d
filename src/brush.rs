//! Brush stamping.
//!
//! A brush is an ordinary `PixelBuffer` used as a stamp. `stamp_stroke`
//! composites it at every point of a rasterized segment, centred on the
//! path. Composition goes straight onto the destination's presentation
//! surface, one pixel at a time, so the destination array is stale after a
//! stroke and readers must `fetch` it.
//!
//! Freehand strokes are a chain of calls: a dab with `from == to` at the
//! first sample, then one segment per new sample starting at the previous
//! one. `Stroke` keeps that previous sample for callers that want it.

use std::borrow::Cow;

use crate::buffer::{PixelBuffer, Surface};
use crate::error::Result;
use crate::raster::{self, Point};
use crate::types::Colour;

/// How brush pixels combine with the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Source-over: the brush is painted on top.
    #[default]
    Paint,
    /// Destination-out: brush alpha removes destination alpha.
    Erase,
}

impl CompositeMode {
    /// Blend one packed source pixel onto one packed destination pixel.
    pub fn blend(self, src: u32, dst: u32) -> u32 {
        let s = Colour::unpack(src);
        let d = Colour::unpack(dst);
        match self {
            CompositeMode::Paint => source_over(s, d).pack(),
            CompositeMode::Erase => destination_out(s, d).pack(),
        }
    }
}

/// `outA = sa + da(1 - sa)`, colour weighted by each side's coverage.
fn source_over(s: Colour, d: Colour) -> Colour {
    if s.a == 255 {
        return s;
    }
    if s.a == 0 {
        return d;
    }

    let sa = s.alpha();
    let da = d.alpha() * (1.0 - sa);
    let out_a = sa + da;
    let channel = |sc: u8, dc: u8| -> u8 {
        ((f32::from(sc) * sa + f32::from(dc) * da) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    Colour::new(
        channel(s.r, d.r),
        channel(s.g, d.g),
        channel(s.b, d.b),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

/// `da' = da(1 - sa)`, colour untouched.
fn destination_out(s: Colour, d: Colour) -> Colour {
    let a = (f32::from(d.a) * (1.0 - s.alpha())).round().clamp(0.0, 255.0) as u8;
    Colour { a, ..d }
}

/// The stamp anchor: `(floor(width / 2), floor(height / 2))`.
pub fn centre<B: Surface>(brush: &PixelBuffer<B>) -> Point {
    Point::new((brush.width() / 2) as i32, (brush.height() / 2) as i32)
}

/// A round brush of the given diameter, transparent outside the disc.
pub fn round(diameter: u32, colour: Colour) -> Result<PixelBuffer> {
    let mut brush = PixelBuffer::new(diameter, diameter)?;
    for p in raster::ring(diameter) {
        brush.put(p.x, p.y, colour.pack());
    }
    brush.commit();
    Ok(brush)
}

/// A fully covered square brush.
pub fn square(size: u32, colour: Colour) -> Result<PixelBuffer> {
    let mut brush = PixelBuffer::new(size, size)?;
    brush.fill(colour.pack());
    brush.commit();
    Ok(brush)
}

/// Stamp `brush` at every point of the segment `from`-`to`.
///
/// The brush is centred on each path point. Brush pixels falling outside
/// the destination are dropped, however far out the path runs. A brush
/// whose own surface was composed since its last fetch stamps what that
/// surface shows. Returns the number of stamps, which is at least one.
pub fn stamp_stroke<S: Surface, B: Surface>(
    destination: &mut PixelBuffer<S>,
    brush: &PixelBuffer<B>,
    from: Point,
    to: Point,
    mode: CompositeMode,
) -> usize {
    let anchor = centre(brush);
    let path = raster::line(from, to);

    let (brush_w, brush_h) = brush.size();
    let source = brush_pixels(brush);

    destination.compose(|surface, width, height| {
        for point in &path {
            // Top-left corner in i64 so points near the i32 limits clip
            let left = i64::from(point.x) - i64::from(anchor.x);
            let top = i64::from(point.y) - i64::from(anchor.y);
            for by in 0..brush_h {
                let y = top + i64::from(by);
                if y < 0 || y >= i64::from(height) {
                    continue;
                }
                for bx in 0..brush_w {
                    let x = left + i64::from(bx);
                    if x < 0 || x >= i64::from(width) {
                        continue;
                    }
                    let src = source[(by * brush_w + bx) as usize];
                    let dst = surface.read(x as u32, y as u32);
                    surface.write(x as u32, y as u32, mode.blend(src, dst));
                }
            }
        }
    });

    path.len()
}

/// The brush image as presented: the pixel array, or the surface while the
/// array is stale.
fn brush_pixels<B: Surface>(brush: &PixelBuffer<B>) -> Cow<'_, [u32]> {
    if !brush.is_stale() {
        return Cow::Borrowed(brush.pixels());
    }
    let (width, height) = brush.size();
    let surface = brush.surface();
    Cow::Owned(
        (0..height)
            .flat_map(|y| (0..width).map(move |x| surface.read(x, y)))
            .collect(),
    )
}

/// A freehand stroke in progress: remembers the last sample so each new
/// sample continues the line from there.
#[derive(Debug)]
pub struct Stroke<'a, B: Surface> {
    brush: &'a PixelBuffer<B>,
    mode: CompositeMode,
    last: Option<Point>,
}

impl<'a, B: Surface> Stroke<'a, B> {
    pub fn new(brush: &'a PixelBuffer<B>, mode: CompositeMode) -> Self {
        Self {
            brush,
            mode,
            last: None,
        }
    }

    /// Add a sample. The first one dabs; later ones draw from the previous
    /// sample. Returns the number of stamps.
    pub fn add<S: Surface>(&mut self, destination: &mut PixelBuffer<S>, point: Point) -> usize {
        let from = self.last.unwrap_or(point);
        self.last = Some(point);
        stamp_stroke(destination, self.brush, from, point, self.mode)
    }

    /// The most recent sample, if any.
    pub fn last(&self) -> Option<Point> {
        self.last
    }
}
