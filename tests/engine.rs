//! End-to-end behaviour of the drawing and palette engine.

use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use pxed::brush::{self, CompositeMode, Stroke};
use pxed::{
    flood_fill, line, materialize, quantize, ring, stamp_stroke, Colour, Palette, PixelBuffer,
    Point,
};

/// Render painted cells as `#` and the rest as `.`, one line per row.
fn ascii(width: i32, height: i32, painted: impl Fn(i32, i32) -> bool) -> String {
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| if painted(x, y) { '#' } else { '.' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn ascii_points(size: i32, points: &[Point]) -> String {
    let set: BTreeSet<Point> = points.iter().copied().collect();
    ascii(size, size, |x, y| set.contains(&Point::new(x, y)))
}

fn ascii_buffer(buffer: &PixelBuffer) -> String {
    ascii(buffer.width() as i32, buffer.height() as i32, |x, y| {
        buffer.get(x, y).is_some_and(|p| p != 0)
    })
}

#[test]
fn disc_shapes() {
    insta::assert_snapshot!(ascii_points(5, &ring(5)), @r"
    .###.
    #####
    #####
    #####
    .###.
    ");

    insta::assert_snapshot!(ascii_points(4, &ring(4)), @r"
    .##.
    ####
    ####
    .##.
    ");

    insta::assert_snapshot!(ascii_points(6, &ring(6)), @r"
    .####.
    ######
    ######
    ######
    ######
    .####.
    ");
}

#[test]
fn single_pixel_brush_matches_line() {
    let brush = brush::square(1, Colour::BLACK).unwrap();
    let segments = [
        (Point::new(1, 1), Point::new(14, 6)),
        (Point::new(12, 0), Point::new(3, 15)),
        (Point::new(8, 8), Point::new(8, 8)),
        (Point::new(0, 15), Point::new(15, 15)),
    ];

    for (from, to) in segments {
        let mut canvas = PixelBuffer::new(16, 16).unwrap();
        stamp_stroke(&mut canvas, &brush, from, to, CompositeMode::Paint);
        canvas.fetch().unwrap();

        let painted: BTreeSet<Point> = (0..16)
            .flat_map(|y| (0..16).map(move |x| Point::new(x, y)))
            .filter(|p| canvas.get(p.x, p.y) != Some(0))
            .collect();
        let expected: BTreeSet<Point> = line(from, to).into_iter().collect();
        assert_eq!(painted, expected, "{:?} -> {:?}", from, to);
    }
}

#[test]
fn pixel_line_stroke() {
    let brush = brush::square(1, Colour::BLACK).unwrap();
    let mut canvas = PixelBuffer::new(6, 3).unwrap();
    stamp_stroke(
        &mut canvas,
        &brush,
        Point::new(0, 0),
        Point::new(5, 2),
        CompositeMode::Paint,
    );
    canvas.fetch().unwrap();

    insta::assert_snapshot!(ascii_buffer(&canvas), @r"
    ##....
    ..##..
    ....##
    ");
}

#[test]
fn round_brush_stroke() {
    let tip = brush::round(3, Colour::BLACK).unwrap();
    let mut canvas = PixelBuffer::new(10, 5).unwrap();
    let mut stroke = Stroke::new(&tip, CompositeMode::Paint);
    stroke.add(&mut canvas, Point::new(2, 2));
    stroke.add(&mut canvas, Point::new(7, 2));
    canvas.fetch().unwrap();

    insta::assert_snapshot!(ascii_buffer(&canvas), @r"
    ..........
    ..######..
    .########.
    ..######..
    ..........
    ");
}

#[test]
fn erase_stroke_after_paint() {
    let ink = brush::square(1, Colour::BLACK).unwrap();
    let eraser = brush::square(1, Colour::WHITE).unwrap();
    let mut canvas = PixelBuffer::new(5, 1).unwrap();

    stamp_stroke(&mut canvas, &ink, Point::new(0, 0), Point::new(4, 0), CompositeMode::Paint);
    stamp_stroke(&mut canvas, &eraser, Point::new(1, 0), Point::new(3, 0), CompositeMode::Erase);
    canvas.fetch().unwrap();

    let alphas: Vec<u8> = canvas.pixels().iter().map(|&p| Colour::unpack(p).a).collect();
    assert_eq!(alphas, vec![255, 0, 0, 0, 255]);
}

#[test]
fn fill_stays_inside_single_pixel_wall() {
    let a = Colour::rgb(200, 200, 200).pack();
    let b = Colour::rgb(20, 20, 20).pack();
    let c = Colour::rgb(255, 0, 0).pack();

    let mut buffer = PixelBuffer::new(8, 8).unwrap();
    buffer.fill(a);
    for y in 2..=4 {
        for x in 2..=4 {
            if (x, y) != (3, 3) {
                buffer.set_pixel(x, y, b);
            }
        }
    }

    let mut expected = buffer.pixels().to_vec();
    expected[3 * 8 + 3] = c;

    flood_fill(&mut buffer, 3, 3, c);
    assert_eq!(buffer.pixels(), expected.as_slice());

    // Filling outside covers everything except the wall and its cell
    flood_fill(&mut buffer, 0, 0, c);
    let untouched = buffer.pixels().iter().filter(|&&p| p == b).count();
    assert_eq!(untouched, 8);
    assert_eq!(buffer.pixels().iter().filter(|&&p| p == c).count(), 56);
}

#[test]
fn quantize_round_trip() {
    let palette = Palette::new(
        "night",
        vec![
            Colour::TRANSPARENT,
            Colour::rgb(0x1a, 0x1a, 0x2e),
            Colour::rgb(0x16, 0x21, 0x3e),
            Colour::rgb(0xe9, 0x45, 0x60),
            Colour::rgb(0xf5, 0xf5, 0xf5),
        ],
    )
    .unwrap();

    let mut source = PixelBuffer::new(7, 3).unwrap();
    source.plot(|x, y| palette.get(((x * 3 + y) % 5) as usize).unwrap().pack());

    let indexed = quantize(&source, &palette);
    let expected: Vec<u32> = (0..21).map(|i| ((i % 7) * 3 + i / 7) % 5).collect();
    assert_eq!(indexed.pixels(), expected.as_slice());

    let restored = materialize(&indexed, &palette);
    assert_eq!(restored.pixels(), source.pixels());
}

#[test]
fn quantize_maps_near_colours_and_transparency() {
    let palette = Palette::pico8();
    let source = PixelBuffer::with_pixels(
        4,
        1,
        vec![
            Colour::rgb(250, 5, 70).pack(),
            Colour::rgb(2, 1, 3).pack(),
            Colour::new(250, 5, 70, 40).pack(),
            Colour::rgb(40, 170, 250).pack(),
        ],
    )
    .unwrap();

    let indexed = quantize(&source, &palette);
    // red, black, erased, blue
    assert_eq!(indexed.pixels(), &[9, 1, 0, 13]);
}

#[test]
fn presentation_sync_cycle() {
    let red = Colour::rgb(255, 0, 0).pack();
    let tip = brush::square(1, Colour::BLACK).unwrap();
    let mut canvas = PixelBuffer::new(3, 1).unwrap();

    // array edit, then commit before composing on the surface
    canvas.set_pixel(0, 0, red);
    canvas.commit();
    stamp_stroke(&mut canvas, &tip, Point::new(2, 0), Point::new(2, 0), CompositeMode::Paint);

    assert!(canvas.is_stale());
    canvas.fetch().unwrap();
    assert!(!canvas.is_stale());
    assert!(canvas.fetch().is_err());

    assert_eq!(
        canvas.pixels(),
        &[red, 0, Colour::BLACK.pack()]
    );
}
