//! Command implementations driven against real files.

use std::fs;

use pretty_assertions::assert_eq;
use pxed::cli::{fill, palette, quantize, remap, stroke};
use pxed::output::Printer;
use pxed::{read_png, write_png, BufferData, Colour, Palette, PixelBuffer, Point};
use tempfile::tempdir;

const NIGHT: &str = "name: night\ncolours:\n  - \"#00000000\"\n  - \"#000000\"\n  - \"#FFFFFF\"\n  - \"#E94560\"\n";
const DAWN: &str = "name: dawn\ncolours:\n  - \"#00000000\"\n  - \"#202040\"\n  - \"#FFF0D0\"\n  - \"#E94560\"\n";

#[test]
fn fill_command_writes_filled_png() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("box.png");
    let output = dir.path().join("out.png");

    let mut source = PixelBuffer::new(4, 4).unwrap();
    source.plot(|x, _| if x == 2 { Colour::BLACK.pack() } else { Colour::WHITE.pack() });
    write_png(&source, &input, 1).unwrap();

    fill::run(
        fill::FillArgs {
            input: input.clone(),
            x: 0,
            y: 0,
            colour: Colour::rgb(255, 0, 0),
            output: Some(output.clone()),
        },
        &Printer::silent(),
    )
    .unwrap();

    let result = read_png(&output).unwrap();
    let red = Colour::rgb(255, 0, 0).pack();
    assert_eq!(result.get_pixel(1, 3), red);
    assert_eq!(result.get_pixel(2, 0), Colour::BLACK.pack());
    assert_eq!(result.get_pixel(3, 0), Colour::WHITE.pack());
}

#[test]
fn fill_command_rejects_start_outside_image() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("tiny.png");
    write_png(&PixelBuffer::new(2, 2).unwrap(), &input, 1).unwrap();

    let result = fill::run(
        fill::FillArgs {
            input,
            x: 5,
            y: 0,
            colour: Colour::BLACK,
            output: None,
        },
        &Printer::silent(),
    );
    assert!(result.is_err());
}

#[test]
fn stroke_command_on_blank_canvas() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("stroke.png");

    stroke::run(
        stroke::StrokeArgs {
            input: None,
            size: Some((10, 5)),
            points: vec![Point::new(2, 2), Point::new(7, 2)],
            diameter: 3,
            colour: Colour::BLACK,
            erase: false,
            output: Some(output.clone()),
        },
        &Printer::silent(),
    )
    .unwrap();

    let result = read_png(&output).unwrap();
    let painted = result.pixels().iter().filter(|&&p| p != 0).count();
    // 6 + 8 + 6 cells of the swept plus-shaped tip
    assert_eq!(painted, 20);
}

#[test]
fn quantize_command_writes_png_and_indices() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("art.png");
    let palette_path = dir.path().join("night.yaml");
    let output = dir.path().join("art.q.png");
    let indices = dir.path().join("art.json");
    fs::write(&palette_path, NIGHT).unwrap();

    let source = PixelBuffer::with_pixels(
        3,
        1,
        vec![
            Colour::rgb(10, 10, 10).pack(),
            Colour::rgb(240, 60, 90).pack(),
            0,
        ],
    )
    .unwrap();
    write_png(&source, &input, 1).unwrap();

    quantize::run(
        quantize::QuantizeArgs {
            input,
            palette: Some(palette_path),
            output: Some(output.clone()),
            scale: 2,
            indices: Some(indices.clone()),
        },
        &Printer::silent(),
    )
    .unwrap();

    let data: BufferData = serde_json::from_str(&fs::read_to_string(&indices).unwrap()).unwrap();
    assert_eq!(data.pixels, vec![1, 3, 0]);

    let img = image::open(&output).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (6, 2));
    assert_eq!(img.get_pixel(3, 1).0, [0xE9, 0x45, 0x60, 255]);
}

#[test]
fn remap_command_swaps_palette_colours() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("scene.png");
    let from = dir.path().join("night.yaml");
    let to = dir.path().join("dawn.yaml");
    let output = dir.path().join("scene.dawn.png");
    fs::write(&from, NIGHT).unwrap();
    fs::write(&to, DAWN).unwrap();

    let source = PixelBuffer::with_pixels(
        2,
        1,
        vec![Colour::BLACK.pack(), Colour::WHITE.pack()],
    )
    .unwrap();
    write_png(&source, &input, 1).unwrap();

    remap::run(
        remap::RemapArgs {
            input,
            from,
            to: to.clone(),
            output: Some(output.clone()),
        },
        &Printer::silent(),
    )
    .unwrap();

    let dawn = Palette::load(&to).unwrap();
    let result = read_png(&output).unwrap();
    assert_eq!(
        result.pixels(),
        &[dawn.get(1).unwrap().pack(), dawn.get(2).unwrap().pack()]
    );
}

#[test]
fn palette_command_accepts_extracted_image() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("swatch.png");
    let source = PixelBuffer::with_pixels(
        3,
        1,
        vec![Colour::WHITE.pack(), Colour::WHITE.pack(), Colour::BLACK.pack()],
    )
    .unwrap();
    write_png(&source, &input, 1).unwrap();

    palette::run(
        palette::PaletteArgs {
            file: input,
            max: Some(4),
        },
        &Printer::silent(),
    )
    .unwrap();
}

#[test]
fn palette_command_reports_image_without_opaque_colours() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("clear.png");
    write_png(&PixelBuffer::new(4, 4).unwrap(), &input, 1).unwrap();

    let err = palette::run(
        palette::PaletteArgs {
            file: input,
            max: None,
        },
        &Printer::silent(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("No opaque colours"), "{}", err);
}

#[test]
fn palette_command_rejects_max_zero() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("dot.png");
    let source = PixelBuffer::with_pixels(1, 1, vec![Colour::WHITE.pack()]).unwrap();
    write_png(&source, &input, 1).unwrap();

    let err = palette::run(
        palette::PaletteArgs {
            file: input,
            max: Some(0),
        },
        &Printer::silent(),
    )
    .unwrap_err();
    assert!(matches!(err, pxed::PxedError::Palette { .. }));
}
