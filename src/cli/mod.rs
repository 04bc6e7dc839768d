pub mod completions;
pub mod fill;
pub mod palette;
pub mod quantize;
pub mod remap;
pub mod stroke;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::error::{PxedError, Result};
use crate::raster::Point;
use crate::types::Palette;

/// pxed - Pixel-editing engine: strokes, fills and palette quantization
#[derive(Parser, Debug)]
#[command(name = "pxed")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress status lines on stderr
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Quantize an image to a palette
    Quantize(quantize::QuantizeArgs),

    /// Flood fill a region of an image
    Fill(fill::FillArgs),

    /// Draw a freehand stroke with a round brush
    Stroke(stroke::StrokeArgs),

    /// Recolour an image after a palette edit
    Remap(remap::RemapArgs),

    /// Extract a colour palette from an image
    Palette(palette::PaletteArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Largest coordinate magnitude accepted on the command line. Strokes are
/// rasterized in full before clipping, so far-off samples cost memory.
pub const MAX_COORDINATE: i32 = 1 << 20;

/// Parse an `x,y` point.
pub fn parse_point(s: &str) -> Result<Point> {
    let invalid = || PxedError::Parse {
        message: format!("Invalid point: {}", s),
        help: Some("Use x,y with integer coordinates, e.g. 4,-2".to_string()),
    };
    let (x, y) = s.split_once(',').ok_or_else(invalid)?;
    let x: i32 = x.trim().parse().map_err(|_| invalid())?;
    let y: i32 = y.trim().parse().map_err(|_| invalid())?;
    if x.unsigned_abs() > MAX_COORDINATE as u32 || y.unsigned_abs() > MAX_COORDINATE as u32 {
        return Err(PxedError::Parse {
            message: format!("Point out of range: {}", s),
            help: Some(format!("Coordinates must lie within ±{}", MAX_COORDINATE)),
        });
    }
    Ok(Point::new(x, y))
}

/// Parse a `WxH` size.
pub fn parse_size(s: &str) -> Result<(u32, u32)> {
    let invalid = || PxedError::Parse {
        message: format!("Invalid size: {}", s),
        help: Some("Use WxH, e.g. 64x48".to_string()),
    };
    let (w, h) = s.split_once(['x', 'X']).ok_or_else(invalid)?;
    let w = w.trim().parse().map_err(|_| invalid())?;
    let h = h.trim().parse().map_err(|_| invalid())?;
    Ok((w, h))
}

/// Load a palette file, or the builtin PICO-8 palette when none is given.
pub fn load_palette(path: Option<&Path>) -> Result<Palette> {
    match path {
        Some(path) => Palette::load(path),
        None => Ok(Palette::pico8()),
    }
}

/// `sprite.png` + `fill` → `sprite.fill.png`, next to the input.
pub fn default_output(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    input.with_file_name(format!("{}.{}.png", stem, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("4,-2").unwrap(), Point::new(4, -2));
        assert_eq!(parse_point(" 3 , 7 ").unwrap(), Point::new(3, 7));
        assert!(parse_point("4").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn test_parse_point_range() {
        assert_eq!(
            parse_point("-1048576,1048576").unwrap(),
            Point::new(-MAX_COORDINATE, MAX_COORDINATE)
        );
        assert!(parse_point("2147483647,0").is_err());
        assert!(parse_point("0,-2147483648").is_err());
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("64x48").unwrap(), (64, 48));
        assert_eq!(parse_size("8X8").unwrap(), (8, 8));
        assert!(parse_size("64").is_err());
        assert!(parse_size("-1x4").is_err());
    }

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("art/sprite.png"), "fill"),
            PathBuf::from("art/sprite.fill.png")
        );
    }

    #[test]
    fn test_load_palette_default() {
        assert_eq!(load_palette(None).unwrap().name, "pico8");
    }

    #[test]
    fn test_cli_parses_stroke() {
        let cli = Cli::try_parse_from([
            "pxed", "stroke", "--size", "8x8", "-p", "1,1", "-p", "6,6", "--erase",
        ])
        .unwrap();
        match cli.command {
            Commands::Stroke(args) => {
                assert_eq!(args.points, vec![Point::new(1, 1), Point::new(6, 6)]);
                assert_eq!(args.size, Some((8, 8)));
                assert!(args.erase);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
