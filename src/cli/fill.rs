//! Fill command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::error::{PxedError, Result};
use crate::export::{read_png, write_png};
use crate::fill::flood_fill;
use crate::output::{display_path, plural, Printer};
use crate::types::Colour;

/// Flood fill a region of an image
#[derive(Args, Debug)]
pub struct FillArgs {
    /// Image to fill
    pub input: PathBuf,

    /// Start column
    pub x: u32,

    /// Start row
    pub y: u32,

    /// Fill colour (#RGB, #RGBA, #RRGGBB or #RRGGBBAA)
    pub colour: Colour,

    /// Output PNG (default: <input>.fill.png)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: FillArgs, printer: &Printer) -> Result<()> {
    let mut buffer = read_png(&args.input)?;

    let (width, height) = buffer.size();
    if args.x >= width || args.y >= height {
        return Err(PxedError::Buffer {
            message: format!(
                "Start ({}, {}) is outside the {}x{} image",
                args.x, args.y, width, height
            ),
            help: Some(format!("Pick x < {} and y < {}", width, height)),
        });
    }

    let written = flood_fill(&mut buffer, args.x, args.y, args.colour.pack());
    printer.status(
        "Filled",
        &format!(
            "{} with {} at ({}, {})",
            plural(written, "pixel", "pixels"),
            args.colour,
            args.x,
            args.y
        ),
    );

    let output = args
        .output
        .unwrap_or_else(|| super::default_output(&args.input, "fill"));
    write_png(&buffer, &output, 1)?;
    printer.status("Wrote", &display_path(&output));

    Ok(())
}
