//! Stroke command implementation.
//!
//! Replays a list of pointer samples as one freehand stroke: a dab at the
//! first sample, then a segment to each following sample.

use std::path::PathBuf;

use clap::Args;

use crate::brush::{self, CompositeMode, Stroke};
use crate::buffer::PixelBuffer;
use crate::error::{PxedError, Result};
use crate::export::{read_png, write_png};
use crate::output::{display_path, plural, Printer};
use crate::raster::Point;
use crate::types::Colour;

/// Draw a freehand stroke with a round brush
#[derive(Args, Debug)]
pub struct StrokeArgs {
    /// Image to draw on (omit and pass --size for a blank canvas)
    pub input: Option<PathBuf>,

    /// Blank canvas size, WxH
    #[arg(long, value_parser = super::parse_size, conflicts_with = "input")]
    pub size: Option<(u32, u32)>,

    /// Stroke sample as x,y (repeat for each sample)
    #[arg(long = "point", short = 'p', value_parser = super::parse_point, required = true, allow_hyphen_values = true)]
    pub points: Vec<Point>,

    /// Brush diameter in pixels
    #[arg(long, default_value = "3")]
    pub diameter: u32,

    /// Brush colour
    #[arg(long, default_value = "#000000")]
    pub colour: Colour,

    /// Erase instead of paint
    #[arg(long)]
    pub erase: bool,

    /// Output PNG (default: <input>.stroke.png, or stroke.png for a blank canvas)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: StrokeArgs, printer: &Printer) -> Result<()> {
    let mut canvas = match (&args.input, args.size) {
        (Some(input), _) => read_png(input)?,
        (None, Some((width, height))) => PixelBuffer::new(width, height)?,
        (None, None) => {
            return Err(PxedError::Parse {
                message: "No canvas to draw on".to_string(),
                help: Some("Pass an input image or --size WxH".to_string()),
            })
        }
    };

    let tip = brush::round(args.diameter, args.colour)?;
    let mode = if args.erase {
        CompositeMode::Erase
    } else {
        CompositeMode::Paint
    };

    let mut stroke = Stroke::new(&tip, mode);
    let stamps: usize = args
        .points
        .iter()
        .map(|&point| stroke.add(&mut canvas, point))
        .sum();
    canvas.refresh();

    let verb = if args.erase { "Erased" } else { "Painted" };
    printer.status(
        verb,
        &format!(
            "{} through {} with a {}px brush",
            plural(stamps, "stamp", "stamps"),
            plural(args.points.len(), "sample", "samples"),
            args.diameter
        ),
    );

    let output = match (args.output, &args.input) {
        (Some(output), _) => output,
        (None, Some(input)) => super::default_output(input, "stroke"),
        (None, None) => PathBuf::from("stroke.png"),
    };
    write_png(&canvas, &output, 1)?;
    printer.status("Wrote", &display_path(&output));

    Ok(())
}
