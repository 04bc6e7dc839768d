//! Quantize command implementation.
//!
//! Maps an image onto a palette and writes the materialized result, plus
//! optionally the indexed pixels as JSON.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{PxedError, Result};
use crate::export::{read_png, write_png};
use crate::output::{display_path, plural, Printer};
use crate::quantize::{materialize, quantize};

/// Quantize an image to a palette
#[derive(Args, Debug)]
pub struct QuantizeArgs {
    /// Image to quantize
    pub input: PathBuf,

    /// Palette file (YAML); defaults to the builtin PICO-8 palette
    #[arg(long)]
    pub palette: Option<PathBuf>,

    /// Output PNG (default: <input>.quantized.png)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Scale factor for output (integer upscaling)
    #[arg(long, default_value = "1")]
    pub scale: u32,

    /// Also write the indexed pixels as JSON
    #[arg(long)]
    pub indices: Option<PathBuf>,
}

pub fn run(args: QuantizeArgs, printer: &Printer) -> Result<()> {
    let palette = super::load_palette(args.palette.as_deref())?;
    let source = read_png(&args.input)?;

    let indexed = quantize(&source, &palette);
    let used: HashSet<u32> = indexed.pixels().iter().copied().collect();

    let (width, height) = source.size();
    printer.status(
        "Quantized",
        &format!(
            "{} ({}x{}) to {} of {} '{}' entries",
            display_path(&args.input),
            width,
            height,
            used.len(),
            palette.len(),
            palette.name
        ),
    );

    let output = args
        .output
        .unwrap_or_else(|| super::default_output(&args.input, "quantized"));
    write_png(&materialize(&indexed, &palette), &output, args.scale)?;
    printer.status("Wrote", &display_path(&output));

    if let Some(path) = args.indices {
        let json = serde_json::to_string(&indexed.to_data()).map_err(|e| PxedError::Parse {
            message: format!("Failed to serialize indices: {}", e),
            help: None,
        })?;
        fs::write(&path, json).map_err(|e| PxedError::Io {
            path: path.clone(),
            message: format!("Failed to write indices: {}", e),
        })?;
        printer.status(
            "Wrote",
            &format!("{} ({})", display_path(&path), plural(used.len(), "index", "indices")),
        );
    }

    Ok(())
}
