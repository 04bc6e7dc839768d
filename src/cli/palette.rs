use std::collections::HashMap;
use std::path::PathBuf;

use clap::Args;

use crate::error::{PxedError, Result};
use crate::export::read_png;
use crate::output::{display_path, plural, Printer};
use crate::quantize::ALPHA_THRESHOLD;
use crate::types::{Colour, Palette};

/// Extract a colour palette from an image
#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Image to extract colours from
    #[arg(required = true)]
    pub file: PathBuf,

    /// Maximum number of colours to output (excluding the reserved slot)
    #[arg(long)]
    pub max: Option<usize>,
}

pub fn run(args: PaletteArgs, printer: &Printer) -> Result<()> {
    let path = &args.file;
    let display = display_path(path);
    let buffer = read_png(path)?;

    // Count pixel frequencies, skipping pixels that quantize to the reserved slot
    let mut counts: HashMap<u32, usize> = HashMap::new();
    for &pixel in buffer.pixels() {
        if Colour::unpack(pixel).alpha() <= ALPHA_THRESHOLD {
            continue;
        }
        *counts.entry(pixel).or_insert(0) += 1;
    }

    // Most common first; equal counts in pixel order for stable output
    let mut colours: Vec<(u32, usize)> = counts.into_iter().collect();
    colours.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    if let Some(max) = args.max.filter(|&max| max < colours.len()) {
        printer.info(
            "Dropped",
            &format!("{} past --max {}", plural(colours.len() - max, "colour", "colours"), max),
        );
        colours.truncate(max);
    }

    if colours.is_empty() {
        return Err(PxedError::Palette {
            message: format!("No opaque colours to extract from {}", display),
            help: Some(if args.max == Some(0) {
                "Pass --max 1 or more".to_string()
            } else {
                "Pixels with alpha at or below one half are skipped".to_string()
            }),
        });
    }

    printer.status(
        "Sampled",
        &format!("{} from {}", plural(colours.len(), "colour", "colours"), display),
    );

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let entries = std::iter::once(Colour::TRANSPARENT)
        .chain(colours.iter().map(|&(pixel, _)| Colour::unpack(pixel)))
        .collect();
    let palette = Palette::new(name, entries)?;

    // Palette YAML to stdout
    print!("{}", palette.to_yaml()?);

    Ok(())
}
