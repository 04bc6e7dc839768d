//! Remap command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::export::{read_png, write_png};
use crate::output::{display_path, Printer};
use crate::quantize::remap_by_index;
use crate::types::Palette;

/// Recolour an image after a palette edit
#[derive(Args, Debug)]
pub struct RemapArgs {
    /// Image to recolour
    pub input: PathBuf,

    /// Palette the image currently uses
    #[arg(long)]
    pub from: PathBuf,

    /// Edited palette; entry i replaces entry i of --from
    #[arg(long)]
    pub to: PathBuf,

    /// Output PNG (default: <input>.remap.png)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: RemapArgs, printer: &Printer) -> Result<()> {
    let old = Palette::load(&args.from)?;
    let new = Palette::load(&args.to)?;

    if old.len() != new.len() {
        printer.warning(
            "Mismatch",
            &format!(
                "'{}' has {} entries and '{}' has {}; only the first {} are remapped",
                old.name,
                old.len(),
                new.name,
                new.len(),
                old.len().min(new.len())
            ),
        );
    }

    let mut buffer = read_png(&args.input)?;
    remap_by_index(&mut buffer, &old, &new);
    printer.status(
        "Remapped",
        &format!("{} from '{}' to '{}'", display_path(&args.input), old.name, new.name),
    );

    let output = args
        .output
        .unwrap_or_else(|| super::default_output(&args.input, "remap"));
    write_png(&buffer, &output, 1)?;
    printer.status("Wrote", &display_path(&output));

    Ok(())
}
