use clap::Parser;
use miette::Result;
use pxed::cli::{Cli, Commands};
use pxed::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = if cli.quiet {
        Printer::silent()
    } else {
        Printer::new()
    };

    match cli.command {
        Commands::Quantize(args) => pxed::cli::quantize::run(args, &printer)?,
        Commands::Fill(args) => pxed::cli::fill::run(args, &printer)?,
        Commands::Stroke(args) => pxed::cli::stroke::run(args, &printer)?,
        Commands::Remap(args) => pxed::cli::remap::run(args, &printer)?,
        Commands::Palette(args) => pxed::cli::palette::run(args, &printer)?,
        Commands::Completions(args) => pxed::cli::completions::run(args)?,
    }

    Ok(())
}
