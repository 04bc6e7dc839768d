//! Shell completions.

use std::io::{self, Write};

use clap::{Args, CommandFactory};
use clap_complete::Shell;

use crate::error::Result;

/// Generate shell completions
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_script(args.shell, &mut stdout);
    stdout.flush()?;
    Ok(())
}

/// Write the completion script for `shell`, covering every subcommand.
pub fn write_script(shell: Shell, out: &mut dyn Write) {
    let mut command = super::Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, out);
}
