//! Terminal output formatting for the pxed CLI.
//!
//! Cargo-style status lines with right-aligned coloured verbs. All status
//! output goes to stderr; stdout is reserved for machine-readable output
//! such as palette YAML.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Plain,
    Coloured,
    Silent,
}

/// Status printer for the CLI commands.
///
/// Colour is enabled when stderr is a terminal; `--quiet` silences
/// everything except warnings.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    mode: Mode,
}

impl Printer {
    pub fn new() -> Self {
        let mode = if io::stderr().is_terminal() {
            Mode::Coloured
        } else {
            Mode::Plain
        };
        Self { mode }
    }

    /// A printer that drops status and info lines.
    pub fn silent() -> Self {
        Self { mode: Mode::Silent }
    }

    /// Print a status line with a green bold verb.
    /// e.g. "   Quantized sprite.png (32x32) to 9 of 17 'pico-8' entries"
    pub fn status(&self, verb: &str, message: &str) {
        if self.mode != Mode::Silent {
            self.print_line(GREEN, verb, message);
        }
    }

    /// Print an informational line with a cyan bold verb.
    pub fn info(&self, verb: &str, message: &str) {
        if self.mode != Mode::Silent {
            self.print_line(CYAN, verb, message);
        }
    }

    /// Print a warning line with a yellow bold verb. Shown even when silent.
    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        let _ = match self.mode {
            Mode::Coloured => writeln!(stderr, "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}"),
            _ => writeln!(stderr, "{verb:>VERB_WIDTH$} {message}"),
        };
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Pluralize a count: `plural(1, "pixel", "pixels")` → "1 pixel".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    let word = if n == 1 { singular } else { pluralized };
    format!("{} {}", n, word)
}

/// Path relative to the working directory when it lies beneath it.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));
    match relative {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Some(rel) => rel.display().to_string(),
        None => path.display().to_string(),
    }
}
