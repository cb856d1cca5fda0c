//! Styled status lines for the `vaultr` binary.
//!
//! Results go to stdout and problems to stderr, so piping
//! `vaultr entry:list` into a file never captures a warning.

use console::{style, StyledObject};

fn mark(symbol: &'static str) -> StyledObject<&'static str> {
    style(symbol).bold()
}

/// `✓ msg` in green, on stdout.
pub fn success(msg: &str) {
    println!("{} {msg}", mark("\u{2713}").green());
}

/// `✗ msg` in red, on stderr. Used for the final error before exit.
pub fn error(msg: &str) {
    eprintln!("{} {msg}", mark("\u{2717}").red());
}

/// Yellow, on stderr.
pub fn warning(msg: &str) {
    eprintln!("{} {msg}", mark("\u{26a0}").yellow());
}

pub fn info(msg: &str) {
    println!("{} {msg}", mark("\u{2139}").blue());
}

/// A dimmed follow-up hint, e.g. the next command to run.
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}
