//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::io::{self, Write};

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Write a labelled result line (green label)
pub fn action(
    out: &mut impl Write,
    label: &str,
    msg: &(impl std::fmt::Display + ?Sized),
) -> io::Result<()> {
    writeln!(out, "{}: {}", label.green(), msg)
}

/// Write a labelled parse failure (red label)
pub fn failure(
    out: &mut impl Write,
    label: &str,
    msg: &(impl std::fmt::Display + ?Sized),
) -> io::Result<()> {
    writeln!(out, "{}: {}", label.red(), msg)
}

/// Print plain output (no color)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Write plain output (no color)
pub fn plain(out: &mut impl Write, msg: &(impl std::fmt::Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg)
}
