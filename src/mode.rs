//! Operating mode selection.
//!
//! hsfmt runs in one of three modes, fixed for the whole invocation:
//! - `stdout`: write formatted output to standard output
//! - `inplace`: overwrite each input file with its formatted content
//! - `check`: report (via exit code) whether inputs are already formatted

use std::fmt;

/// How formatted output is realized for each input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Write formatted output to stdout (default)
    #[default]
    Stdout,
    /// Overwrite input files with formatted output
    InPlace,
    /// Compare formatted output against on-disk content, modify nothing
    Check,
}

impl Mode {
    /// Parse a mode token as given on the command line.
    ///
    /// Any token outside `stdout`/`inplace`/`check` is rejected, which
    /// aborts argument parsing before any input is touched.
    pub fn parse(token: &str) -> Result<Self, String> {
        match token {
            "stdout" => Ok(Mode::Stdout),
            "inplace" => Ok(Mode::InPlace),
            "check" => Ok(Mode::Check),
            _ => Err(format!("unknown mode: {token}")),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Stdout => "stdout",
            Mode::InPlace => "inplace",
            Mode::Check => "check",
        };
        f.write_str(name)
    }
}
