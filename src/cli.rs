//! Command-line interface for hsfmt.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

use crate::mode::Mode;

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Files or directories to format (empty or `-` reads stdin)
    pub inputs: Vec<PathBuf>,

    /// How formatted output is realized
    pub mode: Mode,

    /// Number of spaces a leading tab expands to
    pub tab_width: Option<usize>,

    /// Maximum run of consecutive blank lines to keep
    pub max_blank_lines: Option<usize>,

    /// Keep trailing whitespace on lines
    pub keep_trailing_whitespace: bool,

    /// Don't enforce a final newline
    pub no_final_newline: bool,

    /// Keep leading tabs instead of expanding them
    pub keep_tabs: bool,

    /// Keep CRLF/CR line endings instead of normalizing to LF
    pub keep_crlf: bool,

    /// Exclude patterns applied during directory expansion (glob syntax)
    pub exclude: Vec<String>,

    /// Config file path (overrides auto-discovery)
    pub config: Option<PathBuf>,

    /// Enable debug output
    pub debug: bool,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("hsfmt")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Fred Jones")
        .about("Layout normalizer for Haskell source code")
        .arg(
            Arg::new("inputs")
                .help("Files or directories to format (empty or '-' reads stdin)")
                .value_name("FILE")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .help("Output mode: stdout, inplace, or check [default: stdout]")
                .value_name("MODE")
                .default_value("stdout")
                .value_parser(Mode::parse),
        )
        .arg(
            Arg::new("tab-width")
                .short('t')
                .long("tab-width")
                .help("Number of spaces a leading tab expands to [default: 8]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("max-blank-lines")
                .short('b')
                .long("max-blank-lines")
                .help("Maximum run of consecutive blank lines to keep [default: 2]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("keep-trailing-whitespace")
                .long("keep-trailing-whitespace")
                .help("Keep trailing whitespace on lines")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-final-newline")
                .long("no-final-newline")
                .help("Don't enforce a single newline at end of file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("keep-tabs")
                .long("keep-tabs")
                .help("Keep leading tabs instead of expanding them to spaces")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("keep-crlf")
                .long("keep-crlf")
                .help("Keep CRLF/CR line endings instead of normalizing to LF")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Exclude files/directories matching pattern during directory expansion (glob syntax, can be repeated)")
                .value_name("PATTERN")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output (shows config discovery and directives)")
                .action(ArgAction::SetTrue),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        mode: matches.get_one::<Mode>("mode").copied().unwrap_or_default(),
        tab_width: matches.get_one::<usize>("tab-width").copied(),
        max_blank_lines: matches.get_one::<usize>("max-blank-lines").copied(),
        keep_trailing_whitespace: matches.get_flag("keep-trailing-whitespace"),
        no_final_newline: matches.get_flag("no-final-newline"),
        keep_tabs: matches.get_flag("keep-tabs"),
        keep_crlf: matches.get_flag("keep-crlf"),
        exclude: matches
            .get_many::<String>("exclude")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        config: matches.get_one::<PathBuf>("config").cloned(),
        debug: matches.get_flag("debug"),
    }
}
