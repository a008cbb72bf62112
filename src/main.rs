//! hsfmt - Layout normalizer for Haskell source code

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::path::Path;
use std::process;

use glob::Pattern;

use hsfmt::dispatch::{
    dispatch_one, Outcome, EXIT_CHECK_MISMATCH, EXIT_FAILURE, EXIT_SUCCESS, EXIT_UNSUPPORTED_STDIN,
};
use hsfmt::resolve::{resolve_inputs, Input};
use hsfmt::{parse_args, CliArgs, Config, Mode, Result};

fn main() {
    let args = parse_args();

    // Single boundary for engine failures: render and map to an exit code
    // here instead of per call site.
    match run(&args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("hsfmt: error: {e:#}");
            process::exit(EXIT_FAILURE);
        }
    }
}

/// Resolve inputs, dispatch them in order, and map the first anomalous
/// outcome to its exit code.
fn run(args: &CliArgs) -> Result<i32> {
    // For an explicit config file, one config governs every input.
    // Otherwise each input discovers its own from its ancestors.
    let base_config = if args.config.is_some() {
        Some(build_config(args, None)?)
    } else {
        None
    };
    let exclude_patterns = compile_exclude_patterns(&args.exclude);

    let inputs = resolve_inputs(args.mode, &args.inputs, &exclude_patterns);

    if args.debug {
        eprintln!("[DEBUG] mode: {}", args.mode);
        eprintln!("[DEBUG] resolved {} input(s)", inputs.len());
    }

    if args.mode == Mode::InPlace && inputs.is_empty() {
        eprintln!("No Haskell files found to format.");
        return Ok(EXIT_SUCCESS);
    }

    for input in &inputs {
        let config = if let Some(config) = &base_config {
            config.clone()
        } else {
            let for_path = match input {
                Input::File(path) => Some(path.as_path()),
                Input::Stdin => None,
            };
            build_config(args, for_path)?
        };
        match dispatch_one(args.mode, &config, input)? {
            Outcome::Formatted => {}
            Outcome::MismatchDetected => return Ok(EXIT_CHECK_MISMATCH),
            Outcome::UnsupportedStdinMode => return Ok(EXIT_UNSUPPORTED_STDIN),
        }
    }

    Ok(EXIT_SUCCESS)
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in the input's parent
/// directories; stdin input discovers from the current directory.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        // Explicit config file specified
        if args.debug {
            eprintln!(
                "[DEBUG] Using explicit config file: {}",
                config_path.display()
            );
        }
        Config::from_toml_file(config_path)?
    } else {
        // Auto-discover config files from the input's ancestors, or from
        // the current directory when reading stdin
        let start = for_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
        if args.debug {
            let discovered = Config::discover_config_files(&start);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered for: {}", start.display());
            } else {
                eprintln!("[DEBUG] Discovered config files for {}:", start.display());
                for f in &discovered {
                    eprintln!("[DEBUG]   - {}", f.display());
                }
            }
        }
        Config::from_discovered_files(&start)
    };

    // Override with CLI arguments
    if let Some(tab_width) = args.tab_width {
        config.tab_width = tab_width;
    }
    if let Some(max_blank_lines) = args.max_blank_lines {
        config.max_blank_lines = max_blank_lines;
    }
    if args.keep_trailing_whitespace {
        config.strip_trailing_whitespace = false;
    }
    if args.no_final_newline {
        config.final_newline = false;
    }
    if args.keep_tabs {
        config.expand_tabs = false;
    }
    if args.keep_crlf {
        config.normalize_newlines = false;
    }

    // Validate configuration
    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Compile exclude patterns, warning about ones that don't parse
fn compile_exclude_patterns(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                eprintln!("Warning: ignoring invalid exclude pattern {p:?}: {e}");
                None
            }
        })
        .collect()
}
