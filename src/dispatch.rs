//! Per-input dispatch: run the engine on one input and route the result
//! according to the active mode.
//!
//! Dispatch is strictly sequential; each outcome is handed back to the
//! caller, which terminates the process on the first anomaly. Engine
//! failures propagate unchanged for the top-level boundary in `main` to
//! render.

use std::io::{BufReader, Cursor, Read, Write};
use std::path::Path;

use anyhow::Context;

use crate::config::Config;
use crate::directive::find_directive;
use crate::error::Result;
use crate::format::format_bytes;
use crate::mode::Mode;
use crate::resolve::Input;

/// Exit code for a successful run
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for engine failures (unreadable input, invalid UTF-8, I/O errors)
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for check mode when an input is not already formatted
pub const EXIT_CHECK_MISMATCH: i32 = 2;
/// Exit code when a non-stdout mode is requested with stdin input
pub const EXIT_UNSUPPORTED_STDIN: i32 = 3;

/// The result of dispatching a single input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The input was formatted and its output realized per the mode
    Formatted,
    /// Check mode: formatted output differs from on-disk content
    MismatchDetected,
    /// inplace/check mode requested with stdin input
    UnsupportedStdinMode,
}

/// Dispatch one input through the engine, realizing the result per `mode`.
pub fn dispatch_one(mode: Mode, config: &Config, input: &Input) -> Result<Outcome> {
    match input {
        Input::Stdin => dispatch_stdin(mode, config),
        Input::File(path) => dispatch_file(mode, config, path),
    }
}

fn dispatch_stdin(mode: Mode, config: &Config) -> Result<Outcome> {
    if mode != Mode::Stdout {
        // Expected outcome, not an error: it carries its own exit code
        eprintln!("hsfmt: mode '{mode}' is not supported when reading from standard input");
        return Ok(Outcome::UnsupportedStdinMode);
    }

    let mut contents = Vec::new();
    std::io::stdin()
        .read_to_end(&mut contents)
        .context("failed to read standard input")?;

    let formatted = format_for(config, &contents)?;
    std::io::stdout()
        .write_all(&formatted)
        .context("failed to write to standard output")?;
    Ok(Outcome::Formatted)
}

fn dispatch_file(mode: Mode, config: &Config, path: &Path) -> Result<Outcome> {
    let contents =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    let formatted = format_for(config, &contents)
        .with_context(|| format!("failed to format {}", path.display()))?;

    match mode {
        Mode::Stdout => {
            std::io::stdout()
                .write_all(&formatted)
                .context("failed to write to standard output")?;
            Ok(Outcome::Formatted)
        }
        Mode::InPlace => {
            std::fs::write(path, &formatted)
                .with_context(|| format!("failed to write {}", path.display()))?;
            Ok(Outcome::Formatted)
        }
        Mode::Check => {
            // Compare against the current on-disk content. A concurrent
            // writer between the two reads is an accepted race.
            let current = std::fs::read(path)
                .with_context(|| format!("failed to re-read {}", path.display()))?;
            if current == formatted {
                Ok(Outcome::Formatted)
            } else {
                Ok(Outcome::MismatchDetected)
            }
        }
    }
}

/// Run the engine on `contents` with a per-input copy of `config` that
/// honors any in-file directive.
fn format_for(config: &Config, contents: &[u8]) -> Result<Vec<u8>> {
    let mut file_config = config.clone();
    let mut reader = BufReader::new(Cursor::new(contents));
    if let Some(overrides) = find_directive(&mut reader) {
        if let Some(v) = overrides.tab_width {
            file_config.tab_width = v;
        }
        if let Some(v) = overrides.max_blank_lines {
            file_config.max_blank_lines = v;
        }
        if let Some(v) = overrides.strip_trailing_whitespace {
            file_config.strip_trailing_whitespace = v;
        }
        if let Some(v) = overrides.final_newline {
            file_config.final_newline = v;
        }
        if let Some(v) = overrides.expand_tabs {
            file_config.expand_tabs = v;
        }
        if let Some(error) = file_config.validate() {
            anyhow::bail!("invalid directive override: {error}");
        }
    }
    format_bytes(&file_config, contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_stdin_rejected_in_inplace_mode() {
        let outcome = dispatch_one(Mode::InPlace, &Config::default(), &Input::Stdin).unwrap();
        assert_eq!(outcome, Outcome::UnsupportedStdinMode);
    }

    #[test]
    fn test_stdin_rejected_in_check_mode() {
        let outcome = dispatch_one(Mode::Check, &Config::default(), &Input::Stdin).unwrap();
        assert_eq!(outcome, Outcome::UnsupportedStdinMode);
    }

    #[test]
    fn test_inplace_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.hs");
        fs::write(&path, "a = 1   \n").unwrap();

        let input = Input::File(path.clone());
        let outcome = dispatch_one(Mode::InPlace, &Config::default(), &input).unwrap();
        assert_eq!(outcome, Outcome::Formatted);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a = 1\n");
    }

    #[test]
    fn test_check_clean_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.hs");
        fs::write(&path, "a = 1\n").unwrap();

        let input = Input::File(path.clone());
        let outcome = dispatch_one(Mode::Check, &Config::default(), &input).unwrap();
        assert_eq!(outcome, Outcome::Formatted);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a = 1\n");
    }

    #[test]
    fn test_check_mismatch_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.hs");
        fs::write(&path, "a = 1   \n").unwrap();

        let input = Input::File(path.clone());
        let outcome = dispatch_one(Mode::Check, &Config::default(), &input).unwrap();
        assert_eq!(outcome, Outcome::MismatchDetected);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a = 1   \n");
    }

    #[test]
    fn test_missing_file_is_an_engine_failure() {
        let input = Input::File("/no/such/file.hs".into());
        let err = dispatch_one(Mode::Check, &Config::default(), &input).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_directive_overrides_config_per_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.hs");
        fs::write(&path, "-- hsfmt: --tab-width 4\n\tx = 1\n").unwrap();

        let input = Input::File(path.clone());
        dispatch_one(Mode::InPlace, &Config::default(), &input).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "-- hsfmt: --tab-width 4\n    x = 1\n"
        );
    }

    #[test]
    fn test_directive_with_invalid_value_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.hs");
        fs::write(&path, "-- hsfmt: --tab-width 99\nx = 1\n").unwrap();

        let input = Input::File(path);
        let err = dispatch_one(Mode::Check, &Config::default(), &input).unwrap_err();
        assert!(format!("{err:#}").contains("tab_width"));
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_FAILURE,
            EXIT_CHECK_MISMATCH,
            EXIT_UNSUPPORTED_STDIN,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
