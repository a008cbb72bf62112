//! Inline directive parsing for `-- hsfmt:` comments
//!
//! Supports in-file configuration overrides via special comments:
//! `-- hsfmt: --tab-width 4 --keep-trailing-whitespace`

use std::sync::LazyLock;

use regex::Regex;

/// Pattern to match hsfmt directives in Haskell line comments
static HSFMT_DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*--\s*hsfmt:\s*(.*)\s*$").unwrap());

/// Parsed directive options that can override config
#[derive(Debug, Default, Clone)]
pub struct DirectiveOverrides {
    pub tab_width: Option<usize>,
    /// Blank-line run limit. Values above the config maximum are rejected
    /// by config validation.
    pub max_blank_lines: Option<usize>,
    pub strip_trailing_whitespace: Option<bool>,
    pub final_newline: Option<bool>,
    pub expand_tabs: Option<bool>,
}

impl DirectiveOverrides {
    /// Check if any overrides are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tab_width.is_none()
            && self.max_blank_lines.is_none()
            && self.strip_trailing_whitespace.is_none()
            && self.final_newline.is_none()
            && self.expand_tabs.is_none()
    }
}

/// Check if a line contains an hsfmt directive
#[must_use]
pub fn is_directive_line(line: &str) -> bool {
    HSFMT_DIRECTIVE_RE.is_match(line)
}

/// Parse an hsfmt directive line and return option overrides
///
/// # Returns
/// * `Some(DirectiveOverrides)` if the line is a valid directive
/// * `None` if the line is not a directive
#[must_use]
pub fn parse_directive(line: &str) -> Option<DirectiveOverrides> {
    let caps = HSFMT_DIRECTIVE_RE.captures(line)?;
    let args_str = caps.get(1)?.as_str();

    // Parse the arguments like CLI args
    parse_directive_args(args_str)
}

/// Parse directive arguments into overrides
fn parse_directive_args(args_str: &str) -> Option<DirectiveOverrides> {
    let mut overrides = DirectiveOverrides::default();
    let tokens: Vec<&str> = args_str.split_whitespace().collect();
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i];
        match token {
            "-t" | "--tab-width" => {
                i += 1;
                if i < tokens.len() {
                    overrides.tab_width = tokens[i].parse().ok();
                }
            }
            "-b" | "--max-blank-lines" => {
                i += 1;
                if i < tokens.len() {
                    overrides.max_blank_lines = tokens[i].parse().ok();
                }
            }
            "--keep-trailing-whitespace" => {
                overrides.strip_trailing_whitespace = Some(false);
            }
            "--strip-trailing-whitespace" => {
                overrides.strip_trailing_whitespace = Some(true);
            }
            "--no-final-newline" => {
                overrides.final_newline = Some(false);
            }
            "--final-newline" => {
                overrides.final_newline = Some(true);
            }
            "--keep-tabs" => {
                overrides.expand_tabs = Some(false);
            }
            "--expand-tabs" => {
                overrides.expand_tabs = Some(true);
            }
            _ => {
                // Unknown option, skip
            }
        }
        i += 1;
    }

    if overrides.is_empty() {
        None
    } else {
        Some(overrides)
    }
}

/// Scan input for hsfmt directives and return the first found
///
/// This reads the input looking for `-- hsfmt:` lines.
/// Only the first directive is used (subsequent ones are ignored).
pub fn find_directive<R: std::io::BufRead>(input: &mut R) -> Option<DirectiveOverrides> {
    let mut buffer = String::new();

    while input.read_line(&mut buffer).ok()? > 0 {
        if is_directive_line(&buffer) {
            return parse_directive(&buffer);
        }
        buffer.clear();
    }

    None
}
