//! The normalization pipeline: raw source in, canonical layout out.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Context;

use crate::config::Config;
use crate::error::Result;
use crate::format::whitespace::{expand_leading_tabs, is_blank, strip_trailing};

/// Normalize the layout of source read from `input`, writing to `output`.
///
/// Fails if the input is not valid UTF-8 or on I/O errors; the caller
/// propagates such failures unchanged.
pub fn format_source<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    config: &Config,
) -> Result<()> {
    let mut buffer = Vec::new();
    let mut reader = input;
    reader
        .read_to_end(&mut buffer)
        .context("failed to read input")?;

    let formatted = format_bytes(config, &buffer)?;
    output
        .write_all(&formatted)
        .context("failed to write output")?;
    Ok(())
}

/// Normalize the layout of `source`, returning the formatted bytes.
pub fn format_bytes(config: &Config, source: &[u8]) -> Result<Vec<u8>> {
    let text = std::str::from_utf8(source).context("input is not valid UTF-8")?;

    if text.is_empty() {
        return Ok(Vec::new());
    }

    let text = if config.normalize_newlines {
        normalize_newlines(text)
    } else {
        text.to_string()
    };

    // Split keeps no terminators; remember whether the input ended with one
    // so --no-final-newline can reproduce it.
    let had_final_newline = text.ends_with('\n');
    let mut lines: Vec<String> = text
        .split('\n')
        .map(|line| {
            let line = if config.expand_tabs {
                expand_leading_tabs(line, config.tab_width)
            } else {
                line.to_string()
            };
            if config.strip_trailing_whitespace {
                strip_trailing(&line).to_string()
            } else {
                line
            }
        })
        .collect();
    if had_final_newline {
        // split() yields a trailing empty element for the final newline
        lines.pop();
    }

    let mut out_lines: Vec<String> = Vec::with_capacity(lines.len());
    let mut blank_run = 0usize;
    for line in lines {
        if is_blank(&line) {
            blank_run += 1;
            if blank_run > config.max_blank_lines {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out_lines.push(line);
    }

    if config.final_newline {
        // Exactly one newline at end of file, no trailing blank lines
        while out_lines.last().is_some_and(|l| is_blank(l)) {
            out_lines.pop();
        }
    }

    let mut result = out_lines.join("\n").into_bytes();
    if config.final_newline {
        if !result.is_empty() {
            result.push(b'\n');
        }
    } else if had_final_newline {
        result.push(b'\n');
    }
    Ok(result)
}

/// Normalize the layout of the file at `path`, returning the formatted bytes.
pub fn format_path(config: &Config, path: &Path) -> Result<Vec<u8>> {
    let source = std::fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    format_bytes(config, &source)
        .with_context(|| format!("failed to format {}", path.display()))
}

/// Replace CRLF and lone CR line endings with LF
fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
