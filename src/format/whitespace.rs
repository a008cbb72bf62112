//! Per-line whitespace helpers for the layout engine.

/// Expand tabs in the leading indentation of a line to spaces.
///
/// Each tab advances to the next multiple of `tab_width`, matching how
/// GHC and most editors render indentation tabs. Tabs after the first
/// non-whitespace character are left alone.
#[must_use]
pub fn expand_leading_tabs(line: &str, tab_width: usize) -> String {
    let indent_len = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    let (indent, rest) = line.split_at(indent_len);

    if !indent.contains('\t') {
        return line.to_string();
    }

    let mut column = 0usize;
    let mut expanded = String::with_capacity(line.len() + tab_width);
    for c in indent.chars() {
        if c == '\t' {
            let pad = tab_width - (column % tab_width);
            for _ in 0..pad {
                expanded.push(' ');
            }
            column += pad;
        } else {
            expanded.push(' ');
            column += 1;
        }
    }
    expanded.push_str(rest);
    expanded
}

/// Strip trailing spaces and tabs from a line (no newline expected).
#[must_use]
pub fn strip_trailing(line: &str) -> &str {
    line.trim_end_matches([' ', '\t'])
}

/// Check whether a line is blank (empty or whitespace-only).
#[must_use]
pub fn is_blank(line: &str) -> bool {
    line.chars().all(|c| c == ' ' || c == '\t')
}
