//! Input resolution: turning raw path arguments into the ordered list of
//! inputs to dispatch.
//!
//! Directory expansion is deliberately asymmetric: only `inplace` mode
//! recurses into directories and filters by source suffix. `stdout` and
//! `check` operate on exactly the paths the caller named, and leave it to
//! the engine or the filesystem to fail on bad ones.

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::mode::Mode;

/// Haskell file extensions recognized during directory expansion
pub const HASKELL_EXTENSIONS: &[&str] = &["hs", "lhs"];

/// Maximum traversal depth, prevents runaway recursion in pathological trees
const MAX_WALK_DEPTH: usize = 256;

/// One unit of work for the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Read source from standard input
    Stdin,
    /// Read source from a file on disk
    File(PathBuf),
}

/// Check if a file has a recognized Haskell extension
#[must_use]
pub fn is_haskell_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| HASKELL_EXTENSIONS.contains(&ext))
}

/// Check if a path matches any exclusion pattern
///
/// Matches against the full path, the file name, and each path component
/// so that directory patterns like `dist-newstyle` work as expected.
#[must_use]
pub fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    for pattern in patterns {
        if pattern.matches(&path_str) {
            return true;
        }

        if let Some(file_name) = path.file_name() {
            if pattern.matches(&file_name.to_string_lossy()) {
                return true;
            }
        }

        for component in path.components() {
            if let std::path::Component::Normal(c) = component {
                if pattern.matches(&c.to_string_lossy()) {
                    return true;
                }
            }
        }
    }

    false
}

/// Resolve raw path arguments into the ordered input set.
///
/// - No arguments, or the single argument `-`, means standard input,
///   whatever the mode.
/// - In `inplace` mode, directories expand recursively to the Haskell files
///   beneath them (lexical order); paths that are neither file nor directory
///   contribute nothing, silently. `exclude` patterns apply only to this
///   expansion, never to explicitly named files.
/// - In `stdout` and `check` modes the arguments pass through untouched.
#[must_use]
pub fn resolve_inputs(mode: Mode, raw_paths: &[PathBuf], exclude: &[Pattern]) -> Vec<Input> {
    if raw_paths.is_empty() || (raw_paths.len() == 1 && raw_paths[0].as_os_str() == "-") {
        return vec![Input::Stdin];
    }

    if mode != Mode::InPlace {
        return raw_paths.iter().cloned().map(Input::File).collect();
    }

    let mut inputs = Vec::new();
    for raw in raw_paths {
        if raw.is_dir() {
            // sort_by_file_name gives a deterministic traversal order;
            // unreadable entries and symlink loops are skipped via
            // filter_map(ok).
            for entry in WalkDir::new(raw)
                .follow_links(true)
                .max_depth(MAX_WALK_DEPTH)
                .sort_by_file_name()
                .into_iter()
                .filter_map(std::result::Result::ok)
            {
                let path = entry.path();
                if path.is_file() && is_haskell_file(path) && !is_excluded(path, exclude) {
                    inputs.push(Input::File(path.to_path_buf()));
                }
            }
        } else if raw.is_file() {
            inputs.push(Input::File(raw.clone()));
        }
        // Nonexistent or special paths contribute nothing
    }
    inputs
}
