//! Configuration management for hsfmt.
//!
//! This module provides the [`Config`] struct which controls all layout
//! normalization behavior. Configuration can be loaded from:
//! - TOML files (`hsfmt.toml`)
//! - CLI arguments (which override file settings)
//! - In-file directives (`-- hsfmt: --tab-width 4`)
//!
//! Config files are auto-discovered by searching parent directories from the
//! file being formatted up to the filesystem root, plus the user's home
//! directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["hsfmt.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    // Try HOME environment variable first (works on Unix and some Windows setups)
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Fallback for Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

// Serde default functions
fn default_tab_width() -> usize {
    8
}
fn default_max_blank_lines() -> usize {
    2
}
fn default_true() -> bool {
    true
}

/// Main configuration struct for hsfmt
///
/// The dispatch layer treats this as an opaque bundle; only the format
/// engine reads individual fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Number of spaces a leading tab expands to (default: 8)
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Maximum run of consecutive blank lines to keep (default: 2)
    #[serde(default = "default_max_blank_lines")]
    pub max_blank_lines: usize,

    /// Strip trailing whitespace from every line (default: true)
    #[serde(default = "default_true")]
    pub strip_trailing_whitespace: bool,

    /// Guarantee exactly one newline at end of non-empty output (default: true)
    #[serde(default = "default_true")]
    pub final_newline: bool,

    /// Expand leading tabs to spaces (default: true)
    #[serde(default = "default_true")]
    pub expand_tabs: bool,

    /// Normalize CRLF/CR line endings to LF (default: true)
    #[serde(default = "default_true")]
    pub normalize_newlines: bool,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub tab_width: Option<usize>,
    pub max_blank_lines: Option<usize>,
    pub strip_trailing_whitespace: Option<bool>,
    pub final_newline: Option<bool>,
    pub expand_tabs: Option<bool>,
    pub normalize_newlines: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tab_width: 8,
            max_blank_lines: 2,
            strip_trailing_whitespace: true,
            final_newline: true,
            expand_tabs: true,
            normalize_newlines: true,
        }
    }
}

impl Config {
    /// Maximum reasonable tab width
    const MAX_TAB_WIDTH: usize = 16;
    /// Maximum reasonable blank-line run
    const MAX_BLANK_LINE_RUN: usize = 50;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.tab_width == 0 {
            return Some("tab_width must be at least 1".to_string());
        }
        if self.tab_width > Self::MAX_TAB_WIDTH {
            return Some(format!(
                "tab_width {} exceeds maximum of {}",
                self.tab_width,
                Self::MAX_TAB_WIDTH
            ));
        }
        if self.max_blank_lines > Self::MAX_BLANK_LINE_RUN {
            return Some(format!(
                "max_blank_lines {} exceeds maximum of {}",
                self.max_blank_lines,
                Self::MAX_BLANK_LINE_RUN
            ));
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.tab_width {
            self.tab_width = v;
        }
        if let Some(v) = partial.max_blank_lines {
            self.max_blank_lines = v;
        }
        if let Some(v) = partial.strip_trailing_whitespace {
            self.strip_trailing_whitespace = v;
        }
        if let Some(v) = partial.final_newline {
            self.final_newline = v;
        }
        if let Some(v) = partial.expand_tabs {
            self.expand_tabs = v;
        }
        if let Some(v) = partial.normalize_newlines {
            self.normalize_newlines = v;
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home
    /// directory config. Returns list of config file paths in order of
    /// priority (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Add home directory config first (lowest priority)
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        // Start from the file's parent directory (or the path itself if it's a directory)
        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            // Path doesn't exist, use current directory
            std::env::current_dir().ok()
        };

        // Collect config files from parent directories (from root to current)
        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Reverse so we go from root to current (less specific to more specific)
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Returns default config if no files found.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let config_files = Self::discover_config_files(start_path);

        if config_files.is_empty() {
            return Self::default();
        }

        let mut config = Self::default();
        for path in &config_files {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(&partial),
                    Err(e) => eprintln!("Warning: failed to parse {}: {e}", path.display()),
                },
                Err(e) => eprintln!("Warning: failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}
