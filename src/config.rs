//! Configuration management for webtidy.
//!
//! This module provides the [`Config`] struct which controls all
//! reformatting behavior. Configuration can be loaded from:
//! - TOML files (`webtidy.toml`)
//! - CLI arguments (which override file settings)
//! - In-file directives (`/* webtidy: --indent 4 */`)
//!
//! Config files are auto-discovered by searching parent directories from the
//! file being processed up to the filesystem root, plus the user's home
//! directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::process::{FormatOptions, Language, MinifyOptions};

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["webtidy.toml"];

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
fn default_indent() -> usize {
    2
}
fn default_true() -> bool {
    true
}

/// Main configuration struct for webtidy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Number of spaces per indent level (default: 2)
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Compact stylesheet output instead of indentation (default: false)
    #[serde(default)]
    pub compact: bool,

    /// Strip comments (default: false)
    #[serde(default)]
    pub remove_comments: bool,

    /// Lexically sort declarations inside each rule block (default: false)
    #[serde(default)]
    pub sort_properties: bool,

    /// Drop lines that trim to nothing, markup format mode (default: false)
    #[serde(default)]
    pub remove_empty_lines: bool,

    /// Strip inline `style="..."` attributes, markup format mode (default: false)
    #[serde(default)]
    pub remove_inline_styles: bool,

    /// Collapse whitespace in minify mode (default: true)
    #[serde(default = "default_true")]
    pub remove_whitespace: bool,

    /// Rewrite `attr="attr"` as bare `attr` in minify mode (default: false)
    #[serde(default)]
    pub collapse_boolean_attributes: bool,

    /// Normalize any doctype to `<!DOCTYPE html>` in minify mode (default: false)
    #[serde(default)]
    pub shorten_doctype: bool,

    /// Drop `<html>`, `<head>`, `<body>` tags in minify mode (default: false)
    #[serde(default)]
    pub remove_optional_tags: bool,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub indent: Option<usize>,
    pub compact: Option<bool>,
    pub remove_comments: Option<bool>,
    pub sort_properties: Option<bool>,
    pub remove_empty_lines: Option<bool>,
    pub remove_inline_styles: Option<bool>,
    pub remove_whitespace: Option<bool>,
    pub collapse_boolean_attributes: Option<bool>,
    pub shorten_doctype: Option<bool>,
    pub remove_optional_tags: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            indent: 2,
            compact: false,
            remove_comments: false,
            sort_properties: false,
            remove_empty_lines: false,
            remove_inline_styles: false,
            remove_whitespace: true,
            collapse_boolean_attributes: false,
            shorten_doctype: false,
            remove_optional_tags: false,
        }
    }
}

impl Config {
    /// Maximum reasonable indent size
    const MAX_INDENT: usize = 16;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    /// An indent of 0 is allowed (flat output).
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.indent > Self::MAX_INDENT {
            return Some(format!(
                "indent {} exceeds maximum of {}",
                self.indent,
                Self::MAX_INDENT
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
        if let Some(v) = partial.indent {
            self.indent = v;
        }
        if let Some(v) = partial.compact {
            self.compact = v;
        }
        if let Some(v) = partial.remove_comments {
            self.remove_comments = v;
        }
        if let Some(v) = partial.sort_properties {
            self.sort_properties = v;
        }
        if let Some(v) = partial.remove_empty_lines {
            self.remove_empty_lines = v;
        }
        if let Some(v) = partial.remove_inline_styles {
            self.remove_inline_styles = v;
        }
        if let Some(v) = partial.remove_whitespace {
            self.remove_whitespace = v;
        }
        if let Some(v) = partial.collapse_boolean_attributes {
            self.collapse_boolean_attributes = v;
        }
        if let Some(v) = partial.shorten_doctype {
            self.shorten_doctype = v;
        }
        if let Some(v) = partial.remove_optional_tags {
            self.remove_optional_tags = v;
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

    /// Format-mode options for a language, as an immutable value
    #[must_use]
    pub fn format_options(&self, language: Language) -> FormatOptions {
        FormatOptions {
            language,
            indent: self.indent,
            compact: self.compact,
            remove_comments: self.remove_comments,
            sort_properties: self.sort_properties,
            remove_empty_lines: self.remove_empty_lines,
            remove_inline_styles: self.remove_inline_styles,
        }
    }

    /// Minify-mode options for a language, as an immutable value
    #[must_use]
    pub fn minify_options(&self, language: Language) -> MinifyOptions {
        MinifyOptions {
            language,
            remove_whitespace: self.remove_whitespace,
            remove_comments: self.remove_comments,
            collapse_boolean_attributes: self.collapse_boolean_attributes,
            shorten_doctype: self.shorten_doctype,
            remove_optional_tags: self.remove_optional_tags,
        }
    }
}
