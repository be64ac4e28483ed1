//! Language/mode dispatch
//!
//! The two public entry points are pure functions: `reformat` (format mode,
//! depth-based indentation) and `minify` (collapse mode). Each call gets a
//! fresh depth state; nothing carries over between invocations, so callers
//! may re-invoke on every keystroke. `format_file` wraps them for the
//! binary's reader/writer plumbing.

use std::io::{BufRead, Write};

use crate::config::Config;
use crate::error::Result;
use crate::{format, minify as minify_mode};

/// Input language, selecting the tokenizer and rewrite rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Css,
    Html,
}

impl Language {
    /// Detect the language from a file extension (`css`, `html`, `htm`)
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "css" => Some(Language::Css),
            "html" | "htm" => Some(Language::Html),
            _ => None,
        }
    }
}

/// Processing mode: pretty-print or collapse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Format,
    Minify,
}

/// Options for format mode
///
/// An immutable value; the engine never mutates it. `sort_properties`
/// applies to stylesheets only, `remove_empty_lines` and
/// `remove_inline_styles` to markup only; flags for the other language are
/// ignored.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    pub language: Language,
    /// Spaces per nesting level
    pub indent: usize,
    /// Collapse instead of indenting (stylesheets)
    pub compact: bool,
    /// Strip `/* ... */` or `<!-- ... -->`
    pub remove_comments: bool,
    /// Lexically sort declarations inside each rule block
    pub sort_properties: bool,
    /// Drop lines that trim to nothing
    pub remove_empty_lines: bool,
    /// Strip `style="..."` attributes
    pub remove_inline_styles: bool,
}

impl FormatOptions {
    /// Options with the default knobs: 2-space indent, everything else off
    #[must_use]
    pub fn new(language: Language) -> Self {
        FormatOptions {
            language,
            indent: 2,
            compact: false,
            remove_comments: false,
            sort_properties: false,
            remove_empty_lines: false,
            remove_inline_styles: false,
        }
    }
}

/// Options for minify mode
///
/// The attribute/doctype/optional-tag flags apply to markup only.
#[derive(Debug, Clone)]
pub struct MinifyOptions {
    pub language: Language,
    /// Collapse whitespace runs and strip delimiter-adjacent whitespace
    pub remove_whitespace: bool,
    /// Strip `/* ... */` or `<!-- ... -->`
    pub remove_comments: bool,
    /// Rewrite `attr="attr"` as bare `attr`
    pub collapse_boolean_attributes: bool,
    /// Normalize any doctype to `<!DOCTYPE html>`
    pub shorten_doctype: bool,
    /// Drop `<html>`, `<head>`, `<body>` open/close tags
    pub remove_optional_tags: bool,
}

impl MinifyOptions {
    /// Options with the default knobs: whitespace removal on, the lossier
    /// transforms off
    #[must_use]
    pub fn new(language: Language) -> Self {
        MinifyOptions {
            language,
            remove_whitespace: true,
            remove_comments: false,
            collapse_boolean_attributes: false,
            shorten_doctype: false,
            remove_optional_tags: false,
        }
    }
}

/// Reformat `source` in format mode.
///
/// Returns a new string; `source` is unchanged. Empty input yields empty
/// output.
#[must_use]
pub fn reformat(source: &str, options: &FormatOptions) -> String {
    match options.language {
        Language::Css => format::stylesheet::format(source, options),
        Language::Html => format::markup::format(source, options),
    }
}

/// Reformat `source` in minify mode.
///
/// Returns a new string with no added line breaks; `source` is unchanged.
/// Empty input yields empty output.
#[must_use]
pub fn minify(source: &str, options: &MinifyOptions) -> String {
    match options.language {
        Language::Css => minify_mode::stylesheet::minify(source, options),
        Language::Html => minify_mode::markup::minify(source, options),
    }
}

/// Process a whole input stream and write the result.
///
/// Reads `input` to the end, runs the pipeline selected by `language` and
/// `mode` with options derived from `config`, and writes the result to
/// `output`. A trailing newline is appended when the result is non-empty,
/// since the result of a format-mode run is line-oriented text.
pub fn format_file<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    config: &Config,
    language: Language,
    mode: Mode,
) -> Result<String> {
    let mut source = String::new();
    let mut reader = input;
    reader.read_to_string(&mut source)?;

    let result = match mode {
        Mode::Format => reformat(&source, &config.format_options(language)),
        Mode::Minify => minify(&source, &config.minify_options(language)),
    };

    output.write_all(result.as_bytes())?;
    if !result.is_empty() && !result.ends_with('\n') {
        output.write_all(b"\n")?;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};

    #[test]
    fn test_language_from_extension() {
        assert_eq!(Language::from_extension("css"), Some(Language::Css));
        assert_eq!(Language::from_extension("html"), Some(Language::Html));
        assert_eq!(Language::from_extension("HTM"), Some(Language::Html));
        assert_eq!(Language::from_extension("scss"), None);
        assert_eq!(Language::from_extension(""), None);
    }

    #[test]
    fn test_reformat_dispatch_css() {
        let out = reformat(".a{x:1;}", &FormatOptions::new(Language::Css));
        assert_eq!(out, ".a {\n  x:1;\n}");
    }

    #[test]
    fn test_reformat_dispatch_html() {
        let out = reformat("<p>x</p>", &FormatOptions::new(Language::Html));
        assert_eq!(out, "<p>\nx\n</p>");
    }

    #[test]
    fn test_minify_dispatch() {
        let css = minify(".a { x: 1; }", &MinifyOptions::new(Language::Css));
        assert_eq!(css, ".a{x:1;}");
        let html = minify("<p> x </p>", &MinifyOptions::new(Language::Html));
        assert_eq!(html, "<p>x</p>");
    }

    #[test]
    fn test_identity_on_empty_input() {
        assert_eq!(reformat("", &FormatOptions::new(Language::Css)), "");
        assert_eq!(reformat("", &FormatOptions::new(Language::Html)), "");
        assert_eq!(minify("", &MinifyOptions::new(Language::Css)), "");
        assert_eq!(minify("", &MinifyOptions::new(Language::Html)), "");
    }

    #[test]
    fn test_format_file_appends_newline() {
        let config = Config::default();
        let reader = BufReader::new(Cursor::new(".a{x:1;}"));
        let mut output = Vec::new();
        format_file(reader, &mut output, &config, Language::Css, Mode::Format).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), ".a {\n  x:1;\n}\n");
    }

    #[test]
    fn test_format_file_empty_input() {
        let config = Config::default();
        let reader = BufReader::new(Cursor::new(""));
        let mut output = Vec::new();
        format_file(reader, &mut output, &config, Language::Html, Mode::Minify).unwrap();
        assert!(output.is_empty());
    }
}
