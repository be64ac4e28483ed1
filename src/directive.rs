//! Inline directive parsing for `webtidy:` comments
//!
//! Supports in-file configuration overrides via special comments:
//! `/* webtidy: --indent 4 --remove-comments */` in stylesheets, or
//! `<!-- webtidy: --indent 4 -->` in markup.

use std::sync::LazyLock;

use regex::Regex;

/// Pattern to match webtidy directives inside either comment syntax
static WEBTIDY_DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:/\*|<!--)\s*webtidy:\s*(.*?)\s*(?:\*/|-->)").unwrap()
});

/// Parsed directive options that can override config
#[derive(Debug, Default, Clone)]
pub struct DirectiveOverrides {
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

impl DirectiveOverrides {
    /// Check if any overrides are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indent.is_none()
            && self.compact.is_none()
            && self.remove_comments.is_none()
            && self.sort_properties.is_none()
            && self.remove_empty_lines.is_none()
            && self.remove_inline_styles.is_none()
            && self.remove_whitespace.is_none()
            && self.collapse_boolean_attributes.is_none()
            && self.shorten_doctype.is_none()
            && self.remove_optional_tags.is_none()
    }
}

/// Check if a line contains a webtidy directive
#[must_use]
pub fn is_directive_line(line: &str) -> bool {
    WEBTIDY_DIRECTIVE_RE.is_match(line)
}

/// Parse a webtidy directive line and return option overrides
///
/// # Arguments
/// * `line` - The line containing the directive
///
/// # Returns
/// * `Some(DirectiveOverrides)` if the line is a valid directive
/// * `None` if the line is not a directive
#[must_use]
pub fn parse_directive(line: &str) -> Option<DirectiveOverrides> {
    let caps = WEBTIDY_DIRECTIVE_RE.captures(line)?;
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
            "-i" | "--indent" => {
                i += 1;
                if i < tokens.len() {
                    overrides.indent = tokens[i].parse().ok();
                }
            }
            "--compact" => {
                overrides.compact = Some(true);
            }
            "--no-compact" => {
                overrides.compact = Some(false);
            }
            "--remove-comments" => {
                overrides.remove_comments = Some(true);
            }
            "--keep-comments" => {
                overrides.remove_comments = Some(false);
            }
            "--sort-properties" => {
                overrides.sort_properties = Some(true);
            }
            "--no-sort-properties" => {
                overrides.sort_properties = Some(false);
            }
            "--remove-empty-lines" => {
                overrides.remove_empty_lines = Some(true);
            }
            "--remove-inline-styles" => {
                overrides.remove_inline_styles = Some(true);
            }
            "--keep-whitespace" => {
                overrides.remove_whitespace = Some(false);
            }
            "--collapse-boolean-attributes" => {
                overrides.collapse_boolean_attributes = Some(true);
            }
            "--shorten-doctype" => {
                overrides.shorten_doctype = Some(true);
            }
            "--remove-optional-tags" => {
                overrides.remove_optional_tags = Some(true);
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

/// Scan input for webtidy directives and return the first found
///
/// This reads the file looking for `webtidy:` comment lines.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_directive_line() {
        assert!(is_directive_line("/* webtidy: --indent 4 */"));
        assert!(is_directive_line("  <!-- webtidy: --remove-comments -->"));
        assert!(is_directive_line("/* WEBTIDY: --indent 2 */"));
        assert!(!is_directive_line("/* this is a regular comment */"));
        assert!(!is_directive_line(".a { color: red; }"));
    }

    #[test]
    fn test_parse_directive_indent() {
        let overrides = parse_directive("/* webtidy: --indent 4 */").unwrap();
        assert_eq!(overrides.indent, Some(4));
    }

    #[test]
    fn test_parse_directive_markup_comment() {
        let overrides = parse_directive("<!-- webtidy: -i 8 --shorten-doctype -->").unwrap();
        assert_eq!(overrides.indent, Some(8));
        assert_eq!(overrides.shorten_doctype, Some(true));
    }

    #[test]
    fn test_parse_directive_multiple() {
        let overrides =
            parse_directive("/* webtidy: --indent 2 --sort-properties --keep-whitespace */")
                .unwrap();
        assert_eq!(overrides.indent, Some(2));
        assert_eq!(overrides.sort_properties, Some(true));
        assert_eq!(overrides.remove_whitespace, Some(false));
    }

    #[test]
    fn test_parse_directive_negations() {
        let overrides = parse_directive("/* webtidy: --keep-comments --no-compact */").unwrap();
        assert_eq!(overrides.remove_comments, Some(false));
        assert_eq!(overrides.compact, Some(false));
    }

    #[test]
    fn test_parse_invalid_directive() {
        // Empty directive
        let overrides = parse_directive("/* webtidy: */");
        assert!(overrides.is_none());
    }

    #[test]
    fn test_find_directive_scans_lines() {
        let text = ".a { color: red; }\n/* webtidy: --indent 4 */\n.b { margin: 0; }\n";
        let mut reader = std::io::BufReader::new(std::io::Cursor::new(text));
        let overrides = find_directive(&mut reader).unwrap();
        assert_eq!(overrides.indent, Some(4));
    }

    #[test]
    fn test_find_directive_none() {
        let text = ".a { color: red; }\n";
        let mut reader = std::io::BufReader::new(std::io::Cursor::new(text));
        assert!(find_directive(&mut reader).is_none());
    }
}
