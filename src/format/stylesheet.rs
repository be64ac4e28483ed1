//! Stylesheet pretty-printer
//!
//! Reflows CSS text one logical line at a time: the splitter ends lines at
//! `{`, `}` and `;`, the depth tracker counts open brace blocks, and each
//! line is re-emitted as `indent + trimmed`. Declaration sorting and
//! comment stripping run as whole-text pre-passes before splitting, the
//! same order the line loop would observe them in.

use std::borrow::Cow;

use crate::format::DepthTracker;
use crate::minify::stylesheet::collapse;
use crate::parser::patterns::{CSS_COMMENT_RE, RULE_BODY_RE};
use crate::parser::split_stylesheet;
use crate::process::FormatOptions;

/// Reformat stylesheet text according to `options`.
///
/// Empty input is returned unchanged. Malformed input never errors; the
/// output is best-effort.
#[must_use]
pub fn format(source: &str, options: &FormatOptions) -> String {
    if source.is_empty() {
        return String::new();
    }

    let mut text = Cow::Borrowed(source);
    if options.remove_comments {
        text = Cow::Owned(CSS_COMMENT_RE.replace_all(&text, "").into_owned());
    }
    if options.sort_properties {
        text = Cow::Owned(sort_rule_bodies(&text));
    }

    // Compact output skips indentation entirely
    if options.compact {
        return collapse(&text);
    }

    let mut tracker = DepthTracker::new();
    let mut out: Vec<String> = Vec::new();

    for line in split_stylesheet(&text) {
        let trimmed = line.trim();
        if trimmed.starts_with('}') {
            tracker.close();
        }
        out.push(format!("{}{}", tracker.indent(options.indent), trimmed));
        if trimmed.ends_with('{') {
            tracker.open();
        }
    }

    out.join("\n")
}

/// Lexically sort the declarations inside each innermost `{ ... }` body.
///
/// The body is split on `;`, empty declarations are dropped, and the rest
/// are rejoined in plain string order. Only innermost bodies match, so the
/// outer block of a media query is left alone while the rules inside it
/// are each sorted. Ordering dependencies (`!important` overrides, repeated
/// properties) are ignored.
fn sort_rule_bodies(text: &str) -> String {
    RULE_BODY_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let mut decls: Vec<&str> = caps[1]
                .split(';')
                .map(str::trim)
                .filter(|decl| !decl.is_empty())
                .collect();
            decls.sort_unstable();
            format!("{{{}}}", decls.join(";"))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Language;

    fn options() -> FormatOptions {
        FormatOptions::new(Language::Css)
    }

    #[test]
    fn test_basic_rule() {
        let out = format(".a{color:red;}", &options());
        assert_eq!(out, ".a {\n  color:red;\n}");
    }

    #[test]
    fn test_nested_blocks_indent() {
        let out = format("@media screen{.a{color:red;}}", &options());
        assert_eq!(
            out,
            "@media screen {\n  .a {\n    color:red;\n  }\n}"
        );
    }

    #[test]
    fn test_idempotent() {
        let opts = options();
        let once = format(".a{color:red;}.b{margin:0;}", &opts);
        let twice = format(&once, &opts);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(format("", &options()), "");
    }

    #[test]
    fn test_remove_comments() {
        let opts = FormatOptions {
            remove_comments: true,
            ..options()
        };
        let out = format("/* x */ .a{color:red;}", &opts);
        assert!(!out.contains("/*"));
        assert!(!out.contains("*/"));
        assert!(out.contains("color:red;"));
    }

    #[test]
    fn test_comments_kept_by_default() {
        let out = format("/* x */ .a{color:red;}", &options());
        assert!(out.contains("/* x */"));
    }

    #[test]
    fn test_sort_properties() {
        let opts = FormatOptions {
            sort_properties: true,
            ..options()
        };
        let out = format(".a { color: red; border: 1px; }", &opts);
        let border_pos = out.find("border").unwrap();
        let color_pos = out.find("color").unwrap();
        assert!(border_pos < color_pos);
    }

    #[test]
    fn test_sort_properties_idempotent() {
        let opts = FormatOptions {
            sort_properties: true,
            ..options()
        };
        let once = format(".a { color: red; border: 1px; z-index: 2; }", &opts);
        assert_eq!(format(&once, &opts), once);
    }

    #[test]
    fn test_sort_only_innermost_bodies() {
        let opts = FormatOptions {
            sort_properties: true,
            ..options()
        };
        let out = format("@media x{.b{z:1;a:2;}}", &opts);
        let a_pos = out.find("a:2").unwrap();
        let z_pos = out.find("z:1").unwrap();
        assert!(a_pos < z_pos);
    }

    #[test]
    fn test_compact_mode() {
        let opts = FormatOptions {
            compact: true,
            ..options()
        };
        let out = format(".a {\n  color: red;\n}", &opts);
        assert_eq!(out, ".a{color:red;}");
    }

    #[test]
    fn test_stray_closing_brace() {
        // Malformed input must not panic or indent negatively
        let out = format("}.a{color:red;}", &options());
        assert!(out.starts_with('}'));
        assert!(out.contains(".a {"));
    }

    #[test]
    fn test_custom_indent_size() {
        let opts = FormatOptions {
            indent: 4,
            ..options()
        };
        let out = format(".a{color:red;}", &opts);
        assert_eq!(out, ".a {\n    color:red;\n}");
    }
}
