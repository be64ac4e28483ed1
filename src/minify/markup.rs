//! Markup minifier
//!
//! Collapses whitespace runs and strips the spaces adjacent to `>` and `<`.
//! The optional transforms are syntactic only: boolean attributes collapse
//! when the attribute name literally equals its value, any doctype is
//! rewritten to `<!DOCTYPE html>`, and the `<html>`, `<head>` and `<body>`
//! open/close tags can be dropped outright. The last of these is lossy;
//! nothing re-checks that the remainder is a well-formed document.

use std::borrow::Cow;

use crate::parser::patterns::{
    DOCTYPE_RE, HTML_COMMENT_RE, OPTIONAL_TAG_RE, QUOTED_ATTR_RE, WS_BEFORE_LT_RE, WS_AFTER_GT_RE,
    WS_RUN_RE,
};
use crate::process::MinifyOptions;

/// Minify markup text according to `options`.
#[must_use]
pub fn minify(source: &str, options: &MinifyOptions) -> String {
    if source.is_empty() {
        return String::new();
    }

    let mut text = Cow::Borrowed(source);
    if options.remove_comments {
        text = Cow::Owned(HTML_COMMENT_RE.replace_all(&text, "").into_owned());
    }
    if options.shorten_doctype {
        text = Cow::Owned(DOCTYPE_RE.replace_all(&text, "<!DOCTYPE html>").into_owned());
    }
    if options.remove_optional_tags {
        text = Cow::Owned(OPTIONAL_TAG_RE.replace_all(&text, "").into_owned());
    }
    if options.collapse_boolean_attributes {
        text = Cow::Owned(collapse_boolean_attributes(&text));
    }
    if options.remove_whitespace {
        let collapsed = WS_RUN_RE.replace_all(&text, " ");
        let collapsed = WS_BEFORE_LT_RE.replace_all(&collapsed, "<");
        let collapsed = WS_AFTER_GT_RE.replace_all(&collapsed, ">");
        return collapsed.trim().to_string();
    }
    text.into_owned()
}

/// Rewrite `attr="attr"` as bare `attr`.
///
/// The match is name == value, byte for byte. `checked="checked"` collapses;
/// `checked="true"` and `Checked="checked"` do not. There is no lookup
/// against the real boolean-attribute list.
fn collapse_boolean_attributes(text: &str) -> String {
    QUOTED_ATTR_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            if caps[1] == caps[2] {
                caps[1].to_string()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Language;

    fn options() -> MinifyOptions {
        MinifyOptions::new(Language::Html)
    }

    #[test]
    fn test_collapse_between_tags() {
        let out = minify("<div>\n    <p>Hi</p>\n</div>", &options());
        assert_eq!(out, "<div><p>Hi</p></div>");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(minify("", &options()), "");
    }

    #[test]
    fn test_output_has_no_newlines() {
        let out = minify("<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>\n", &options());
        assert!(!out.contains('\n'));
    }

    #[test]
    fn test_remove_comments() {
        let opts = MinifyOptions {
            remove_comments: true,
            ..options()
        };
        let out = minify("<div><!-- a\nmultiline note --><p>x</p></div>", &opts);
        assert_eq!(out, "<div><p>x</p></div>");
    }

    #[test]
    fn test_boolean_attribute_collapse() {
        let opts = MinifyOptions {
            collapse_boolean_attributes: true,
            ..options()
        };
        let out = minify("<input checked=\"checked\" type=\"text\">", &opts);
        assert_eq!(out, "<input checked type=\"text\">");
    }

    #[test]
    fn test_boolean_attribute_requires_exact_match() {
        let opts = MinifyOptions {
            collapse_boolean_attributes: true,
            ..options()
        };
        let out = minify("<input checked=\"true\">", &opts);
        assert_eq!(out, "<input checked=\"true\">");
    }

    #[test]
    fn test_shorten_doctype() {
        let opts = MinifyOptions {
            shorten_doctype: true,
            ..options()
        };
        let input = "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0//EN\"><p>x</p>";
        let out = minify(input, &opts);
        assert_eq!(out, "<!DOCTYPE html><p>x</p>");
    }

    #[test]
    fn test_remove_optional_tags() {
        let opts = MinifyOptions {
            remove_optional_tags: true,
            ..options()
        };
        let out = minify("<html><head><title>t</title></head><body><p>x</p></body></html>", &opts);
        assert_eq!(out, "<title>t</title><p>x</p>");
    }

    #[test]
    fn test_whitespace_kept_when_disabled() {
        let opts = MinifyOptions {
            remove_whitespace: false,
            shorten_doctype: true,
            ..options()
        };
        let out = minify("<!doctype html>\n<p>x</p>\n", &opts);
        assert_eq!(out, "<!DOCTYPE html>\n<p>x</p>\n");
    }
}
