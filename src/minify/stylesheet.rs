//! Stylesheet minifier
//!
//! Collapses every whitespace run to a single space, then removes the
//! spaces adjacent to the structural delimiters `{`, `}`, `:` and `;`.
//! No line breaks are added; the result is a single line.

use std::borrow::Cow;

use crate::parser::patterns::{CSS_COMMENT_RE, CSS_DELIM_WS_RE, WS_RUN_RE};
use crate::process::MinifyOptions;

/// Minify stylesheet text according to `options`.
#[must_use]
pub fn minify(source: &str, options: &MinifyOptions) -> String {
    if source.is_empty() {
        return String::new();
    }

    let mut text = Cow::Borrowed(source);
    if options.remove_comments {
        text = Cow::Owned(CSS_COMMENT_RE.replace_all(&text, "").into_owned());
    }
    if options.remove_whitespace {
        return collapse(&text);
    }
    text.into_owned()
}

/// Whitespace collapse shared with the formatter's compact mode.
pub(crate) fn collapse(text: &str) -> String {
    let text = WS_RUN_RE.replace_all(text, " ");
    let text = CSS_DELIM_WS_RE.replace_all(&text, "$1");
    text.trim().to_string()
}
