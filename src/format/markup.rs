//! Markup pretty-printer
//!
//! Reflows HTML text one logical line at a time: the splitter isolates each
//! tag, the depth tracker counts open elements, and tag lines are re-emitted
//! as `indent + trimmed`. Text content is emitted trimmed but unindented;
//! the line-level rewriter does not re-position text relative to its
//! enclosing element.

use std::borrow::Cow;

use crate::format::DepthTracker;
use crate::parser::patterns::{is_opening_tag, CLOSING_TAG_RE, HTML_COMMENT_RE, INLINE_STYLE_RE};
use crate::parser::split_markup;
use crate::process::FormatOptions;

/// Reformat markup text according to `options`.
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
        text = Cow::Owned(HTML_COMMENT_RE.replace_all(&text, "").into_owned());
    }

    let mut tracker = DepthTracker::new();
    let mut out: Vec<String> = Vec::new();

    for line in split_markup(&text) {
        let mut line = line.trim().to_string();
        if options.remove_inline_styles && line.starts_with('<') {
            line = INLINE_STYLE_RE.replace_all(&line, "").into_owned();
        }
        if options.remove_empty_lines && line.is_empty() {
            continue;
        }

        if CLOSING_TAG_RE.is_match(&line) {
            tracker.close();
        }
        if line.starts_with('<') {
            out.push(format!("{}{}", tracker.indent(options.indent), line));
        } else {
            // Text content keeps its own line, unindented
            out.push(line.clone());
        }
        if is_opening_tag(&line) {
            tracker.open();
        }
    }

    out.join("\n")
}
