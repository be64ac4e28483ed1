//! Structural line splitting
//!
//! Breaks raw text into logical lines by inserting breaks at structural
//! boundaries: before `<` and after `>` for markup, after `{`, `}` and `;`
//! for stylesheets. Operates on the text as given; constructs spanning
//! several physical lines are not re-joined first, so multi-line attribute
//! values or comments can split unevenly. Input without any boundary marker
//! degrades to a single fragment.

use crate::parser::patterns::{
    BRACE_CLOSE_RE, BRACE_OPEN_RE, SEMI_RE, TAG_GAP_RE, TEXT_AFTER_TAG_RE, TEXT_BEFORE_TAG_RE,
};

/// Split markup text into logical lines, one tag or text run per line.
///
/// Whitespace-only gaps between adjacent tags collapse to a single break,
/// which is what makes format mode idempotent on its own output. Blank
/// lines inside text content are kept so the empty-line filter has
/// something to act on.
#[must_use]
pub fn split_markup(source: &str) -> Vec<String> {
    let text = TAG_GAP_RE.replace_all(source, ">\n<");
    let text = TEXT_AFTER_TAG_RE.replace_all(&text, ">\n$1");
    let text = TEXT_BEFORE_TAG_RE.replace_all(&text, "$1\n<");
    text.split('\n').map(str::to_string).collect()
}

/// Split stylesheet text into logical lines.
///
/// The opening brace stays glued to its selector (`sel {`), each closing
/// brace gets its own line, and every `;` ends a line. Whitespace-only
/// fragments are dropped.
#[must_use]
pub fn split_stylesheet(source: &str) -> Vec<String> {
    let text = BRACE_OPEN_RE.replace_all(source, " {\n");
    let text = BRACE_CLOSE_RE.replace_all(&text, "\n}\n");
    let text = SEMI_RE.replace_all(&text, ";\n");
    text.split('\n')
        .filter(|fragment| !fragment.trim().is_empty())
        .map(str::to_string)
        .collect()
}
