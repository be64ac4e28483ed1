/// Regex patterns for markup and stylesheet syntax
///
/// All patterns are compiled once at startup using `LazyLock`.
///
/// Tag-name patterns use case-insensitive + unicode flags
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Build a case-insensitive regex from a compile-time constant pattern.
///
/// # Panics
///
/// Panics if the pattern is invalid. This is acceptable because all patterns
/// in this module are compile-time constants that are verified by tests.
/// The panic occurs at first access of the `LazyLock` static.
fn build_re(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .unicode(true)
        .build()
        .unwrap_or_else(|_| panic!("Invalid regex pattern: {pattern}"))
}

// ===== MARKUP STRUCTURE =====

// Closing tag at the start of a line: </tag ...
pub static CLOSING_TAG_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^\s*</"));

// A line that is exactly one tag: <tag ...> with no nested angle brackets
pub static SINGLE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^<[a-z][^<>]*>$"));

// Self-closed tag: ... />
pub static SELF_CLOSING_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"/\s*>$"));

// Void elements never take a closing tag, so they never open a scope
pub static VOID_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(r"^<(area|base|br|col|embed|hr|img|input|link|meta|param|source|track|wbr)[\s/>]")
});

// ===== MARKUP LINE BREAKING =====

// Whitespace-only gap between two tags, collapsed to a single break
pub static TAG_GAP_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r">\s*<"));

// Text content immediately following a tag
pub static TEXT_AFTER_TAG_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r">\s*([^<\s])"));

// Text content immediately preceding a tag
pub static TEXT_BEFORE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"([^>\s])\s*<"));

// ===== MARKUP REWRITING =====

// HTML comment, spanning lines
pub static HTML_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"(?s)<!--.*?-->"));

// Inline style attribute, double- or single-quoted
pub static INLINE_STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r#"\s+style\s*=\s*("[^"]*"|'[^']*')"#));

// Any doctype declaration
pub static DOCTYPE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"<!DOCTYPE[^>]*>"));

// Open/close tags of the optional document structure elements
pub static OPTIONAL_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"</?(html|head|body)(\s[^<>]*)?>"));

// Double-quoted attribute; collapse requires name == value, checked by the caller
// (the regex crate has no backreferences)
pub static QUOTED_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r#"([a-z][a-z0-9-]*)\s*=\s*"([^"]*)""#));

// Whitespace adjacent to tag delimiters
pub static WS_BEFORE_LT_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\s+<"));
pub static WS_AFTER_GT_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r">\s+"));

// ===== STYLESHEET STRUCTURE =====

// Opening brace, glued to its selector with a single space
pub static BRACE_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\s*\{\s*"));

// Closing brace, isolated on its own line
pub static BRACE_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\s*\}\s*"));

// Declaration terminator
pub static SEMI_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r";\s*"));

// CSS comment, spanning lines
pub static CSS_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"(?s)/\*.*?\*/"));

// Innermost rule body, for declaration sorting
pub static RULE_BODY_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\{([^{}]*)\}"));

// Whitespace adjacent to stylesheet delimiters
pub static CSS_DELIM_WS_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\s*([{}:;])\s*"));

// ===== SHARED =====

// Any whitespace run
pub static WS_RUN_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\s+"));

/// Check whether a trimmed line is a start tag that opens a nesting scope.
///
/// A line opens a scope when it is a single start tag that is neither
/// self-closed nor a void element. Closing tags, comments and doctype
/// declarations fail the tag-name anchor of `SINGLE_TAG_RE`, and a tag line
/// carrying its own inline close cannot match its full-line form.
#[must_use]
pub fn is_opening_tag(line: &str) -> bool {
    SINGLE_TAG_RE.is_match(line) && !SELF_CLOSING_RE.is_match(line) && !VOID_TAG_RE.is_match(line)
}
