/// Regex patterns for comment text
///
/// All patterns are compiled once at first use using `LazyLock`.
use std::sync::LazyLock;

use regex::Regex;

/// Build a regex from a compile-time constant pattern.
///
/// # Panics
///
/// Panics if the pattern is invalid. All patterns in this module are
/// compile-time constants that are verified by tests, so the panic can only
/// occur at first access of the `LazyLock` static during development.
fn build_re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|_| panic!("Invalid regex pattern: {pattern}"))
}

// ===== LINE STRUCTURE =====

/// Comment content made only of repeated punctuation, e.g. `=======`
pub static DECORATION_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^[=\-*#~+_.]+$"));

/// List item marker on a trimmed line: bullet (`-`, `*`, `+`, `•`) or number
/// (`1.`, `2)`), captured as `bullet` / `num`, followed by whitespace and text
pub static LIST_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(r"^(?:(?P<bullet>[-*+•])|(?P<num>[0-9]+)[.)])(?P<rest>[ \t].*)$")
});

/// Heading line: `#` followed by a space or tab
pub static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^#[ \t]"));

// ===== INLINE SPANS =====

/// Automatic links, doc links and `_emphasis_` in one alternation
///
/// URLs stop before trailing punctuation. Doc links name an identifier,
/// optionally qualified by an import path and up to two selectors. Emphasis
/// needs non-word characters on both sides so `snake_case_names` stay plain.
pub static INLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(concat!(
        r"(?P<url>\b(?:https?|ftp|file|gopher|mailto|nntp)://[^\s<>]*[^\s<>.,:;?!'\x22)\]])",
        r"|(?P<doc>\[\*?[A-Za-z_][A-Za-z0-9_]*(?:/[A-Za-z0-9_.\-]+)*(?:\.[A-Za-z_][A-Za-z0-9_]*){0,2}\])",
        r"|(?P<em>\b_[^_\s](?:[^_\n]*[^_\s])?_\b)",
    ))
});

/// Check whether comment content is a decoration line
#[must_use]
pub fn is_decoration_line(content: &str) -> bool {
    DECORATION_RE.is_match(content.trim())
}
