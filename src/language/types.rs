/// Comment syntax descriptors
use std::fmt;

/// Default prefix for interior lines of a block comment
pub const DEFAULT_BLOCK_PREFIX: &str = " * ";

/// How an input in a given language is processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageKind {
    /// Source code: comments are located line by line and rewrapped, code is untouched
    Source,
    /// Marked-up document: only free-text paragraphs are rewrapped
    Document,
}

/// Comment syntax for one programming or markup language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    /// Lowercase identifier, e.g. `go`
    pub name: &'static str,
    /// File extensions including the dot, e.g. `.go`
    pub extensions: &'static [&'static str],
    /// Line comment tokens in match order, e.g. `//`, `#`
    pub line_markers: &'static [&'static str],
    /// Block comment openers, paired by index with `block_end`
    pub block_start: &'static [&'static str],
    /// Block comment closers
    pub block_end: &'static [&'static str],
    /// Prefix for interior lines of rewrapped block comments
    pub block_prefix: Option<&'static str>,
    /// Text that, directly after a line marker, marks the line as a machine
    /// directive (`//go:build`, `//nolint`) rather than prose
    pub directives: &'static [&'static str],
    /// Line marker whose runs follow the structured doc-comment grammar
    pub doc_marker: Option<&'static str>,
    pub kind: LanguageKind,
}

impl Language {
    /// Prefix used for interior lines of a rewrapped block comment
    #[must_use]
    pub fn block_prefix(&self) -> &'static str {
        self.block_prefix.unwrap_or(DEFAULT_BLOCK_PREFIX)
    }

    /// Closing token paired with the opener at `index`
    ///
    /// Falls back to the first closer when the table lists fewer closers than
    /// openers.
    #[must_use]
    pub fn block_end_for(&self, index: usize) -> Option<&'static str> {
        self.block_end
            .get(index)
            .or_else(|| self.block_end.first())
            .copied()
    }

    #[must_use]
    pub fn is_document(&self) -> bool {
        self.kind == LanguageKind::Document
    }

    /// Whether runs using `marker` are parsed as structured doc comments
    #[must_use]
    pub fn has_doc_comments(&self, marker: &str) -> bool {
        self.doc_marker
            .is_some_and(|doc| doc == marker.trim_end_matches(' '))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: Language = Language {
        name: "sample",
        extensions: &[".smp"],
        line_markers: &["//"],
        block_start: &["/*", "(*"],
        block_end: &["*/"],
        block_prefix: None,
        directives: &[],
        doc_marker: Some("//"),
        kind: LanguageKind::Source,
    };

    #[test]
    fn test_block_prefix_default() {
        assert_eq!(SAMPLE.block_prefix(), " * ");
    }

    #[test]
    fn test_block_end_pairing() {
        assert_eq!(SAMPLE.block_end_for(0), Some("*/"));
        // Missing closer falls back to the first one
        assert_eq!(SAMPLE.block_end_for(1), Some("*/"));
    }

    #[test]
    fn test_has_doc_comments() {
        assert!(SAMPLE.has_doc_comments("//"));
        assert!(SAMPLE.has_doc_comments("// "));
        assert!(!SAMPLE.has_doc_comments("#"));
    }
}
