//! Paragraph rewrapping for Markdown documents
//!
//! Only top-level paragraphs are touched. Headings, lists, block quotes,
//! code, tables and HTML pass through line for line.

use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag};

use crate::format::wrap::wrap_text;

/// Locates rewrappable paragraphs in a document
pub trait ParagraphLocator {
    /// Half-open line ranges of top-level paragraphs, in document order
    fn paragraph_lines(&self, text: &str) -> Vec<Range<usize>>;
}

/// CommonMark paragraph locator with GitHub tables and strikethrough
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonMarkLocator;

impl CommonMarkLocator {
    fn options() -> Options {
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
    }
}

impl ParagraphLocator for CommonMarkLocator {
    fn paragraph_lines(&self, text: &str) -> Vec<Range<usize>> {
        let newlines: Vec<usize> = text
            .bytes()
            .enumerate()
            .filter_map(|(i, b)| (b == b'\n').then_some(i))
            .collect();
        let line_of = |offset: usize| newlines.partition_point(|&nl| nl < offset);

        let mut ranges = Vec::new();
        let mut depth = 0usize;
        for (event, range) in Parser::new_ext(text, Self::options()).into_offset_iter() {
            match event {
                Event::Start(tag) => {
                    if depth == 0 && matches!(tag, Tag::Paragraph) {
                        let source = text[range.clone()].trim_end();
                        if !source.is_empty() {
                            let start = line_of(range.start);
                            let end = line_of(range.start + source.len() - 1) + 1;
                            ranges.push(start..end);
                        }
                    }
                    depth += 1;
                }
                Event::End(_) => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        ranges
    }
}

/// Rewrap the top-level paragraphs of a document
///
/// Lines outside the located paragraphs are emitted unchanged. The result
/// has no trailing newline handling of its own; lines are joined with `\n`.
#[must_use]
pub fn render_document<L: ParagraphLocator + ?Sized>(
    locator: &L,
    text: &str,
    column_width: usize,
    tab_width: usize,
) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut next = 0;

    for range in locator.paragraph_lines(text) {
        let end = range.end.min(lines.len());
        if range.start < next || range.start >= end {
            continue;
        }
        out.extend(lines[next..range.start].iter().map(ToString::to_string));
        // Words are packed without regard to Markdown syntax, so a `-` or
        // `1.` can land at the start of a line and begin a list there
        out.extend(wrap_text(
            &lines[range.start..end].join("\n"),
            "",
            "",
            column_width,
            tab_width,
        ));
        next = end;
    }
    out.extend(lines[next..].iter().map(ToString::to_string));

    log::debug!("rewrapped markdown document of {} lines", lines.len());
    out.join("\n")
}
