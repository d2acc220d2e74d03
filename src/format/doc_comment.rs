//! Structured rendering of doc-comment runs
//!
//! The comment text is parsed into paragraphs, headings, code blocks and
//! lists. Paragraphs and list items are rewrapped, headings and code are
//! emitted in canonical form, and blank comment lines at either edge of the
//! run are kept as they were.

use crate::format::wrap::wrap_text;
use crate::parser::doc::{self, DocBlock, List};
use crate::parser::inline::flatten;

/// Count blank lines at the start and end of `lines`
///
/// An all-blank slice counts entirely as leading.
pub(crate) fn blank_edges(lines: &[&str]) -> (usize, usize) {
    let leading = lines.iter().take_while(|l| l.trim().is_empty()).count();
    if leading == lines.len() {
        return (leading, 0);
    }
    let trailing = lines.iter().rev().take_while(|l| l.trim().is_empty()).count();
    (leading, trailing)
}

/// Output context shared by every block of one run
struct Renderer<'a> {
    /// Indent plus bare marker, used for blank comment lines
    bare: String,
    /// Indent plus marker plus one space, used before text
    text_prefix: String,
    column_width: usize,
    tab_width: usize,
    out: &'a mut Vec<String>,
}

impl Renderer<'_> {
    fn blank(&mut self) {
        self.out.push(self.bare.clone());
    }

    fn block(&mut self, block: &DocBlock) {
        match block {
            DocBlock::Paragraph(spans) => {
                let prefix = self.text_prefix.clone();
                self.wrapped(&flatten(spans), &prefix, &prefix);
            }
            DocBlock::Heading(spans) => {
                let line = format!("{}# {}", self.text_prefix, flatten(spans));
                self.out.push(line);
            }
            DocBlock::CodeBlock(lines) => {
                for line in lines {
                    if line.is_empty() {
                        self.blank();
                    } else {
                        let line = format!("{}\t{line}", self.bare);
                        self.out.push(line);
                    }
                }
            }
            DocBlock::List(list) => self.list(list),
        }
    }

    fn list(&mut self, list: &List) {
        for (i, item) in list.items.iter().enumerate() {
            if i > 0 && list.blank_between() {
                self.blank();
            }
            let bullet = match &item.number {
                Some(n) => format!("{n}. "),
                None => "- ".to_string(),
            };
            let first = format!("{}  {bullet}", self.text_prefix);
            let continuation = format!("{}{}", self.text_prefix, " ".repeat(2 + bullet.len()));

            for (j, block) in item.content.iter().enumerate() {
                if j > 0 {
                    self.blank();
                }
                match block {
                    DocBlock::Paragraph(spans) => {
                        let prefix = if j == 0 { &first } else { &continuation };
                        self.wrapped(&flatten(spans), prefix, &continuation);
                    }
                    other => self.block(other),
                }
            }
        }
    }

    fn wrapped(&mut self, text: &str, prefix: &str, subsequent: &str) {
        let lines = wrap_text(text, prefix, subsequent, self.column_width, self.tab_width);
        self.out.extend(lines);
    }
}

/// A blank comment line separates two blocks unless a list follows a
/// paragraph it was written flush against
fn needs_separator(prev: &DocBlock, next: &DocBlock) -> bool {
    match (prev, next) {
        (DocBlock::Paragraph(_), DocBlock::List(list)) => list.blank_before(),
        _ => true,
    }
}

/// Render a run of doc-comment content
///
/// # Arguments
/// * `content` - Comment lines with indent and marker removed
/// * `indent` - Indentation to put before every output line
/// * `marker` - Bare comment token, e.g. `//`
/// * `column_width` - Target width in display columns
/// * `tab_width` - Tab stop distance
#[must_use]
pub fn render(
    content: &[&str],
    indent: &str,
    marker: &str,
    column_width: usize,
    tab_width: usize,
) -> Vec<String> {
    let (leading, trailing) = blank_edges(content);
    let body = &content[leading..content.len() - trailing];
    let blocks = doc::parse(body);

    let mut out = Vec::new();
    let mut renderer = Renderer {
        bare: format!("{indent}{marker}"),
        text_prefix: format!("{indent}{marker} "),
        column_width,
        tab_width,
        out: &mut out,
    };

    for _ in 0..leading {
        renderer.blank();
    }
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 && needs_separator(&blocks[i - 1], block) {
            renderer.blank();
        }
        renderer.block(block);
    }
    for _ in 0..trailing {
        renderer.blank();
    }
    out
}
