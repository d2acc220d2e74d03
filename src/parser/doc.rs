//! Doc-comment block grammar
//!
//! Comment text is split into spans separated by blank lines:
//! - Unindented spans are paragraphs, or a heading when a single line starts
//!   with `# ` and is followed by a blank line or the end of the text
//! - Indented spans are lists when their first line carries a list marker, code otherwise.
//!   A blank line followed by a block of the other kind ends the span.
//! - An unindented span that opens with a list marker is an unindented list
//!
//! A few heuristics recover from common indentation mistakes: a closing `}`
//! directly after indented lines belongs to the code above it, and an
//! unindented line directly before indented ones joins them when it looks
//! like a list item or ends with `{` or `\`.

use super::inline::{parse_inline, InlineSpan};
use super::patterns::{HEADING_RE, LIST_MARKER_RE};

/// A block of doc-comment content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocBlock {
    Paragraph(Vec<InlineSpan>),
    Heading(Vec<InlineSpan>),
    /// Code lines with their common indentation removed; blank lines are empty
    CodeBlock(Vec<String>),
    List(List),
}

/// A bulleted or numbered list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct List {
    pub items: Vec<ListItem>,
    /// The list was separated from the preceding block by a blank line
    pub force_blank_before: bool,
    /// A blank line appeared somewhere inside the list
    pub force_blank_between: bool,
}

impl List {
    /// Items are separated by blank lines
    #[must_use]
    pub fn blank_between(&self) -> bool {
        self.force_blank_between || self.items.iter().any(|item| item.content.len() != 1)
    }

    /// The list is separated from a preceding paragraph by a blank line
    #[must_use]
    pub fn blank_before(&self) -> bool {
        self.force_blank_before || self.blank_between()
    }
}

/// One list item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItem {
    /// Decimal number for numbered lists, `None` for bullets
    pub number: Option<String>,
    pub content: Vec<DocBlock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanKind {
    Paragraph,
    Heading,
    Code,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
    kind: SpanKind,
}

fn indented(line: &str) -> bool {
    line.starts_with([' ', '\t'])
}

/// Split a list line into its number (if numbered) and the text after the marker
fn list_marker(line: &str) -> Option<(Option<&str>, &str)> {
    let caps = LIST_MARKER_RE.captures(line.trim())?;
    let rest = caps.name("rest")?.as_str();
    if rest.trim().is_empty() {
        return None;
    }
    Some((caps.name("num").map(|m| m.as_str()), rest))
}

fn is_list(line: &str) -> bool {
    list_marker(line).is_some()
}

fn is_heading(line: &str) -> bool {
    HEADING_RE.is_match(line) && line.trim() != "#"
}

/// Whether the indented line after a run of blanks starts a block of the
/// other indented kind
///
/// Code lines are written behind a tab and list lines behind spaces, so a
/// space-indented list item ends a code span and a tab-indented non-item
/// line ends a list span.
fn switches_block_kind(rest: &[&str], list_span: bool) -> bool {
    let Some(next) = rest.iter().find(|l| !l.is_empty()) else {
        return false;
    };
    if !indented(next) {
        return false;
    }
    if list_span {
        !is_list(next) && next.starts_with('\t')
    } else {
        is_list(next) && !next.starts_with('\t')
    }
}

/// Width of the leading whitespace, with tabs counted as four columns
fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| matches!(c, ' ' | '\t'))
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

/// Parse comment text into blocks
///
/// # Arguments
/// * `lines` - Comment content with the comment markers already removed
#[must_use]
pub fn parse(lines: &[&str]) -> Vec<DocBlock> {
    // Whitespace-only lines are blank
    let lines: Vec<&str> = lines
        .iter()
        .map(|l| if l.trim().is_empty() { "" } else { *l })
        .collect();

    let mut blocks = Vec::new();
    let mut prev_end = 0;
    for span in parse_spans(&lines) {
        let body = &lines[span.start..span.end];
        let block = match span.kind {
            SpanKind::Paragraph => DocBlock::Paragraph(parse_inline(&body.join("\n"))),
            SpanKind::Heading => DocBlock::Heading(parse_inline(body[0][1..].trim())),
            SpanKind::Code => DocBlock::CodeBlock(unindent(body)),
            SpanKind::List => DocBlock::List(parse_list(body, prev_end < span.start)),
        };
        blocks.push(block);
        prev_end = span.end;
    }
    blocks
}

fn parse_spans(lines: &[&str]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut i = 0;
    // Lines before this index are treated as indented
    let mut force_indent = 0;

    'spans: loop {
        while i < lines.len() && lines[i].is_empty() {
            i += 1;
        }
        if i >= lines.len() {
            break;
        }

        let start = i;
        let mut end;
        let kind;

        if i < force_indent || indented(lines[i]) {
            // Indented span, running over blank lines. Unindented list items
            // are allowed after a forced list start, up to the first blank.
            let list_span = is_list(lines[i]);
            let mut unindented_list_ok = list_span && i < force_indent;
            i += 1;
            while i < lines.len() {
                if lines[i].is_empty() {
                    unindented_list_ok = false;
                    if switches_block_kind(&lines[i..], list_span) {
                        break;
                    }
                } else if !(i < force_indent
                    || indented(lines[i])
                    || (unindented_list_ok && is_list(lines[i])))
                {
                    break;
                }
                i += 1;
            }

            end = i;
            while end > start && lines[end - 1].is_empty() {
                end -= 1;
            }
            // A closing brace right after code belongs to it
            if end < lines.len() && lines[end].starts_with('}') {
                end += 1;
            }

            kind = if list_span {
                SpanKind::List
            } else {
                SpanKind::Code
            };
        } else if is_list(lines[i]) {
            // Unindented list: continues across blank lines only when more
            // items follow
            i += 1;
            while i < lines.len() {
                if !lines[i].is_empty() {
                    i += 1;
                    continue;
                }
                match lines[i..].iter().position(|l| !l.is_empty()) {
                    Some(offset) if is_list(lines[i + offset]) => i += offset,
                    _ => break,
                }
            }
            end = i;
            kind = SpanKind::List;
        } else {
            // Paragraph: ends at the next blank or indented line
            i += 1;
            while i < lines.len() && !lines[i].is_empty() && !indented(lines[i]) {
                i += 1;
            }
            end = i;

            if i < lines.len() && !lines[i].is_empty() && !is_list(lines[i]) {
                // The next line is indented but is not a list item
                if is_list(lines[i - 1]) {
                    // Mis-indented list: hand the trailing list lines over
                    force_indent = end;
                    end -= 1;
                    while end > start && is_list(lines[end - 1]) {
                        end -= 1;
                    }
                } else if lines[i - 1].ends_with('{') || lines[i - 1].ends_with('\\') {
                    // Mis-indented code: the opening line joins the code below
                    force_indent = end;
                    end -= 1;
                }
                if start == end && force_indent > start {
                    i = start;
                    continue 'spans;
                }
            }

            // A heading stands alone between blank lines
            let alone = end == lines.len() || lines[end].is_empty();
            kind = if end - start == 1 && alone && is_heading(lines[start]) {
                SpanKind::Heading
            } else {
                SpanKind::Paragraph
            };
        }

        spans.push(Span { start, end, kind });
        i = end;
    }
    spans
}

/// Build a list from a list span
fn parse_list(lines: &[&str], force_blank_before: bool) -> List {
    let numbered = list_marker(lines[0]).is_some_and(|(num, _)| num.is_some());
    // Markers indented deeper than the first one are wrapped item text
    let item_indent = indent_width(lines[0]);
    let mut list = List {
        force_blank_before,
        ..List::default()
    };
    let mut text: Vec<&str> = Vec::new();

    for line in lines {
        let mut line = *line;
        if let Some((num, rest)) = list_marker(line) {
            if num.is_some() == numbered && indent_width(line) <= item_indent {
                flush_item_text(&mut list, &mut text);
                list.items.push(ListItem {
                    number: num.map(String::from),
                    content: Vec::new(),
                });
                line = rest;
            }
        }
        let line = line.trim();
        if line.is_empty() {
            list.force_blank_between = true;
            flush_item_text(&mut list, &mut text);
            continue;
        }
        text.push(line);
    }
    flush_item_text(&mut list, &mut text);
    list
}

/// Close the pending paragraph of the last list item
fn flush_item_text(list: &mut List, text: &mut Vec<&str>) {
    if let Some(item) = list.items.last_mut() {
        if !text.is_empty() {
            item.content
                .push(DocBlock::Paragraph(parse_inline(&text.join("\n"))));
        }
    }
    text.clear();
}

/// Remove the longest common leading whitespace from non-blank lines
fn unindent(lines: &[&str]) -> Vec<String> {
    let mut prefix: Option<&str> = None;
    for line in lines.iter().filter(|l| !l.is_empty()) {
        let ws = &line[..line.len() - line.trim_start_matches([' ', '\t']).len()];
        prefix = Some(match prefix {
            None => ws,
            Some(p) => {
                let common = p
                    .bytes()
                    .zip(ws.bytes())
                    .take_while(|(a, b)| a == b)
                    .count();
                &p[..common]
            }
        });
    }
    let cut = prefix.map_or(0, str::len);
    lines
        .iter()
        .map(|l| if l.is_empty() { String::new() } else { l[cut..].to_string() })
        .collect()
}
