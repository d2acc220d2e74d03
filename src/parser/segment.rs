/// Segment classification: splitting source lines into code and comments
///
/// Segments reference the caller's line array by index range, so the output
/// tiles the input exactly and never copies text.
use std::ops::Range;

use crate::language::Language;

/// Classification of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind<'a> {
    /// Executable code, emitted verbatim
    Code,
    /// Run of line comments sharing indent and base marker
    ///
    /// `marker` is the comment token plus one trailing space when any line of
    /// the run used one, e.g. `"// "`.
    LineComment { marker: &'a str },
    /// Block comment from the line holding `open` through the line holding `close`
    BlockComment {
        open: &'static str,
        close: &'static str,
    },
}

/// A maximal run of lines sharing one classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind<'a>,
    /// Half-open range into the classified line array
    pub lines: Range<usize>,
    /// Leading whitespace of the first line (empty for code)
    pub indent: &'a str,
}

impl<'a> Segment<'a> {
    fn code(lines: Range<usize>) -> Self {
        Self {
            kind: SegmentKind::Code,
            lines,
            indent: "",
        }
    }

    /// Number of lines covered
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn is_comment(&self) -> bool {
        !matches!(self.kind, SegmentKind::Code)
    }

    /// The source lines of this segment
    #[must_use]
    pub fn slice<'b>(&self, lines: &'b [&'a str]) -> &'b [&'a str] {
        &lines[self.lines.clone()]
    }
}

/// Split a line into its leading whitespace and the rest
#[must_use]
pub fn split_indent(line: &str) -> (&str, &str) {
    let trimmed = line.trim_start_matches([' ', '\t']);
    (&line[..line.len() - trimmed.len()], trimmed)
}

/// Check whether a line is a prose line comment
///
/// Returns the indent and the marker (token plus one trailing space if the
/// line has one). Blank lines and directive lines such as `//go:generate` are
/// not comments.
#[must_use]
pub fn match_line_comment<'a>(line: &'a str, lang: &Language) -> Option<(&'a str, &'a str)> {
    let (indent, trimmed) = split_indent(line);
    if trimmed.is_empty() {
        return None;
    }
    let token = lang
        .line_markers
        .iter()
        .find(|m| trimmed.starts_with(**m))?;
    let rest = &trimmed[token.len()..];
    if lang.directives.iter().any(|d| rest.starts_with(d)) {
        return None;
    }
    let marker_len = if rest.starts_with(' ') {
        token.len() + 1
    } else {
        token.len()
    };
    Some((indent, &trimmed[..marker_len]))
}

/// Check whether a line opens a block comment
///
/// Returns the indent and the index of the matched opener.
fn match_block_start<'a>(line: &'a str, lang: &Language) -> Option<(&'a str, usize)> {
    let (indent, trimmed) = split_indent(line);
    let index = lang
        .block_start
        .iter()
        .position(|open| trimmed.starts_with(open))?;
    Some((indent, index))
}

/// Find the line index holding the closer of a block comment opened on `start`
fn find_block_end(lines: &[&str], start: usize, open: &str, close: &str) -> Option<usize> {
    let (_, first) = split_indent(lines[start]);
    if first[open.len()..].contains(close) {
        return Some(start);
    }
    (start + 1..lines.len()).find(|&i| lines[i].contains(close))
}

/// Whether a line starts a comment segment of either kind
fn starts_comment(line: &str, lang: &Language) -> bool {
    match_block_start(line, lang).is_some() || match_line_comment(line, lang).is_some()
}

/// Append a code range, merging with a preceding code segment
fn push_code(segments: &mut Vec<Segment<'_>>, range: Range<usize>) {
    if let Some(last) = segments.last_mut() {
        if last.kind == SegmentKind::Code && last.lines.end == range.start {
            last.lines.end = range.end;
            return;
        }
    }
    segments.push(Segment::code(range));
}

/// Partition `lines` into contiguous, non-overlapping segments
///
/// # Arguments
/// * `lines` - Source lines without line terminators
/// * `lang` - Comment syntax; `None` yields a single code segment
///
/// # Returns
/// Segments in source order whose ranges tile `0..lines.len()`. An
/// unterminated block comment degrades to code through the end of input.
#[must_use]
pub fn classify<'a>(lines: &[&'a str], lang: Option<&Language>) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let Some(lang) = lang else {
        if !lines.is_empty() {
            segments.push(Segment::code(0..lines.len()));
        }
        return segments;
    };

    let mut i = 0;
    while i < lines.len() {
        // Block comment
        if let Some((indent, index)) = match_block_start(lines[i], lang) {
            if let Some(close) = lang.block_end_for(index) {
                let open = lang.block_start[index];
                if let Some(end) = find_block_end(lines, i, open, close) {
                    segments.push(Segment {
                        kind: SegmentKind::BlockComment { open, close },
                        lines: i..end + 1,
                        indent,
                    });
                    i = end + 1;
                } else {
                    log::debug!(
                        "unterminated block comment at line {}, treating as code",
                        i + 1
                    );
                    push_code(&mut segments, i..lines.len());
                    i = lines.len();
                }
                continue;
            }
        }

        // Line comment run
        if let Some((indent, mut marker)) = match_line_comment(lines[i], lang) {
            let base = marker.trim_end_matches(' ');
            let start = i;
            i += 1;
            while i < lines.len() {
                match match_line_comment(lines[i], lang) {
                    Some((ind, mk)) if ind == indent && mk.trim_end_matches(' ') == base => {
                        // Prefer the marker variant that carries the space
                        if mk.len() > marker.len() {
                            marker = mk;
                        }
                        i += 1;
                    }
                    _ => break,
                }
            }
            segments.push(Segment {
                kind: SegmentKind::LineComment { marker },
                lines: start..i,
                indent,
            });
            continue;
        }

        // Code run
        let start = i;
        i += 1;
        while i < lines.len() && !starts_comment(lines[i], lang) {
            i += 1;
        }
        push_code(&mut segments, start..i);
    }

    log::debug!(
        "classified {} lines into {} segments for {}",
        lines.len(),
        segments.len(),
        lang.name
    );
    segments
}
