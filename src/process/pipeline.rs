//! Rewrapping pipeline
//!
//! Chooses the processing mode for the resolved language and runs it:
//! - No language: the whole input is wrapped as plain text
//! - Document languages: top-level paragraphs are wrapped
//! - Source languages: comment segments are rewrapped, code passes through

use std::borrow::Cow;
use std::io::{Read, Write};

use crate::format::wrap::wrap_text;
use crate::format::{block_comment, line_comment};
use crate::language::Language;
use crate::parser::segment::{classify, SegmentKind};
use crate::process::markdown::{render_document, CommonMarkLocator};
use crate::Result;

/// Convert CRLF and lone CR line endings to LF
fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Rewrap comments in source code, or prose in documents and plain text
///
/// # Arguments
/// * `src` - Input bytes; anything that is not UTF-8 is returned unchanged
/// * `lang` - Language of the input, `None` for plain text
/// * `column_width` - Target width in display columns
/// * `tab_width` - Tab stop distance used for width accounting
///
/// # Returns
/// The rewrapped bytes with LF line endings. The output ends with a newline
/// exactly when the input was non-empty and ended with one.
#[must_use]
pub fn source(
    src: &[u8],
    lang: Option<&Language>,
    column_width: usize,
    tab_width: usize,
) -> Vec<u8> {
    match std::str::from_utf8(src) {
        Ok(text) => source_str(text, lang, column_width, tab_width).into_bytes(),
        Err(e) => {
            log::warn!("input is not valid UTF-8 ({e}), leaving it unchanged");
            src.to_vec()
        }
    }
}

/// [`source`] for text that is already known to be UTF-8
#[must_use]
pub fn source_str(
    text: &str,
    lang: Option<&Language>,
    column_width: usize,
    tab_width: usize,
) -> String {
    let text = normalize_line_endings(text);
    let had_trailing_newline = text.ends_with('\n');

    let mut result = match lang {
        None => {
            log::debug!("wrapping input as plain text");
            wrap_text(&text, "", "", column_width, tab_width).join("\n")
        }
        Some(lang) if lang.is_document() => {
            render_document(&CommonMarkLocator, &text, column_width, tab_width)
        }
        Some(lang) => rewrap_source(&text, lang, column_width, tab_width),
    };

    if had_trailing_newline && !result.ends_with('\n') {
        result.push('\n');
    }
    result
}

/// Rewrap every comment segment of a source file
fn rewrap_source(text: &str, lang: &Language, column_width: usize, tab_width: usize) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());

    for seg in classify(&lines, Some(lang)) {
        let seg_lines = seg.slice(&lines);
        match seg.kind {
            SegmentKind::Code => out.extend(seg_lines.iter().map(ToString::to_string)),
            SegmentKind::LineComment { marker } => out.extend(line_comment::render(
                seg_lines,
                seg.indent,
                marker,
                lang,
                column_width,
                tab_width,
            )),
            SegmentKind::BlockComment { open, close } => out.extend(block_comment::render(
                seg_lines,
                seg.indent,
                open,
                close,
                lang.block_prefix(),
                column_width,
                tab_width,
            )),
        }
    }
    out.join("\n")
}

/// Read all of `input`, rewrap it and write the result to `output`
pub fn rewrap_stream<R: Read, W: Write>(
    mut input: R,
    output: &mut W,
    lang: Option<&Language>,
    column_width: usize,
    tab_width: usize,
) -> Result<()> {
    let mut buffer = Vec::new();
    input.read_to_end(&mut buffer)?;
    output.write_all(&source(&buffer, lang, column_width, tab_width))?;
    Ok(())
}
