//! Greedy, tab-aware paragraph wrapping
//!
//! Text is split into paragraphs at blank lines and each paragraph is packed
//! greedily onto lines of at most `column_width` display columns, prefix
//! included. Spacing between words that stay on the same line is reproduced
//! from the source, so rewrapping already wrapped text is a no-op.

/// A word and the whitespace that preceded it in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token<'a> {
    gap: &'a str,
    word: &'a str,
}

/// Display width of `s` with tabs expanded to the next multiple of `tab_width`
///
/// Every other code point counts as one column.
#[must_use]
pub fn display_width(s: &str, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    let mut col = 0;
    for c in s.chars() {
        if c == '\t' {
            col += tab_width - (col % tab_width);
        } else {
            col += 1;
        }
    }
    col
}

/// Wrap `text` so every output line, prefix included, fits in `column_width`
///
/// # Arguments
/// * `text` - Raw text; blank lines separate paragraphs
/// * `prefix` - Prefix of the first line of the first paragraph
/// * `subsequent_prefix` - Prefix of every other line
/// * `column_width` - Target width in display columns
/// * `tab_width` - Tab stop distance used for width accounting
///
/// # Returns
/// The output lines in order. Paragraphs are separated by `subsequent_prefix`
/// with trailing spaces trimmed. Text without any words yields `[prefix]`.
/// A word wider than the available width is placed alone on its own line.
#[must_use]
pub fn wrap_text(
    text: &str,
    prefix: &str,
    subsequent_prefix: &str,
    column_width: usize,
    tab_width: usize,
) -> Vec<String> {
    let paragraphs = split_paragraphs(text);
    if paragraphs.is_empty() {
        return vec![prefix.to_string()];
    }

    let separator = subsequent_prefix.trim_end_matches(' ');
    let mut result = Vec::new();
    for (i, para) in paragraphs.iter().enumerate() {
        if i > 0 {
            result.push(separator.to_string());
        }
        let first_prefix = if i == 0 { prefix } else { subsequent_prefix };
        result.extend(wrap_paragraph(
            para,
            first_prefix,
            subsequent_prefix,
            column_width,
            tab_width,
        ));
    }
    result
}

/// Split text into paragraphs at blank lines
///
/// Lines of one paragraph are trimmed and joined with a single space, so
/// line breaks inside a paragraph carry no spacing information.
fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(trimmed);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }
    paragraphs
}

/// Split a paragraph into words, remembering the whitespace before each
fn tokenize(text: &str) -> Vec<Token<'_>> {
    let is_gap = |c: char| c == ' ' || c == '\t';
    let mut tokens = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let word_start = rest.find(|c: char| !is_gap(c)).unwrap_or(rest.len());
        if word_start == rest.len() {
            break;
        }
        let gap = &rest[..word_start];
        let after_gap = &rest[word_start..];
        let word_len = after_gap.find(is_gap).unwrap_or(after_gap.len());
        tokens.push(Token {
            gap,
            word: &after_gap[..word_len],
        });
        rest = &after_gap[word_len..];
    }
    tokens
}

/// Greedily pack one paragraph onto lines
fn wrap_paragraph(
    text: &str,
    prefix: &str,
    subsequent_prefix: &str,
    column_width: usize,
    tab_width: usize,
) -> Vec<String> {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return Vec::new();
    }

    let available_for =
        |p: &str| column_width.saturating_sub(display_width(p, tab_width)).max(1);

    let mut lines = Vec::new();
    let mut current_prefix = prefix;
    let mut available = available_for(current_prefix);
    let mut line = String::new();
    let mut line_width = 0;

    for tok in tokens {
        let word_width = display_width(tok.word, tab_width);
        if !line.is_empty() {
            let gap_width = display_width(tok.gap, tab_width);
            // A single space is the minimum gap for break decisions
            let break_width = gap_width.max(1);
            if line_width + break_width + word_width > available {
                lines.push(format!("{current_prefix}{line}"));
                line.clear();
                line_width = 0;
                current_prefix = subsequent_prefix;
                available = available_for(current_prefix);
            } else {
                if gap_width > 0 {
                    line.push_str(tok.gap);
                } else {
                    line.push(' ');
                }
                line_width += break_width;
            }
        }
        line.push_str(tok.word);
        line_width += word_width;
    }
    if !line.is_empty() {
        lines.push(format!("{current_prefix}{line}"));
    }
    lines
}
