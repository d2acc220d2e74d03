//! Rewrapping of block comments

use crate::format::wrap::wrap_text;
use crate::parser::segment::split_indent;

/// Text of an interior line with its indentation and `*` gutter removed
fn interior_text(line: &str) -> &str {
    let (_, rest) = split_indent(line);
    rest.strip_prefix("* ")
        .or_else(|| rest.strip_prefix('*'))
        .unwrap_or(rest)
}

/// Rewrap a block comment into canonical form
///
/// The output is the opener as written on its own line, the text wrapped
/// behind `block_prefix`, and the closer on its own line behind one space.
/// Single-line comments and comments with code after the closer are
/// returned unchanged.
///
/// # Arguments
/// * `lines` - The source lines, from the opener through the closer
/// * `indent` - Indentation of the opening line
/// * `open` / `close` - The matched block tokens, e.g. `/*` and `*/`
/// * `block_prefix` - Prefix of interior lines, e.g. `" * "`
#[must_use]
pub fn render(
    lines: &[&str],
    indent: &str,
    open: &str,
    close: &str,
    block_prefix: &str,
    column_width: usize,
    tab_width: usize,
) -> Vec<String> {
    let verbatim = || lines.iter().map(ToString::to_string).collect::<Vec<_>>();
    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return Vec::new();
    };
    if lines.len() == 1 {
        return verbatim();
    }

    let (_, last_trimmed) = split_indent(last);
    let Some(close_at) = last_trimmed.find(close) else {
        return verbatim();
    };
    if !last_trimmed[close_at + close.len()..].trim().is_empty() {
        log::debug!("code follows block comment closer, leaving comment as is");
        return verbatim();
    }

    // Keep doubled openers such as `/**` as written
    let (_, first_trimmed) = split_indent(first);
    let after_open = first_trimmed.get(open.len()..).unwrap_or("");
    let stars = after_open.len() - after_open.trim_start_matches('*').len();
    let opener = &first_trimmed[..open.len() + stars];

    let mut text: Vec<&str> = Vec::with_capacity(lines.len());
    let first_text = after_open[stars..].trim();
    if !first_text.is_empty() {
        text.push(first_text);
    }
    text.extend(lines[1..lines.len() - 1].iter().map(|l| interior_text(l)));
    let last_text = last_trimmed[..close_at].trim().trim_start_matches('*').trim();
    if !last_text.is_empty() {
        text.push(last_text);
    }

    let mut out = vec![format!("{indent}{opener}")];
    let joined = text.join("\n");
    if !joined.trim().is_empty() {
        let prefix = format!("{indent}{block_prefix}");
        out.extend(wrap_text(&joined, &prefix, &prefix, column_width, tab_width));
    }
    out.push(format!("{indent} {close}"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render_c(lines: &[&str], column: usize) -> Vec<String> {
        render(lines, "", "/*", "*/", " * ", column, 4)
    }

    #[test]
    fn test_render_block_wraps() {
        let got = render_c(
            &[
                "/*",
                " * This is a block comment that is long enough to need wrapping.",
                " */",
            ],
            40,
        );
        assert_eq!(
            got,
            vec![
                "/*",
                " * This is a block comment that is long",
                " * enough to need wrapping.",
                " */",
            ]
        );
    }

    #[test]
    fn test_render_block_text_on_delimiter_lines() {
        let got = render_c(&["/* first", "   second */"], 80);
        assert_eq!(got, vec!["/*", " * first second", " */"]);
    }

    #[test]
    fn test_render_block_keeps_doc_opener() {
        let got = render(
            &["    /**", "     * Returns the value.", "     */"],
            "    ",
            "/*",
            "*/",
            " * ",
            80,
            4,
        );
        assert_eq!(got, vec!["    /**", "     * Returns the value.", "     */"]);
    }

    #[test]
    fn test_render_block_paragraphs() {
        let got = render_c(&["/*", " * one", " *", " * two", " */"], 80);
        assert_eq!(got, vec!["/*", " * one", " *", " * two", " */"]);
    }

    #[test]
    fn test_render_block_empty_body() {
        let got = render_c(&["/*", " *", " */"], 80);
        assert_eq!(got, vec!["/*", " */"]);
    }

    #[test]
    fn test_render_block_single_line_unchanged() {
        let got = render_c(&["/* short */"], 5);
        assert_eq!(got, vec!["/* short */"]);
    }

    #[test]
    fn test_render_block_code_after_closer_unchanged() {
        let input = ["/* a", " b */ int x;"];
        assert_eq!(render_c(&input, 80), vec!["/* a", " b */ int x;"]);
    }

    #[test]
    fn test_render_block_other_tokens() {
        let got = render(&["{-", "  some haskell", "  text -}"], "", "{-", "-}", " ", 80, 4);
        assert_eq!(got, vec!["{-", " some haskell text", " -}"]);
    }
}
