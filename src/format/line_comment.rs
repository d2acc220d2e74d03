//! Rewrapping of line-comment runs

use crate::format::doc_comment::{self, blank_edges};
use crate::format::wrap::wrap_text;
use crate::language::Language;
use crate::parser::patterns::is_decoration_line;

/// Comment text of one line: indent and base marker removed, then one space
fn comment_content<'a>(line: &'a str, indent: &str, base: &str) -> &'a str {
    let rest = line.get(indent.len()..).unwrap_or(line);
    let rest = rest.strip_prefix(base).unwrap_or(rest);
    rest.strip_prefix(' ').unwrap_or(rest)
}

/// Rewrap a run of line comments
///
/// Decoration lines such as `// ======` are emitted unchanged and split the
/// run into independently wrapped pieces. Each piece is rendered with the
/// doc-comment grammar when the language defines one for `marker`, and as
/// plain wrapped text otherwise.
///
/// # Arguments
/// * `lines` - The source lines of the run
/// * `indent` - Indentation shared by every line
/// * `marker` - Comment token plus its trailing space, if any, e.g. `"# "`
/// * `lang` - Language of the surrounding source
/// * `column_width` - Target width in display columns
/// * `tab_width` - Tab stop distance
#[must_use]
pub fn render(
    lines: &[&str],
    indent: &str,
    marker: &str,
    lang: &Language,
    column_width: usize,
    tab_width: usize,
) -> Vec<String> {
    let base = marker.trim_end_matches(' ');
    let contents: Vec<&str> = lines
        .iter()
        .map(|line| comment_content(line, indent, base))
        .collect();
    let structured = lang.has_doc_comments(marker);

    let render_piece = |piece: &[&str]| {
        if structured {
            doc_comment::render(piece, indent, base, column_width, tab_width)
        } else {
            render_plain(piece, indent, marker, column_width, tab_width)
        }
    };

    let mut out = Vec::with_capacity(lines.len());
    let mut piece_start = None;
    for (i, content) in contents.iter().enumerate() {
        if is_decoration_line(content) {
            if let Some(start) = piece_start.take() {
                out.extend(render_piece(&contents[start..i]));
            }
            out.push(lines[i].to_string());
        } else if piece_start.is_none() {
            piece_start = Some(i);
        }
    }
    if let Some(start) = piece_start {
        out.extend(render_piece(&contents[start..]));
    }
    out
}

/// Wrap comment text as plain paragraphs, keeping blank lines at the edges
fn render_plain(
    content: &[&str],
    indent: &str,
    marker: &str,
    column_width: usize,
    tab_width: usize,
) -> Vec<String> {
    let (leading, trailing) = blank_edges(content);
    let bare = format!("{indent}{}", marker.trim_end_matches(' '));
    let prefix = format!("{indent}{marker}");

    let mut out = vec![bare.clone(); leading];
    let body = &content[leading..content.len() - trailing];
    if !body.is_empty() {
        out.extend(wrap_text(
            &body.join("\n"),
            &prefix,
            &prefix,
            column_width,
            tab_width,
        ));
    }
    out.extend(std::iter::repeat(bare).take(trailing));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::from_name;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_comment_content() {
        assert_eq!(comment_content("\t// text", "\t", "//"), "text");
        assert_eq!(comment_content("//text", "", "//"), "text");
        assert_eq!(comment_content("//\tcode", "", "//"), "\tcode");
        assert_eq!(comment_content("//  two", "", "//"), " two");
        assert_eq!(comment_content("#", "", "#"), "");
    }

    #[test]
    fn test_render_python_plain() {
        let py = from_name("python").unwrap();
        let got = render(
            &["    # This is a long comment that should be wrapped nicely"],
            "    ",
            "# ",
            py,
            30,
            4,
        );
        assert_eq!(
            got,
            vec![
                "    # This is a long comment",
                "    # that should be wrapped",
                "    # nicely",
            ]
        );
    }

    #[test]
    fn test_render_decoration_splits_run() {
        let py = from_name("python").unwrap();
        let got = render(
            &["# ========", "# first part", "# joins", "# ========", "# after"],
            "",
            "# ",
            py,
            80,
            4,
        );
        assert_eq!(
            got,
            vec!["# ========", "# first part joins", "# ========", "# after"]
        );
    }

    #[test]
    fn test_render_keeps_marker_without_space() {
        let sh = from_name("shell").unwrap();
        let got = render(&["#one", "#two"], "", "#", sh, 80, 4);
        assert_eq!(got, vec!["#one two"]);
    }

    #[test]
    fn test_render_plain_blank_edges() {
        let c = from_name("c").unwrap();
        let got = render(&["//", "// a", "// b", "//"], "", "// ", c, 80, 4);
        assert_eq!(got, vec!["//", "// a b", "//"]);
    }

    #[test]
    fn test_render_go_uses_doc_grammar() {
        let go = from_name("go").unwrap();
        let got = render(
            &["// Example:", "//", "//\tx := 1", "//\ty := 2"],
            "",
            "// ",
            go,
            80,
            4,
        );
        assert_eq!(got, vec!["// Example:", "//", "//\tx := 1", "//\ty := 2"]);
    }

    #[test]
    fn test_render_rust_doc_marker_is_plain() {
        let rust = from_name("rust").unwrap();
        let got = render(&["/// a", "/// b"], "", "/// ", rust, 80, 4);
        assert_eq!(got, vec!["/// a b"]);
    }
}
