/// Inline markup inside doc-comment paragraphs
///
/// Inline parsing never drops text: flattening the parsed spans reproduces
/// the input exactly, so width accounting on the flattened form is the same
/// as on the source.
use super::patterns::INLINE_RE;

/// One run of inline content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    Plain(String),
    /// `_text_`; holds the text between the underscores
    Emphasis(String),
    /// Automatic link such as `https://example.com`
    Link(Vec<InlineSpan>),
    /// Cross-reference such as `[io.Reader]`; holds the text inside the brackets
    DocLink(Vec<InlineSpan>),
}

/// Characters that may not touch a doc link on either side
fn is_link_neighbor(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Parse a paragraph's text into inline spans
#[must_use]
pub fn parse_inline(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut plain_start = 0;

    for caps in INLINE_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let span = if let Some(url) = caps.name("url") {
            InlineSpan::Link(vec![InlineSpan::Plain(url.as_str().to_string())])
        } else if let Some(doc) = caps.name("doc") {
            let before = text[..doc.start()].chars().next_back();
            let after = text[doc.end()..].chars().next();
            if before.is_some_and(is_link_neighbor)
                || after.is_some_and(|c| is_link_neighbor(c) || c == '(' || c == '[' || c == ':')
            {
                continue;
            }
            let inner = &doc.as_str()[1..doc.len() - 1];
            InlineSpan::DocLink(vec![InlineSpan::Plain(inner.to_string())])
        } else if let Some(em) = caps.name("em") {
            let inner = &em.as_str()[1..em.len() - 1];
            InlineSpan::Emphasis(inner.to_string())
        } else {
            continue;
        };

        if whole.start() > plain_start {
            spans.push(InlineSpan::Plain(text[plain_start..whole.start()].to_string()));
        }
        spans.push(span);
        plain_start = whole.end();
    }

    if plain_start < text.len() {
        spans.push(InlineSpan::Plain(text[plain_start..].to_string()));
    }
    spans
}

/// Render spans back to text
///
/// Links flatten to their text, doc links keep their brackets and emphasis
/// keeps its underscores.
#[must_use]
pub fn flatten(spans: &[InlineSpan]) -> String {
    let mut out = String::new();
    flatten_into(&mut out, spans);
    out
}

fn flatten_into(out: &mut String, spans: &[InlineSpan]) {
    for span in spans {
        match span {
            InlineSpan::Plain(text) => out.push_str(text),
            InlineSpan::Emphasis(text) => {
                out.push('_');
                out.push_str(text);
                out.push('_');
            }
            InlineSpan::Link(inner) => flatten_into(out, inner),
            InlineSpan::DocLink(inner) => {
                out.push('[');
                flatten_into(out, inner);
                out.push(']');
            }
        }
    }
}
