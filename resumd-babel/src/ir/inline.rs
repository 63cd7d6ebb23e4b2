//! Inline scanning of item bodies: links first, then `**bold**` / `*italic*`.
//!
//! Emphasis markers only pair up when the enclosed text is non-empty and does
//! not start or end with whitespace, so `5 * 3 * 2` stays literal. Unpaired
//! markers are kept as text.

use super::nodes::ContentNode;
use crate::common::links::{parse_links, Span};

pub fn parse_inline(text: &str) -> Vec<ContentNode> {
    let mut nodes = Vec::new();
    for span in parse_links(text) {
        match span {
            Span::Text(value) => nodes.extend(scan_emphasis(value)),
            Span::Link { text, url } => nodes.push(ContentNode::link(text, url)),
        }
    }
    nodes
}

fn scan_emphasis(text: &str) -> Vec<ContentNode> {
    let mut nodes = Vec::new();
    let bytes = text.as_bytes();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'*' {
            i += 1;
            continue;
        }
        let marker = if text[i..].starts_with("**") { "**" } else { "*" };
        let open_end = i + marker.len();
        match closing_marker(text, open_end, marker) {
            Some(close) => {
                push_text(&mut nodes, &text[literal_start..i]);
                let children = scan_emphasis(&text[open_end..close]);
                nodes.push(if marker == "**" {
                    ContentNode::bold(children)
                } else {
                    ContentNode::italic(children)
                });
                i = close + marker.len();
                literal_start = i;
            }
            None => i = open_end,
        }
    }
    push_text(&mut nodes, &text[literal_start..]);
    nodes
}

/// Byte index in `text` of the marker closing an emphasis opened at `from`.
fn closing_marker(text: &str, from: usize, marker: &str) -> Option<usize> {
    let rest = &text[from..];
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        return None;
    }
    let mut search = 0;
    while let Some(offset) = rest[search..].find(marker) {
        let end = search + offset;
        if marker == "*" && rest[end..].starts_with("**") {
            search = end + 2;
            continue;
        }
        if end > 0 && !rest[..end].ends_with(char::is_whitespace) {
            return Some(from + end);
        }
        search = end + marker.len();
    }
    None
}

fn push_text(nodes: &mut Vec<ContentNode>, value: &str) {
    if !value.is_empty() {
        nodes.push(ContentNode::text(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ContentNode::Text;

    fn text(value: &str) -> ContentNode {
        Text(value.to_string())
    }

    #[test]
    fn plain_text_is_single_node() {
        assert_eq!(parse_inline("Python, Go"), vec![text("Python, Go")]);
    }

    #[test]
    fn links_and_text_interleave() {
        assert_eq!(
            parse_inline("See [site](https://a.dev) now"),
            vec![
                text("See "),
                ContentNode::link("site", "https://a.dev"),
                text(" now"),
            ]
        );
    }

    #[test]
    fn bold_and_italic_pairs() {
        assert_eq!(
            parse_inline("**Lead** of *core* team"),
            vec![
                ContentNode::bold(vec![text("Lead")]),
                text(" of "),
                ContentNode::italic(vec![text("core")]),
                text(" team"),
            ]
        );
    }

    #[test]
    fn bold_inside_italic() {
        assert_eq!(
            parse_inline("*very **much** so*"),
            vec![ContentNode::italic(vec![
                text("very "),
                ContentNode::bold(vec![text("much")]),
                text(" so"),
            ])]
        );
    }

    #[test]
    fn unpaired_markers_stay_literal() {
        assert_eq!(parse_inline("5 * 3 * 2"), vec![text("5 * 3 * 2")]);
        assert_eq!(parse_inline("**open"), vec![text("**open")]);
        assert_eq!(parse_inline("****"), vec![text("****")]);
        assert_eq!(parse_inline("trailing*"), vec![text("trailing*")]);
    }

    #[test]
    fn emphasis_does_not_cross_links() {
        assert_eq!(
            parse_inline("*a [b](u) c*"),
            vec![
                text("*a "),
                ContentNode::link("b", "u"),
                text(" c*"),
            ]
        );
    }

    #[test]
    fn multibyte_text_around_markers() {
        assert_eq!(
            parse_inline("café **naïve** – ok"),
            vec![
                text("café "),
                ContentNode::bold(vec![text("naïve")]),
                text(" – ok"),
            ]
        );
    }
}
