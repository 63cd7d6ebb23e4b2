//! Inline link spans inside item bodies.
//!
//! Item content is stored as raw Markdown and only split into spans when it is
//! rendered or exported. The only inline syntax recognized here is
//! `[text](url)`: brackets do not nest, and a `]` or `)` inside either group
//! terminates it.
//!
//! ```
//! use resumd_babel::common::links::{parse_links, Span};
//!
//! let spans: Vec<_> = parse_links("Read [the docs](https://docs.rs) first").collect();
//! assert_eq!(spans[1], Span::Link { text: "the docs", url: "https://docs.rs" });
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::iter::FusedIterator;

static LINK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern compiles"));

/// One piece of a text blob: either plain text or a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    Text(&'a str),
    Link { text: &'a str, url: &'a str },
}

impl<'a> Span<'a> {
    /// The text a reader sees for this span.
    pub fn display_text(&self) -> &'a str {
        match self {
            Span::Text(text) => text,
            Span::Link { text, .. } => text,
        }
    }
}

/// Lazy iterator over the spans of a text blob.
///
/// The iterator is cheap to clone; a clone taken before iteration starts over
/// from the beginning of the input.
#[derive(Debug, Clone)]
pub struct LinkSpans<'a> {
    text: &'a str,
    pos: usize,
    pending: Option<Span<'a>>,
    finished: bool,
}

/// Split `text` into plain-text and link spans, left to right.
///
/// Text with no link syntax yields exactly one [`Span::Text`] equal to the
/// input, including the empty string.
pub fn parse_links(text: &str) -> LinkSpans<'_> {
    LinkSpans {
        text,
        pos: 0,
        pending: None,
        finished: false,
    }
}

impl<'a> Iterator for LinkSpans<'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(link) = self.pending.take() {
            return Some(link);
        }
        if self.finished {
            return None;
        }

        let start = self.pos;
        match LINK_PATTERN.captures_at(self.text, start) {
            Some(caps) => {
                let whole = caps.get(0)?;
                let link = Span::Link {
                    text: caps.get(1)?.as_str(),
                    url: caps.get(2)?.as_str(),
                };
                self.pos = whole.end();
                if whole.start() > start {
                    self.pending = Some(link);
                    Some(Span::Text(&self.text[start..whole.start()]))
                } else {
                    Some(link)
                }
            }
            None => {
                self.finished = true;
                // An input without any link still yields itself once.
                if start < self.text.len() || start == 0 {
                    Some(Span::Text(&self.text[start..]))
                } else {
                    None
                }
            }
        }
    }
}

impl FusedIterator for LinkSpans<'_> {}

/// Append a `[text](url)` link to the end of `content`.
///
/// Selection state lives with the caller, so this never replaces text in
/// place.
pub fn insert_link(content: &str, text: &str, url: &str) -> String {
    format!("{content}[{text}]({url})")
}

/// Render `text` with every link replaced by its visible text.
pub fn strip_links(text: &str) -> String {
    parse_links(text).map(|span| span.display_text()).collect()
}
