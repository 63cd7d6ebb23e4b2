//! Presentation mapping: Document → ContentTree.
//!
//! Visible sections become level-2 headings and visible items level-3
//! headings (skipped when the item title is blank). Item bodies are split
//! into blocks:
//!
//! - lines starting with `- `, `* ` or `• ` form an unordered list,
//! - lines starting with `N. ` form an ordered list,
//! - any other run of non-blank lines forms one paragraph, with a `Break`
//!   between source lines,
//! - blank lines end the current block.

use super::inline::parse_inline;
use super::nodes::{ContentNode, ContentTree};
use crate::model::Document;

const SECTION_LEVEL: u8 = 2;
const ITEM_LEVEL: u8 = 3;

pub fn from_model(doc: &Document) -> ContentTree {
    let mut nodes = Vec::new();
    for section in doc.visible_sections() {
        nodes.push(ContentNode::heading(SECTION_LEVEL, section.title.as_str()));
        for item in section.visible_items() {
            if !item.title.trim().is_empty() {
                nodes.push(ContentNode::heading(ITEM_LEVEL, item.title.as_str()));
            }
            nodes.extend(body_blocks(&item.content));
        }
    }
    ContentTree::new(nodes)
}

/// Split an item body into paragraph and list blocks.
pub fn body_blocks(content: &str) -> Vec<ContentNode> {
    let mut blocks = BlockBuilder::default();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            blocks.flush();
        } else if let Some((ordered, rest)) = list_marker(line) {
            blocks.list_item(ordered, rest);
        } else {
            blocks.paragraph_line(line);
        }
    }
    blocks.finish()
}

/// Returns `(ordered, text after the marker)` for list lines.
fn list_marker(line: &str) -> Option<(bool, &str)> {
    for bullet in ["- ", "* ", "• "] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return Some((false, rest.trim_start()));
        }
    }
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..]
        .strip_prefix(". ")
        .map(|rest| (true, rest.trim_start()))
}

#[derive(Default)]
struct BlockBuilder<'a> {
    blocks: Vec<ContentNode>,
    paragraph: Vec<&'a str>,
    list: Option<(bool, Vec<ContentNode>)>,
}

impl<'a> BlockBuilder<'a> {
    fn paragraph_line(&mut self, line: &'a str) {
        self.flush_list();
        self.paragraph.push(line);
    }

    fn list_item(&mut self, ordered: bool, text: &str) {
        self.flush_paragraph();
        if matches!(self.list, Some((kind, _)) if kind != ordered) {
            self.flush_list();
        }
        let (_, items) = self.list.get_or_insert_with(|| (ordered, Vec::new()));
        items.push(ContentNode::ListItem(parse_inline(text)));
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let mut children = Vec::new();
        for (index, line) in self.paragraph.drain(..).enumerate() {
            if index > 0 {
                children.push(ContentNode::Break);
            }
            children.extend(parse_inline(line));
        }
        self.blocks.push(ContentNode::Paragraph(children));
    }

    fn flush_list(&mut self) {
        if let Some((ordered, items)) = self.list.take() {
            self.blocks.push(ContentNode::List { ordered, items });
        }
    }

    fn flush(&mut self) {
        self.flush_paragraph();
        self.flush_list();
    }

    fn finish(mut self) -> Vec<ContentNode> {
        self.flush();
        self.blocks
    }
}
