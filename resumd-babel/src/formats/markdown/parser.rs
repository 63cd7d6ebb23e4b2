//! Markdown parsing (Markdown → Document import)
//!
//! A single pass over the lines with three states: outside any section,
//! inside a section with no open item, inside an item. Parsing never fails;
//! text with no structural headings yields an empty document.

use crate::model::{Document, Id, IdGenerator, Item, Section, SequentialIds};
use std::sync::Arc;

const SECTION_PREFIX: &str = "## ";
const ITEM_PREFIX: &str = "### ";

/// Parse Markdown into a document whose ids come from a fresh [`SequentialIds`].
pub fn parse_markdown(source: &str) -> Document {
    parse_with_ids(source, Arc::new(SequentialIds::new()))
}

/// Parse Markdown, drawing section and item ids from `ids`.
///
/// The returned document keeps `ids` for its later edits.
pub fn parse_with_ids(source: &str, ids: Arc<dyn IdGenerator>) -> Document {
    let mut builder = Builder::new(ids.as_ref());
    for line in source.split('\n') {
        builder.line(line);
    }
    let sections = builder.finish();
    tracing::debug!(sections = sections.len(), "parsed markdown");
    Document::from_sections(sections, ids)
}

struct OpenItem<'a> {
    id: Id,
    title: String,
    body: Vec<&'a str>,
}

struct Builder<'a, 'g> {
    ids: &'g dyn IdGenerator,
    sections: Vec<Section>,
    section: Option<Section>,
    item: Option<OpenItem<'a>>,
}

impl<'a, 'g> Builder<'a, 'g> {
    fn new(ids: &'g dyn IdGenerator) -> Self {
        Self {
            ids,
            sections: Vec::new(),
            section: None,
            item: None,
        }
    }

    fn line(&mut self, line: &'a str) {
        if let Some(title) = line.strip_prefix(SECTION_PREFIX) {
            self.flush_section();
            self.section = Some(Section::new(self.ids.next_id(), title.trim()));
        } else if let Some(title) = line.strip_prefix(ITEM_PREFIX) {
            self.flush_item();
            if self.section.is_some() {
                self.item = Some(OpenItem {
                    id: self.ids.next_id(),
                    title: title.trim().to_string(),
                    body: Vec::new(),
                });
            }
        } else if let Some(item) = self.item.as_mut() {
            item.body.push(line);
        }
    }

    fn flush_item(&mut self) {
        let (Some(item), Some(section)) = (self.item.take(), self.section.as_mut()) else {
            return;
        };
        let content = item.body.join("\n");
        section.items.push(Arc::new(Item::new(
            item.id,
            item.title,
            content.trim(),
        )));
    }

    fn flush_section(&mut self) {
        self.flush_item();
        if let Some(section) = self.section.take() {
            self.sections.push(section);
        }
    }

    fn finish(mut self) -> Vec<Section> {
        self.flush_section();
        self.sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(doc: &Document) -> Vec<(String, Vec<String>)> {
        doc.sections()
            .iter()
            .map(|s| {
                (
                    s.title.clone(),
                    s.items.iter().map(|i| i.title.clone()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn parses_sections_and_items() {
        let doc = parse_markdown(
            "## Experience\n\n### Acme\n\nBuilt things.\n\n### Initech\nTPS reports\n## Skills\n### \nRust\n",
        );
        assert_eq!(
            titles(&doc),
            vec![
                (
                    "Experience".to_string(),
                    vec!["Acme".to_string(), "Initech".to_string()]
                ),
                ("Skills".to_string(), vec!["".to_string()]),
            ]
        );
        let experience = &doc.sections()[0];
        assert_eq!(experience.items[0].content, "Built things.");
        assert_eq!(experience.items[1].content, "TPS reports");
        assert_eq!(doc.sections()[1].items[0].content, "Rust");
        assert!(doc.sections().iter().all(|s| s.visible));
    }

    #[test]
    fn empty_and_unstructured_input_yield_empty_document() {
        assert!(parse_markdown("").is_empty());
        assert!(parse_markdown("just some text\n- and a list\n").is_empty());
    }

    #[test]
    fn items_before_any_section_are_dropped() {
        let doc = parse_markdown("### Orphan\norphan body\n## Real\n### Kept\nbody\n");
        assert_eq!(
            titles(&doc),
            vec![("Real".to_string(), vec!["Kept".to_string()])]
        );
    }

    #[test]
    fn text_outside_items_is_discarded() {
        let doc = parse_markdown("intro\n## Skills\nstray line\n### Languages\nRust\n");
        let section = &doc.sections()[0];
        assert_eq!(section.items.len(), 1);
        assert_eq!(section.items[0].content, "Rust");
    }

    #[test]
    fn deeper_headings_are_body_text() {
        let doc = parse_markdown("## S\n### I\n#### Detail\nmore\n");
        assert_eq!(doc.sections()[0].items[0].content, "#### Detail\nmore");
    }

    #[test]
    fn heading_without_space_is_body_text() {
        let doc = parse_markdown("## S\n### I\n##not a section\n");
        assert_eq!(doc.sections().len(), 1);
        assert_eq!(doc.sections()[0].items[0].content, "##not a section");
    }

    #[test]
    fn section_without_items_is_kept() {
        let doc = parse_markdown("## Empty\n## Next\n### A\n");
        assert_eq!(doc.sections()[0].items.len(), 0);
        assert_eq!(doc.sections()[1].items[0].content, "");
    }

    #[test]
    fn body_keeps_inner_blank_lines() {
        let doc = parse_markdown("## S\n### I\n\n  first\n\n\nsecond  \n\n");
        assert_eq!(doc.sections()[0].items[0].content, "first\n\n\nsecond");
    }

    #[test]
    fn ids_are_drawn_in_document_order() {
        let doc = parse_markdown("## A\n### a1\n### a2\n## B\n");
        let ids: Vec<_> = doc.all_ids().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["id-1", "id-2", "id-3", "id-4"]);
    }

    #[test]
    fn windows_line_endings_leave_carriage_return_in_body() {
        let doc = parse_markdown("## Skills\r\n### Lang\r\nRust\r\nGo\r\n");
        assert_eq!(doc.sections()[0].title, "Skills");
        assert_eq!(doc.sections()[0].items[0].title, "Lang");
        assert_eq!(doc.sections()[0].items[0].content, "Rust\r\nGo");
    }
}
